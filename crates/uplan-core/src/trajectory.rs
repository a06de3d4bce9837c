//! Trajectory CSV ingestion.
//!
//! Rows are `SimTime, Lat, Lon, Alt[, ...]`; columns past the fourth (attitude
//! quaternion, velocities) are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::TrajectoryError;
use crate::models::Waypoint;

const COMMENT_PREFIX: &str = "//";

/// Load waypoints from a trajectory file.
pub fn load_waypoints(path: impl AsRef<Path>) -> Result<Vec<Waypoint>, TrajectoryError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TrajectoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let waypoints = read_waypoints(file)?;
    if let (Some(first), Some(last)) = (waypoints.first(), waypoints.last()) {
        tracing::info!(
            "Loaded {} waypoints from {}",
            waypoints.len(),
            path.display()
        );
        tracing::info!(
            "First waypoint: lat={}, lon={}, alt={}, time={}",
            first.lat,
            first.lon,
            first.height_m,
            first.time_s
        );
        tracing::info!(
            "Last waypoint: lat={}, lon={}, alt={}, time={}",
            last.lat,
            last.lon,
            last.height_m,
            last.time_s
        );
    }
    Ok(waypoints)
}

/// Parse waypoints from any CSV stream.
///
/// Blank and `//` comment lines are skipped. The first row that does not
/// start with a number is taken as the header. Malformed rows after that are
/// skipped with a warning.
pub fn read_waypoints<R: Read>(reader: R) -> Result<Vec<Waypoint>, TrajectoryError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut waypoints = Vec::new();
    let mut header_seen = false;

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                tracing::warn!("Skipping unreadable trajectory row: {}", err);
                continue;
            }
        };

        if is_blank_or_comment(&record) {
            continue;
        }

        match parse_row(&record) {
            Ok(waypoint) => waypoints.push(waypoint),
            Err(_) if !header_seen && waypoints.is_empty() && !starts_numeric(&record) => {
                header_seen = true;
            }
            Err(reason) => {
                tracing::warn!(
                    "Failed to parse line {}: {:?} - {}",
                    line_of(&record),
                    record.iter().collect::<Vec<_>>().join(","),
                    reason
                );
            }
        }
    }

    Ok(waypoints)
}

fn is_blank_or_comment(record: &StringRecord) -> bool {
    match record.get(0) {
        Some(first) if first.starts_with(COMMENT_PREFIX) => true,
        _ => record.iter().all(str::is_empty),
    }
}

fn starts_numeric(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|field| field.parse::<f64>().is_ok())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

fn parse_row(record: &StringRecord) -> Result<Waypoint, String> {
    if record.len() < 4 {
        return Err(format!("expected at least 4 fields, found {}", record.len()));
    }

    let field = |index: usize, name: &str| -> Result<f64, String> {
        let raw = record.get(index).unwrap_or_default();
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(format!("non-finite {name} {raw:?}")),
            Err(err) => Err(format!("invalid {name} {raw:?}: {err}")),
        }
    };

    Ok(Waypoint {
        time_s: field(0, "time")?,
        lat: field(1, "latitude")?,
        lon: field(2, "longitude")?,
        height_m: field(3, "height")?,
    })
}
