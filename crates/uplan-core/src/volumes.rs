//! Volume assembly: one 4-D operation volume per trajectory segment.

use chrono::{DateTime, Utc};

use crate::buffer::{oriented_rectangle, segment_midpoint};
use crate::error::{GeodesyError, PlanError};
use crate::geodesy::{Geodesy, Wgs84Geodesy};
use crate::models::{Altitude, Volume, Waypoint};
use crate::reduce::reduce_waypoints;
use crate::rules::{BufferRules, MIN_GROUND_CLEARANCE_M};
use crate::segment::classify_segment;

/// Turns reduced waypoint sequences into ordered operation volumes.
#[derive(Debug, Clone)]
pub struct VolumeGenerator<G = Wgs84Geodesy> {
    rules: BufferRules,
    geodesy: G,
}

impl VolumeGenerator<Wgs84Geodesy> {
    pub fn new(rules: BufferRules) -> Self {
        Self::with_geodesy(rules, Wgs84Geodesy)
    }
}

impl Default for VolumeGenerator<Wgs84Geodesy> {
    fn default() -> Self {
        Self::new(BufferRules::default())
    }
}

impl<G: Geodesy> VolumeGenerator<G> {
    pub fn with_geodesy(rules: BufferRules, geodesy: G) -> Self {
        Self { rules, geodesy }
    }

    /// Generate one volume per adjacent waypoint pair, in order.
    ///
    /// `start` anchors the trajectory's relative sample times. Any failing
    /// segment aborts the whole trajectory: no partial list is returned.
    pub fn generate(
        &self,
        waypoints: &[Waypoint],
        start: DateTime<Utc>,
    ) -> Result<Vec<Volume>, PlanError> {
        if waypoints.len() < 2 {
            return Err(PlanError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }

        let start_s = start.timestamp_millis() as f64 / 1000.0;
        let volumes = waypoints
            .windows(2)
            .enumerate()
            .map(|(segment, pair)| self.segment_volume(segment, &pair[0], &pair[1], start_s))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Generated {} volumes", volumes.len());
        Ok(volumes)
    }

    /// Reduce a raw trajectory by `stride` and generate its volumes.
    pub fn generate_from_raw(
        &self,
        raw: &[Waypoint],
        stride: usize,
        start: DateTime<Utc>,
    ) -> Result<Vec<Volume>, PlanError> {
        self.generate(&reduce_waypoints(raw, stride), start)
    }

    fn segment_volume(
        &self,
        segment: usize,
        wp1: &Waypoint,
        wp2: &Waypoint,
        start_s: f64,
    ) -> Result<Volume, PlanError> {
        let geodesy_err = |source: GeodesyError| PlanError::Geodesy { segment, source };

        let inverse = self
            .geodesy
            .inverse(wp1.lat, wp1.lon, wp2.lat, wp2.lon)
            .map_err(geodesy_err)?;

        let horizontal_m = inverse.distance_m;
        let vertical_m = (wp2.height_m - wp1.height_m).abs();
        let class = classify_segment(horizontal_m, vertical_m, &self.rules);
        let size = class.buffer_size(horizontal_m, vertical_m, &self.rules);

        let (mid_lat, mid_lon) = segment_midpoint(wp1, wp2);
        let geometry = oriented_rectangle(
            &self.geodesy,
            mid_lat,
            mid_lon,
            inverse.bearing_deg,
            size.along_track_m,
            size.cross_track_m,
        )
        .map_err(geodesy_err)?;

        let (min_altitude, max_altitude) = altitude_band(wp1.height_m, wp2.height_m, size.vertical_m);
        let (time_begin, time_end) = self.time_window(segment, wp1, wp2, start_s)?;

        tracing::debug!(
            segment,
            ?class,
            horizontal_m,
            vertical_m,
            "Built segment volume"
        );

        Ok(Volume {
            geometry,
            time_begin,
            time_end,
            min_altitude: Altitude::agl_m(min_altitude),
            max_altitude: Altitude::agl_m(max_altitude),
            ordinal: segment,
        })
    }

    fn time_window(
        &self,
        segment: usize,
        wp1: &Waypoint,
        wp2: &Waypoint,
        start_s: f64,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), PlanError> {
        let begin_s = start_s + wp1.time_s - self.rules.time_buffer_s;
        let end_s = start_s + wp2.time_s + self.rules.time_buffer_s;

        let to_utc = |secs: f64| {
            if !secs.is_finite() {
                return None;
            }
            // truncation toward zero, not flooring
            DateTime::from_timestamp(secs.trunc() as i64, 0)
        };

        match (to_utc(begin_s), to_utc(end_s)) {
            (Some(begin), Some(end)) => Ok((begin, end)),
            _ => Err(PlanError::TimeOutOfRange { segment }),
        }
    }
}

/// Altitude band `(min, max)` for a segment, centred on the mean of the
/// endpoint heights. The ground clearance floor is applied after the buffer
/// is subtracted.
pub fn altitude_band(h1: f64, h2: f64, vertical_m: f64) -> (f64, f64) {
    let mid = (h1.min(h2) + h1.max(h2)) / 2.0;
    let min = (mid - vertical_m).max(MIN_GROUND_CLEARANCE_M);
    (min, mid + vertical_m)
}
