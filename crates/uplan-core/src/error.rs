//! Error types for the volume pipeline.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodesyError {
    #[error("invalid coordinate lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("geodesic solve produced a non-finite result")]
    NonFiniteResult,
}

/// Failures that abort volume generation for a whole trajectory.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("not enough waypoints to form a segment (need at least 2, got {count})")]
    InsufficientWaypoints { count: usize },
    #[error("geodesic computation failed on segment {segment}: {source}")]
    Geodesy {
        segment: usize,
        #[source]
        source: GeodesyError,
    },
    #[error("time window of segment {segment} is not representable as a UTC timestamp")]
    TimeOutOfRange { segment: usize },
}

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("cannot open trajectory file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read trajectory rows: {0}")]
    Csv(#[from] csv::Error),
}
