//! Uplan core - trajectory to operation volume geometry
//!
//! Reduces a sampled flight trajectory, classifies each segment, builds an
//! oriented buffer polygon around it and packages the result with altitude
//! and time bands as an ordered list of operation volumes.

pub mod buffer;
pub mod error;
pub mod geodesy;
pub mod models;
pub mod reduce;
pub mod rules;
pub mod segment;
pub mod trajectory;
pub mod volumes;

pub use error::{GeodesyError, PlanError, TrajectoryError};
pub use geodesy::{Geodesy, InverseSolution, LocalTangentGeodesy, Wgs84Geodesy};
pub use models::{
    format_utc_secs, Altitude, AltitudeReference, AltitudeUnit, BoundingBox, OrientedPolygon,
    Volume, Waypoint,
};
pub use reduce::reduce_waypoints;
pub use rules::{BufferRules, DEFAULT_STRIDE, MIN_GROUND_CLEARANCE_M};
pub use segment::{classify_segment, BufferSize, SegmentClass};
pub use trajectory::{load_waypoints, read_waypoints};
pub use volumes::{altitude_band, VolumeGenerator};
