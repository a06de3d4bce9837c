//! Uplan envelope - flight plan documents around generated volumes
//!
//! Parses trajectory file names into plan metadata and wraps an ordered
//! volume list into the U-plan document submitted to the authorization
//! service.

pub mod catalog;
pub mod document;

pub use catalog::{
    aircraft_type_schema, category_schema, parse_trajectory_filename, uas_performance,
    TrajectoryInfo, UasPerformance,
};
pub use document::{FlightMode, Location, UplanDocument};
