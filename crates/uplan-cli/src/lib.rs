//! Uplan CLI - batch driver for U-plan generation.
//!
//! Provides the `generate_uplans` binary, which turns a directory of
//! trajectory CSVs into U-plan JSON documents.

pub mod batch;
pub mod config;

pub use batch::{
    build_plan, list_trajectories, run_batch, spacing_from_secs, BatchOptions, BatchSummary,
};
pub use config::Config;
