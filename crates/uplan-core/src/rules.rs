//! Buffer margins and thresholds for volume generation.

use serde::{Deserialize, Serialize};

/// Lowest allowed floor of any volume, meters AGL.
pub const MIN_GROUND_CLEARANCE_M: f64 = 10.0;

/// Default reduction stride applied to raw trajectories.
pub const DEFAULT_STRIDE: usize = 20;

/// Configuration for buffer sizing. Read-only once a generator is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferRules {
    /// Horizontal total system error margin in meters
    pub tse_h_m: f64,
    /// Vertical total system error margin in meters
    pub tse_v_m: f64,
    /// Horizontal-dominance ratio threshold
    pub alpha_h: f64,
    /// Vertical-dominance ratio threshold
    pub alpha_v: f64,
    /// Seconds added before and after each segment's time window
    pub time_buffer_s: f64,
}

impl Default for BufferRules {
    fn default() -> Self {
        Self {
            tse_h_m: 15.0,
            tse_v_m: 10.0,
            alpha_h: 7.0,
            alpha_v: 1.0,
            time_buffer_s: 5.0,
        }
    }
}
