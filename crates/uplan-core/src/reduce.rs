//! Trajectory downsampling.

use crate::models::Waypoint;

/// Downsample a trajectory by a fixed stride.
///
/// Sequences of two or fewer samples are returned unchanged. Otherwise the
/// origin sample is dropped and every `stride`-th sample starting at index 1
/// is kept. The final sample of the input is always appended when striding
/// did not already land on it (compared by `time_s`). A stride of 0 is
/// treated as 1.
pub fn reduce_waypoints(waypoints: &[Waypoint], stride: usize) -> Vec<Waypoint> {
    if waypoints.len() <= 2 {
        return waypoints.to_vec();
    }
    let stride = stride.max(1);

    let mut reduced: Vec<Waypoint> = waypoints.iter().skip(1).step_by(stride).copied().collect();

    if let (Some(kept), Some(last)) = (reduced.last(), waypoints.last()) {
        if kept.time_s != last.time_s {
            reduced.push(*last);
        }
    }

    tracing::info!(
        "Reduced waypoints from {} to {} (stride={})",
        waypoints.len(),
        reduced.len(),
        stride
    );

    reduced
}
