//! Per-segment classification and buffer sizing.

use serde::Serialize;

use crate::rules::BufferRules;

/// Which extent dominates a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentClass {
    /// Cruise: mostly horizontal travel
    Horizontal,
    /// Climb or descent with little horizontal travel
    Vertical,
    /// Both extents matter
    Mixed,
}

/// Half-extents of the buffer around a segment midpoint, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferSize {
    pub along_track_m: f64,
    pub cross_track_m: f64,
    pub vertical_m: f64,
}

/// Classify a segment from its horizontal and vertical extents.
///
/// Both comparisons are strict, so exact ties fall through to `Mixed`.
pub fn classify_segment(
    horizontal_distance_m: f64,
    vertical_distance_m: f64,
    rules: &BufferRules,
) -> SegmentClass {
    if horizontal_distance_m > rules.alpha_h * vertical_distance_m {
        SegmentClass::Horizontal
    } else if vertical_distance_m > rules.alpha_v * horizontal_distance_m {
        SegmentClass::Vertical
    } else {
        SegmentClass::Mixed
    }
}

impl SegmentClass {
    pub fn buffer_size(
        self,
        horizontal_distance_m: f64,
        vertical_distance_m: f64,
        rules: &BufferRules,
    ) -> BufferSize {
        let stretched_along = horizontal_distance_m / 2.0 + rules.tse_h_m;
        let stretched_vertical = vertical_distance_m / 2.0 + rules.tse_v_m;

        match self {
            SegmentClass::Horizontal => BufferSize {
                along_track_m: stretched_along,
                cross_track_m: rules.tse_h_m,
                vertical_m: rules.tse_v_m,
            },
            SegmentClass::Vertical => BufferSize {
                along_track_m: rules.tse_h_m,
                cross_track_m: rules.tse_h_m,
                vertical_m: stretched_vertical,
            },
            SegmentClass::Mixed => BufferSize {
                along_track_m: stretched_along,
                cross_track_m: rules.tse_h_m,
                vertical_m: stretched_vertical,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cruise_segment_is_horizontal() {
        let rules = BufferRules::default();
        let class = classify_segment(100.0, 5.0, &rules);
        assert_eq!(class, SegmentClass::Horizontal);

        let size = class.buffer_size(100.0, 5.0, &rules);
        assert_eq!(size.along_track_m, 65.0);
        assert_eq!(size.cross_track_m, 15.0);
        assert_eq!(size.vertical_m, 10.0);
    }

    #[test]
    fn climb_segment_is_vertical() {
        let rules = BufferRules::default();
        let class = classify_segment(11.1, 50.0, &rules);
        assert_eq!(class, SegmentClass::Vertical);

        let size = class.buffer_size(11.1, 50.0, &rules);
        assert_eq!(size.along_track_m, 15.0);
        assert_eq!(size.cross_track_m, 15.0);
        assert_eq!(size.vertical_m, 35.0);
    }

    #[test]
    fn shallow_climb_is_mixed() {
        let rules = BufferRules::default();
        // 40 m horizontal is not > 7 * 10, and 10 m vertical is not > 40
        let class = classify_segment(40.0, 10.0, &rules);
        assert_eq!(class, SegmentClass::Mixed);

        let size = class.buffer_size(40.0, 10.0, &rules);
        assert_eq!(size.along_track_m, 35.0);
        assert_eq!(size.cross_track_m, 15.0);
        assert_eq!(size.vertical_m, 15.0);
    }

    #[test]
    fn exact_ties_resolve_to_mixed() {
        let rules = BufferRules::default();
        assert_eq!(classify_segment(70.0, 10.0, &rules), SegmentClass::Mixed);
        assert_eq!(classify_segment(20.0, 20.0, &rules), SegmentClass::Mixed);
        assert_eq!(classify_segment(0.0, 0.0, &rules), SegmentClass::Mixed);
    }
}
