//! Oriented rectangular buffers around trajectory segments.

use crate::error::GeodesyError;
use crate::geodesy::Geodesy;
use crate::models::{OrientedPolygon, Waypoint};

/// Planar midpoint of a segment as `(lat, lon)`.
///
/// Arithmetic mean of the endpoint coordinates, not the geodesic midpoint.
pub fn segment_midpoint(wp1: &Waypoint, wp2: &Waypoint) -> (f64, f64) {
    ((wp1.lat + wp2.lat) / 2.0, (wp1.lon + wp2.lon) / 2.0)
}

/// Build a closed rectangle centred on `(mid_lat, mid_lon)` whose long axis
/// follows `bearing_deg`.
///
/// The front and back edge centres lie `along_track_m` ahead of and behind the
/// midpoint; each corner is a further `cross_track_m` to the left or right.
/// The ring is emitted as front-left, front-right, back-right, back-left and
/// closed on front-left.
pub fn oriented_rectangle<G: Geodesy>(
    geodesy: &G,
    mid_lat: f64,
    mid_lon: f64,
    bearing_deg: f64,
    along_track_m: f64,
    cross_track_m: f64,
) -> Result<OrientedPolygon, GeodesyError> {
    let left = bearing_deg - 90.0;
    let right = bearing_deg + 90.0;

    let (front_lat, front_lon) = geodesy.direct(mid_lat, mid_lon, bearing_deg, along_track_m)?;
    let (back_lat, back_lon) =
        geodesy.direct(mid_lat, mid_lon, bearing_deg + 180.0, along_track_m)?;

    let front_left = geodesy.direct(front_lat, front_lon, left, cross_track_m)?;
    let front_right = geodesy.direct(front_lat, front_lon, right, cross_track_m)?;
    let back_right = geodesy.direct(back_lat, back_lon, right, cross_track_m)?;
    let back_left = geodesy.direct(back_lat, back_lon, left, cross_track_m)?;

    Ok(OrientedPolygon::from_corners(
        [front_left, front_right, back_right, back_left].map(|(lat, lon)| [lon, lat]),
    ))
}
