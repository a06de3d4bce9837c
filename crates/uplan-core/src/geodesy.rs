//! Geodesic primitives used by the buffer builder.
//!
//! The pipeline only needs the two classic problems: the inverse solve
//! (distance and bearings between two points) and the direct solve (where a
//! bearing and distance lead from a point). Both are behind [`Geodesy`] so the
//! geometry can run against the WGS84 ellipsoid in production and a cheap
//! deterministic approximation in tests.

use geo::{Bearing, Destination, Distance, Geodesic, Point};

use crate::error::GeodesyError;

/// Result of an inverse geodesic solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    pub distance_m: f64,
    /// Initial bearing from point 1 to point 2, degrees clockwise from north
    pub bearing_deg: f64,
    /// Bearing from point 2 back to point 1
    pub reverse_bearing_deg: f64,
}

pub trait Geodesy {
    fn inverse(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64)
        -> Result<InverseSolution, GeodesyError>;

    /// Returns `(lat, lon)` of the destination in degrees.
    fn direct(
        &self,
        lat: f64,
        lon: f64,
        bearing_deg: f64,
        distance_m: f64,
    ) -> Result<(f64, f64), GeodesyError>;
}

/// Ellipsoidal solves on WGS84 (Karney's algorithm, via `geo`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84Geodesy;

impl Geodesy for Wgs84Geodesy {
    fn inverse(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<InverseSolution, GeodesyError> {
        check_coordinate(lat1, lon1)?;
        check_coordinate(lat2, lon2)?;

        let p1 = Point::new(lon1, lat1);
        let p2 = Point::new(lon2, lat2);
        let solution = InverseSolution {
            distance_m: Geodesic::distance(p1, p2),
            bearing_deg: normalize_bearing(Geodesic::bearing(p1, p2)),
            reverse_bearing_deg: normalize_bearing(Geodesic::bearing(p2, p1)),
        };

        if solution.distance_m.is_finite()
            && solution.bearing_deg.is_finite()
            && solution.reverse_bearing_deg.is_finite()
        {
            Ok(solution)
        } else {
            Err(GeodesyError::NonFiniteResult)
        }
    }

    fn direct(
        &self,
        lat: f64,
        lon: f64,
        bearing_deg: f64,
        distance_m: f64,
    ) -> Result<(f64, f64), GeodesyError> {
        check_coordinate(lat, lon)?;
        check_parameter("bearing", bearing_deg)?;
        check_parameter("distance", distance_m)?;

        let destination = Geodesic::destination(Point::new(lon, lat), bearing_deg, distance_m);
        finite_point(destination.y(), destination.x())
    }
}

/// Flat-earth approximation on a local tangent plane.
///
/// Uses latitude-aware meters-per-degree scaling around the mean latitude of
/// the points involved. Accurate to well under a meter for segments of a few
/// hundred meters away from the poles; it is NOT an ellipsoidal solution and
/// exists for deterministic tests and quick previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTangentGeodesy;

impl Geodesy for LocalTangentGeodesy {
    fn inverse(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<InverseSolution, GeodesyError> {
        check_coordinate(lat1, lon1)?;
        check_coordinate(lat2, lon2)?;

        let ref_lat = (lat1 + lat2) / 2.0;
        let east_m = lon_to_meters(lon2 - lon1, ref_lat);
        let north_m = lat_to_meters(lat2 - lat1, ref_lat);

        let bearing_deg = normalize_bearing(east_m.atan2(north_m).to_degrees());
        Ok(InverseSolution {
            distance_m: east_m.hypot(north_m),
            bearing_deg,
            reverse_bearing_deg: normalize_bearing(bearing_deg + 180.0),
        })
    }

    fn direct(
        &self,
        lat: f64,
        lon: f64,
        bearing_deg: f64,
        distance_m: f64,
    ) -> Result<(f64, f64), GeodesyError> {
        check_coordinate(lat, lon)?;
        check_parameter("bearing", bearing_deg)?;
        check_parameter("distance", distance_m)?;

        let bearing_rad = bearing_deg.to_radians();
        let north_m = distance_m * bearing_rad.cos();
        let east_m = distance_m * bearing_rad.sin();
        finite_point(
            lat + meters_to_lat(north_m, lat),
            lon + meters_to_lon(east_m, lat),
        )
    }
}

/// Normalize a bearing into `[0, 360)`.
pub fn normalize_bearing(bearing_deg: f64) -> f64 {
    let normalized = bearing_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Meters per degree of latitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lat(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * lat_rad).cos() + 1.175 * (4.0 * lat_rad).cos()
        - 0.0023 * (6.0 * lat_rad).cos()
}

/// Meters per degree of longitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lon(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_412.84 * lat_rad.cos() - 93.5 * (3.0 * lat_rad).cos() + 0.118 * (5.0 * lat_rad).cos()
}

/// Convert a north/south offset in meters to degrees latitude.
pub fn meters_to_lat(meters: f64, ref_lat_deg: f64) -> f64 {
    meters / meters_per_deg_lat(ref_lat_deg).max(1e-9)
}

/// Convert an east/west offset in meters to degrees longitude.
pub fn meters_to_lon(meters: f64, ref_lat_deg: f64) -> f64 {
    meters / meters_per_deg_lon(ref_lat_deg).max(1e-9)
}

pub fn lat_to_meters(deg: f64, ref_lat_deg: f64) -> f64 {
    deg * meters_per_deg_lat(ref_lat_deg)
}

pub fn lon_to_meters(deg: f64, ref_lat_deg: f64) -> f64 {
    deg * meters_per_deg_lon(ref_lat_deg)
}

fn check_coordinate(lat: f64, lon: f64) -> Result<(), GeodesyError> {
    if lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 {
        Ok(())
    } else {
        Err(GeodesyError::InvalidCoordinate { lat, lon })
    }
}

fn check_parameter(name: &'static str, value: f64) -> Result<(), GeodesyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeodesyError::InvalidParameter { name, value })
    }
}

fn finite_point(lat: f64, lon: f64) -> Result<(f64, f64), GeodesyError> {
    if lat.is_finite() && lon.is_finite() {
        Ok((lat, lon))
    } else {
        Err(GeodesyError::NonFiniteResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_one_degree_of_latitude_at_equator() {
        let solution = Wgs84Geodesy.inverse(0.0, 0.0, 1.0, 0.0).unwrap();
        // 110_574 m on the ellipsoid, vs 111_195 m on a sphere
        assert!((solution.distance_m - 110_574.0).abs() < 2.0);
        let off_north = solution.bearing_deg.min(360.0 - solution.bearing_deg);
        assert!(off_north < 1e-9);
        assert!((solution.reverse_bearing_deg - 180.0).abs() < 1e-9);
    }

    #[test]
    fn wgs84_direct_inverts_inverse() {
        let geodesy = Wgs84Geodesy;
        let (lat, lon) = geodesy.direct(40.0, -3.0, 63.0, 250.0).unwrap();
        let back = geodesy.inverse(40.0, -3.0, lat, lon).unwrap();
        assert!((back.distance_m - 250.0).abs() < 1e-6);
        assert!((back.bearing_deg - 63.0).abs() < 1e-6);
    }

    #[test]
    fn wgs84_rejects_invalid_latitude() {
        let err = Wgs84Geodesy.inverse(91.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, GeodesyError::InvalidCoordinate { .. }));
        let err = Wgs84Geodesy.direct(0.0, f64::NAN, 0.0, 10.0).unwrap_err();
        assert!(matches!(err, GeodesyError::InvalidCoordinate { .. }));
        let err = Wgs84Geodesy.direct(0.0, 0.0, 0.0, f64::INFINITY).unwrap_err();
        assert!(matches!(err, GeodesyError::InvalidParameter { name: "distance", .. }));
    }

    #[test]
    fn local_tangent_matches_wgs84_on_short_segments() {
        let (lat2, lon2) = (40.0009, -2.9988);
        let flat = LocalTangentGeodesy.inverse(40.0, -3.0, lat2, lon2).unwrap();
        let ellipsoid = Wgs84Geodesy.inverse(40.0, -3.0, lat2, lon2).unwrap();
        assert!((flat.distance_m - ellipsoid.distance_m).abs() < 0.5);
        assert!((flat.bearing_deg - ellipsoid.bearing_deg).abs() < 0.1);
    }

    #[test]
    fn local_tangent_cardinal_bearings() {
        let geodesy = LocalTangentGeodesy;
        let east = geodesy.inverse(10.0, 10.0, 10.0, 10.001).unwrap();
        assert!((east.bearing_deg - 90.0).abs() < 1e-9);
        assert!((east.reverse_bearing_deg - 270.0).abs() < 1e-9);

        let (lat, lon) = geodesy.direct(10.0, 10.0, 180.0, 100.0).unwrap();
        assert!(lat < 10.0);
        assert!((lon - 10.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_bearing_wraps_into_range() {
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(450.0), 90.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
    }
}
