//! Core data models for the volume pipeline.

use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::Serialize;

/// One sample of a recorded trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    /// Seconds since trajectory start
    pub time_s: f64,
    pub lat: f64,
    pub lon: f64,
    /// Height above ground level in meters
    pub height_m: f64,
}

impl Waypoint {
    pub fn new(time_s: f64, lat: f64, lon: f64, height_m: f64) -> Self {
        Self {
            time_s,
            lat,
            lon,
            height_m,
        }
    }
}

/// Axis-aligned bounds of a polygon as `[minLon, minLat, maxLon, maxLat]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Bounds over a set of `[lon, lat]` vertices.
    pub fn from_vertices(vertices: &[[f64; 2]]) -> Self {
        vertices.iter().fold(
            Self {
                min_lon: f64::MAX,
                min_lat: f64::MAX,
                max_lon: f64::MIN,
                max_lat: f64::MIN,
            },
            |bbox, [lon, lat]| Self {
                min_lon: bbox.min_lon.min(*lon),
                min_lat: bbox.min_lat.min(*lat),
                max_lon: bbox.max_lon.max(*lon),
                max_lat: bbox.max_lat.max(*lat),
            },
        )
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_array().serialize(serializer)
    }
}

/// Closed rectangular ring around a segment, vertices as `[lon, lat]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedPolygon {
    /// front-left, front-right, back-right, back-left, front-left
    pub ring: [[f64; 2]; 5],
    pub bbox: BoundingBox,
}

impl OrientedPolygon {
    /// Close the ring over four corners and derive its bounds.
    pub fn from_corners(corners: [[f64; 2]; 4]) -> Self {
        let bbox = BoundingBox::from_vertices(&corners);
        let [front_left, front_right, back_right, back_left] = corners;
        Self {
            ring: [front_left, front_right, back_right, back_left, front_left],
            bbox,
        }
    }

    /// The four distinct corners.
    pub fn corners(&self) -> &[[f64; 2]] {
        &self.ring[..4]
    }
}

#[derive(Serialize)]
struct PolygonGeometry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [&'a [[f64; 2]; 5]; 1],
    bbox: BoundingBox,
}

impl Serialize for OrientedPolygon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PolygonGeometry {
            kind: "Polygon",
            coordinates: [&self.ring],
            bbox: self.bbox,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AltitudeUnit {
    #[default]
    #[serde(rename = "M")]
    Meters,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AltitudeReference {
    /// Above ground level
    #[default]
    Agl,
}

/// An altitude limit of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Altitude {
    pub value: f64,
    pub uom: AltitudeUnit,
    pub reference: AltitudeReference,
}

impl Altitude {
    pub fn agl_m(value: f64) -> Self {
        Self {
            value,
            uom: AltitudeUnit::Meters,
            reference: AltitudeReference::Agl,
        }
    }
}

/// A 4-D operation volume covering one trajectory segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub geometry: OrientedPolygon,
    #[serde(serialize_with = "serialize_utc_secs")]
    pub time_begin: DateTime<Utc>,
    #[serde(serialize_with = "serialize_utc_secs")]
    pub time_end: DateTime<Utc>,
    pub min_altitude: Altitude,
    pub max_altitude: Altitude,
    /// Zero-based segment index
    pub ordinal: usize,
}

/// RFC 3339 with second precision and a `Z` suffix.
pub fn format_utc_secs(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn serialize_utc_secs<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_utc_secs(time))
}
