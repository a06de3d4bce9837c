//! Flight plan (U-plan) document model.
//!
//! Only `operationVolumes`, the takeoff/landing points and the UAS
//! performance figures carry trajectory-derived data. Everything else is a
//! placeholder the operator fills in before submission.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uplan_core::{format_utc_secs, AltitudeReference, Volume, Waypoint};

use crate::catalog::TrajectoryInfo;

const TBD: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataIdentifier {
    pub sac: String,
    pub sic: String,
}

impl Default for DataIdentifier {
    fn default() -> Self {
        Self {
            sac: TBD.to_string(),
            sic: TBD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            first_name: TBD.to_string(),
            last_name: TBD.to_string(),
            phones: vec![TBD.to_string()],
            emails: vec!["tbd@example.com".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightMode {
    /// Visual line of sight
    Vlos,
    /// Beyond visual line of sight
    Bvlos,
}

impl FlightMode {
    /// SAIL categories fly beyond visual line of sight.
    pub fn for_category(category: &str) -> Self {
        if category.contains("SAIL") {
            FlightMode::Bvlos
        } else {
            FlightMode::Vlos
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    pub mode: FlightMode,
    pub category: String,
    pub special_operation: String,
    pub private_flight: bool,
}

impl FlightDetails {
    pub fn new(category: &str) -> Self {
        Self {
            mode: FlightMode::for_category(category),
            category: category.to_string(),
            special_operation: String::new(),
            private_flight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightCharacteristics {
    #[serde(rename = "uasMTOM")]
    pub uas_mtom: f64,
    #[serde(rename = "uasMaxSpeed")]
    pub uas_max_speed: f64,
    #[serde(rename = "Connectivity")]
    pub connectivity: String,
    #[serde(rename = "idTechnology")]
    pub id_technology: String,
    #[serde(rename = "maxFlightTime")]
    pub max_flight_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralCharacteristics {
    pub brand: String,
    pub model: String,
    pub type_certificate: String,
    pub uas_type: String,
    pub uas_class: String,
    pub uas_dimension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Uas {
    pub registration_number: String,
    pub serial_number: String,
    pub flight_characteristics: FlightCharacteristics,
    pub general_characteristics: GeneralCharacteristics,
}

impl Uas {
    pub fn new(uas_type: &str, mtom_kg: f64, v_max_mps: f64) -> Self {
        Self {
            registration_number: TBD.to_string(),
            serial_number: TBD.to_string(),
            flight_characteristics: FlightCharacteristics {
                uas_mtom: mtom_kg,
                uas_max_speed: v_max_mps,
                connectivity: "LTE".to_string(),
                id_technology: "NRID".to_string(),
                max_flight_time: 0,
            },
            general_characteristics: GeneralCharacteristics {
                brand: TBD.to_string(),
                model: TBD.to_string(),
                type_certificate: TBD.to_string(),
                uas_type: uas_type.to_string(),
                uas_class: "NONE".to_string(),
                uas_dimension: "LT_1".to_string(),
            },
        }
    }
}

/// GeoJSON-style point with an AGL altitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
    pub reference: AltitudeReference,
    pub altitude: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64, altitude_m: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [lon, lat],
            reference: AltitudeReference::Agl,
            altitude: altitude_m,
        }
    }

    pub fn from_waypoint(waypoint: &Waypoint) -> Self {
        Self::new(waypoint.lat, waypoint.lon, waypoint.height_m)
    }

    /// Placeholder for locations not known at generation time.
    pub fn unknown() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanState {
    Sent,
}

/// Complete U-plan document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UplanDocument {
    pub idplan: u32,
    pub nameplan: String,
    pub data_owner_identifier: DataIdentifier,
    pub data_source_identifier: DataIdentifier,
    pub contact_details: ContactDetails,
    pub flight_details: FlightDetails,
    pub uas: Uas,
    pub takeoff_location: Location,
    pub landing_location: Location,
    pub gcs_location: Location,
    pub operation_volumes: Vec<Volume>,
    pub operator_id: String,
    pub state: PlanState,
    pub creation_time: String,
    pub update_time: String,
}

impl UplanDocument {
    /// Wrap generated volumes into a plan document.
    ///
    /// `trajectory` is the original, unreduced trajectory; its first and last
    /// samples become the takeoff and landing locations. Returns `None` when
    /// the trajectory is empty.
    pub fn new(
        info: &TrajectoryInfo,
        trajectory: &[Waypoint],
        operation_volumes: Vec<Volume>,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        let takeoff = trajectory.first()?;
        let landing = trajectory.last()?;
        let performance = info.performance();
        let timestamp = format_utc_secs(&created_at);

        Some(Self {
            idplan: info.flight_id,
            nameplan: info.file_name.clone(),
            data_owner_identifier: DataIdentifier::default(),
            data_source_identifier: DataIdentifier::default(),
            contact_details: ContactDetails::default(),
            flight_details: FlightDetails::new(info.category_schema()),
            uas: Uas::new(
                info.aircraft_type_schema(),
                performance.mtom_kg,
                performance.v_max_mps,
            ),
            takeoff_location: Location::from_waypoint(takeoff),
            landing_location: Location::from_waypoint(landing),
            gcs_location: Location::unknown(),
            operation_volumes,
            operator_id: TBD.to_string(),
            state: PlanState::Sent,
            creation_time: timestamp.clone(),
            update_time: timestamp,
        })
    }

    /// Serialize with four-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_trajectory_filename;
    use uplan_core::{BufferRules, LocalTangentGeodesy, VolumeGenerator};

    fn trajectory() -> Vec<Waypoint> {
        vec![
            Waypoint::new(0.0, 38.5386, -0.1310, 0.0),
            Waypoint::new(10.0, 38.5387, -0.1310, 40.0),
            Waypoint::new(30.0, 38.5387, -0.1300, 40.0),
            Waypoint::new(40.0, 38.5387, -0.1300, 0.0),
        ]
    }

    fn document() -> UplanDocument {
        let info = parse_trajectory_filename("Specific SAIL I-II FW_0310_Fijo.csv");
        let start = DateTime::from_timestamp(1_756_717_200, 0).unwrap();
        let volumes = VolumeGenerator::with_geodesy(BufferRules::default(), LocalTangentGeodesy)
            .generate(&trajectory(), start)
            .unwrap();
        UplanDocument::new(&info, &trajectory(), volumes, start).unwrap()
    }

    #[test]
    fn document_has_schema_field_names() {
        let json = serde_json::to_value(document()).unwrap();
        assert_eq!(json["idplan"], 310);
        assert_eq!(json["nameplan"], "Specific SAIL I-II FW_0310_Fijo.csv");
        assert_eq!(json["dataOwnerIdentifier"]["sac"], "TBD");
        assert_eq!(json["contactDetails"]["emails"][0], "tbd@example.com");
        assert_eq!(json["flightDetails"]["mode"], "BVLOS");
        assert_eq!(json["flightDetails"]["category"], "SAIL_I-II");
        assert_eq!(json["flightDetails"]["privateFlight"], false);
        assert_eq!(json["uas"]["flightCharacteristics"]["uasMTOM"], 40.0);
        assert_eq!(json["uas"]["flightCharacteristics"]["uasMaxSpeed"], 30.0);
        assert_eq!(json["uas"]["flightCharacteristics"]["Connectivity"], "LTE");
        assert_eq!(json["uas"]["generalCharacteristics"]["uasType"], "FIXED_WING");
        assert_eq!(json["gcsLocation"]["coordinates"][0], 0.0);
        assert_eq!(json["operatorId"], "TBD");
        assert_eq!(json["state"], "SENT");
        assert_eq!(json["creationTime"], "2025-09-01T09:00:00Z");
        assert_eq!(json["operationVolumes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn takeoff_and_landing_come_from_trajectory_ends() {
        let json = serde_json::to_value(document()).unwrap();
        assert_eq!(json["takeoffLocation"]["type"], "Point");
        assert_eq!(json["takeoffLocation"]["coordinates"][0], -0.1310);
        assert_eq!(json["takeoffLocation"]["coordinates"][1], 38.5386);
        assert_eq!(json["takeoffLocation"]["reference"], "AGL");
        assert_eq!(json["landingLocation"]["coordinates"][0], -0.1300);
        assert_eq!(json["landingLocation"]["altitude"], 0.0);
    }

    #[test]
    fn open_category_flies_vlos() {
        assert_eq!(FlightMode::for_category("OPENA2"), FlightMode::Vlos);
        assert_eq!(FlightMode::for_category("SAIL_III-IV"), FlightMode::Bvlos);
    }

    #[test]
    fn empty_trajectory_has_no_document() {
        let info = parse_trajectory_filename("Open A1 MR_0001_Scan.csv");
        assert!(UplanDocument::new(&info, &[], Vec::new(), Utc::now()).is_none());
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let bytes = document().to_json_pretty().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\n    \"idplan\": 310,"));
    }
}
