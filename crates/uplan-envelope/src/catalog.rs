//! Trajectory file naming conventions and UAS reference data.
//!
//! Trajectory files are named like `Open A2 MR_0021_Scan.csv`: operation
//! category and aircraft code before the first underscore, then a numeric
//! flight id, then a free-form mission label.

use serde::Serialize;

/// Information parsed from a trajectory file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrajectoryInfo {
    /// e.g. "Open A1", "Specific SAIL I-II", "PDRA_STS"
    pub category: String,
    /// "MR" (multirotor) or "FW" (fixed wing)
    pub aircraft_code: String,
    pub flight_id: u32,
    /// Full file name, used as the plan name
    pub file_name: String,
}

/// Performance limits of an aircraft class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UasPerformance {
    pub v_max_mps: f64,
    pub mtom_kg: f64,
}

const PDRA_STS: &str = "PDRA_STS";

/// `(category, aircraft code)` -> performance.
const UAS_PERFORMANCE: &[(&str, &str, UasPerformance)] = &[
    ("Open A1", "MR", UasPerformance { v_max_mps: 13.0, mtom_kg: 0.25 }),
    ("Open A1", "FW", UasPerformance { v_max_mps: 20.0, mtom_kg: 1.00 }),
    ("Open A2", "MR", UasPerformance { v_max_mps: 20.0, mtom_kg: 1.10 }),
    ("Open A2", "FW", UasPerformance { v_max_mps: 22.0, mtom_kg: 2.00 }),
    ("Open A3", "MR", UasPerformance { v_max_mps: 21.0, mtom_kg: 1.43 }),
    ("Open A3", "FW", UasPerformance { v_max_mps: 25.0, mtom_kg: 3.50 }),
    ("PDRA_STS", "MR", UasPerformance { v_max_mps: 23.0, mtom_kg: 4.69 }),
    ("PDRA_STS", "FW", UasPerformance { v_max_mps: 28.0, mtom_kg: 6.00 }),
    ("Specific SAIL I-II", "MR", UasPerformance { v_max_mps: 19.0, mtom_kg: 25.00 }),
    ("Specific SAIL I-II", "FW", UasPerformance { v_max_mps: 30.0, mtom_kg: 40.00 }),
    ("Specific SAIL III-IV", "MR", UasPerformance { v_max_mps: 19.0, mtom_kg: 25.00 }),
    ("Specific SAIL III-IV", "FW", UasPerformance { v_max_mps: 30.0, mtom_kg: 40.00 }),
];

/// Parse a trajectory file name. Unrecognized parts are left empty (or 0 for
/// the flight id).
pub fn parse_trajectory_filename(file_name: &str) -> TrajectoryInfo {
    let (mut category, mut aircraft_code) = match file_name.split_once('_') {
        Some((prefix, _)) => match prefix.rsplit_once(' ') {
            Some((category, code)) => (category.to_string(), code.to_string()),
            None => (prefix.to_string(), String::new()),
        },
        None => (String::new(), String::new()),
    };

    // "PDRA_STS FW_..." has an underscore inside the category itself
    if file_name.contains(PDRA_STS) {
        category = PDRA_STS.to_string();
        if let Some(pos) = file_name.find("PDRA_STS ") {
            let rest = &file_name[pos + PDRA_STS.len() + 1..];
            if let Some((code, _)) = rest.split_once('_') {
                aircraft_code = code.to_string();
            }
        }
    }

    TrajectoryInfo {
        category,
        aircraft_code,
        flight_id: parse_flight_id(file_name),
        file_name: file_name.to_string(),
    }
}

/// First all-digit token enclosed by underscores.
fn parse_flight_id(file_name: &str) -> u32 {
    let tokens: Vec<&str> = file_name.split('_').collect();
    // the last piece is not followed by an underscore
    let enclosed = tokens.len().saturating_sub(1);
    tokens
        .iter()
        .take(enclosed)
        .skip(1)
        .find(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// Map a file-name category to the plan schema's category code.
pub fn category_schema(category: &str) -> &'static str {
    match category {
        "Open A1" => "OPENA1",
        "Open A2" => "OPENA2",
        "Open A3" => "OPENA3",
        "Specific SAIL I-II" => "SAIL_I-II",
        "Specific SAIL III-IV" => "SAIL_III-IV",
        "Specific SAIL V-VI" => "SAIL_V-VI",
        PDRA_STS => "SAIL_I-II",
        _ => "OPENA1",
    }
}

/// Map an aircraft code to the plan schema's UAS type.
pub fn aircraft_type_schema(code: &str) -> &'static str {
    match code {
        "MR" => "MULTIROTOR",
        "FW" => "FIXED_WING",
        _ => "NONE_NOT_DECLARED",
    }
}

/// Look up performance data; unknown combinations yield zeros.
pub fn uas_performance(category: &str, aircraft_code: &str) -> UasPerformance {
    UAS_PERFORMANCE
        .iter()
        .find(|(cat, code, _)| *cat == category && *code == aircraft_code)
        .map(|(_, _, performance)| *performance)
        .unwrap_or_default()
}

impl TrajectoryInfo {
    pub fn category_schema(&self) -> &'static str {
        category_schema(&self.category)
    }

    pub fn aircraft_type_schema(&self) -> &'static str {
        aircraft_type_schema(&self.aircraft_code)
    }

    pub fn performance(&self) -> UasPerformance {
        uas_performance(&self.category, &self.aircraft_code)
    }
}
