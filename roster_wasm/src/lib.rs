use roster_core::domain::{DoctorRow, RosterConfig};
use roster_core::generate_from_rows;
use wasm_bindgen::prelude::*;

/// Builds a duty roster from JSON doctor rows.
///
/// Input: a JSON array of objects with `Doctor` and optional
/// `Unavailability` fields. Output: the roster as JSON, or an error
/// message string.
#[wasm_bindgen]
pub fn roster_from_json(doctors_json: &str, year: i32, month: u32) -> String {
    let rows: Vec<DoctorRow> = match serde_json::from_str(doctors_json) {
        Ok(rows) => rows,
        Err(err) => {
            return format!("Error parsing JSON: {}", err);
        }
    };

    let config = RosterConfig::for_month(year, month);

    match generate_from_rows(&rows, &config) {
        Ok(run) => match serde_json::to_string(&run.roster) {
            Ok(json) => json,
            Err(err) => format!("Error serializing roster: {}", err),
        },
        Err(err) => format!("Infeasible or error: {}", err),
    }
}
