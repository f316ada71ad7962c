//! WASM bindings for overlap-engine.
//!
//! Exposes availability expansion and common-range reduction to JavaScript via
//! `wasm-bindgen`. All complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlap-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/overlap-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/overlap_engine_wasm.wasm
//! ```

use overlap_engine::record::parse_records_json;
use overlap_engine::{
    AggregateOptions, AvailabilityRecord, DayPresenceMap, PersonId, ProcessingOrder,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

fn parse_records(json: &str) -> Result<Vec<AvailabilityRecord>, String> {
    parse_records_json(json).map_err(|e| format!("Invalid records JSON: {}", e))
}

fn parse_presence(json: &str) -> Result<DayPresenceMap, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid presence JSON: {}", e))
}

fn parse_people(json: &str) -> Result<Vec<PersonId>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid people JSON: {}", e))
}

/// `"created"` (default when empty) or `"supplied"`.
fn parse_order(order: Option<&str>) -> Result<ProcessingOrder, String> {
    match order.map(str::trim) {
        None | Some("") | Some("created") => Ok(ProcessingOrder::CreatedAscending),
        Some("supplied") => Ok(ProcessingOrder::AsSupplied),
        Some(other) => Err(format!(
            "Unknown order: '{}'. Expected 'created' or 'supplied'",
            other
        )),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn expand_json(records_json: &str) -> Result<String, String> {
    let records = parse_records(records_json)?;
    to_json(&overlap_engine::expand(&records))
}

fn reduce_json(presence_json: &str, people_json: &str) -> Result<String, String> {
    let presence = parse_presence(presence_json)?;
    let people = parse_people(people_json)?;
    to_json(&overlap_engine::reduce_to_common_ranges(&presence, &people))
}

/// An absent or blank roster means "everyone with a record".
fn parse_roster(roster_json: Option<&str>) -> Result<Option<Vec<PersonId>>, String> {
    match roster_json.map(str::trim) {
        None | Some("") => Ok(None),
        Some(json) => parse_people(json).map(Some),
    }
}

fn common_json(
    records_json: &str,
    order: Option<&str>,
    roster_json: Option<&str>,
) -> Result<String, String> {
    let records = parse_records(records_json)?;
    let options = AggregateOptions {
        order: parse_order(order)?,
        roster: parse_roster(roster_json)?,
    };
    to_json(&overlap_engine::compute_common_availability(&records, &options))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand a JSON array of availability records into a presence map.
///
/// Each record is `{id, person_id (or name), start_date, end_date, is_available,
/// created_at}` with `YYYY-MM-DD` dates. Records are applied in array order.
/// Returns a JSON object `{"YYYY-MM-DD": ["person", ...]}`.
#[wasm_bindgen(js_name = "expandAvailability")]
pub fn expand_availability(records_json: &str) -> Result<String, JsValue> {
    expand_json(records_json).map_err(|e| JsValue::from_str(&e))
}

/// Reduce a presence map (as produced by `expandAvailability`) against a JSON
/// array of person ids. Returns a JSON array of `{start_date, end_date}`.
#[wasm_bindgen(js_name = "reduceToCommonRanges")]
pub fn reduce_to_common_ranges(presence_json: &str, people_json: &str) -> Result<String, JsValue> {
    reduce_json(presence_json, people_json).map_err(|e| JsValue::from_str(&e))
}

/// Full aggregation over a JSON array of records.
///
/// `order` is `"created"` (newest record wins, the default) or `"supplied"`.
/// `roster_json` is an optional JSON array of person ids to intersect; people
/// outside it are ignored. Returns `{participants, ranges, days}` as JSON.
#[wasm_bindgen(js_name = "commonAvailability")]
pub fn common_availability(
    records_json: &str,
    order: Option<String>,
    roster_json: Option<String>,
) -> Result<String, JsValue> {
    common_json(records_json, order.as_deref(), roster_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}
