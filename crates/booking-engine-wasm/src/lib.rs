//! WASM bindings for booking-engine.
//!
//! Exposes draft validation, conflict detection and slot suggestions to the
//! booking front-end via `wasm-bindgen`. Complex values cross the boundary as
//! JSON strings: drafts use the form's camelCase keys, bookings use the storage
//! row's snake_case keys, results come back camelCase.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::{bookings_from_json, AppointmentDraft, BusinessHours, ExistingBooking};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Inputs from JavaScript
// ---------------------------------------------------------------------------

/// A barbershop's configured hours, as stored on the shop record.
#[derive(Deserialize)]
struct HoursInput {
    opening_time: String,
    closing_time: String,
    #[serde(default)]
    slot_step_minutes: Option<u32>,
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_bookings(json: &str) -> Result<Vec<ExistingBooking>, JsValue> {
    bookings_from_json(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {}", e)))
}

/// Resolve optional shop hours JSON; absent means the default 08:00–19:00 window.
fn parse_hours(json: Option<&str>) -> Result<BusinessHours, JsValue> {
    let Some(json) = json else {
        return Ok(BusinessHours::default());
    };
    let input: HoursInput = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid hours JSON: {}", e)))?;

    let hours = BusinessHours::from_opening_times(&input.opening_time, &input.closing_time)
        .map_err(to_js)?;
    match input.slot_step_minutes {
        Some(step) => hours.with_step(step).map_err(to_js),
        None => Ok(hours),
    }
}

fn to_js(e: booking_engine::BookingError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Validate a (possibly partial) appointment draft.
///
/// `today` is the caller's local date (`YYYY-MM-DD`); the browser knows the
/// user's calendar day, the WASM module does not. Returns a JSON
/// `{isValid, errors: [{field, message}]}` string.
#[wasm_bindgen(js_name = "validateAppointment")]
pub fn validate_appointment(draft_json: &str, today: &str) -> Result<String, JsValue> {
    let draft = AppointmentDraft::from_json(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;
    let today = parse_date(today)?;

    to_json(&booking_engine::validate_at(&draft, today))
}

/// Check a candidate appointment against a professional's bookings for the day.
///
/// `bookings_json` is the storage rows for that professional and date.
/// `exclude_booking_id` names the booking being edited. `hours_json` is an
/// optional `{opening_time, closing_time, slot_step_minutes?}` object.
/// Returns a JSON `{hasConflict, conflictingAppointment?, suggestedSlots, warnings?}` string.
#[wasm_bindgen(js_name = "checkConflicts")]
pub fn check_conflicts(
    professional_id: &str,
    date: &str,
    start_time: &str,
    duration_minutes: u32,
    bookings_json: &str,
    exclude_booking_id: Option<String>,
    hours_json: Option<String>,
) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let bookings = parse_bookings(bookings_json)?;
    let hours = parse_hours(hours_json.as_deref())?;

    let result = booking_engine::check_conflicts_with_hours(
        professional_id,
        date,
        start_time,
        duration_minutes,
        &bookings,
        exclude_booking_id.as_deref(),
        &hours,
    )
    .map_err(to_js)?;

    to_json(&result)
}

/// Suggest up to five open start times near `preferred_time`.
///
/// Returns a JSON array of `HH:mm` strings, closest first.
#[wasm_bindgen(js_name = "findAvailableSlots")]
pub fn find_available_slots(
    bookings_json: &str,
    date: &str,
    duration_minutes: u32,
    preferred_time: &str,
    hours_json: Option<String>,
) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let bookings = parse_bookings(bookings_json)?;
    let hours = parse_hours(hours_json.as_deref())?;

    let slots = booking_engine::find_available_slots(
        &bookings,
        date,
        duration_minutes,
        preferred_time,
        &hours,
    )
    .map_err(to_js)?;

    to_json(&slots)
}

/// Validate a draft and, if well-formed, check it against the day's bookings.
///
/// Returns a JSON object tagged by `outcome`: `invalid` (validation fields),
/// `conflict` (conflict fields) or `available` (`warnings`).
#[wasm_bindgen(js_name = "reviewDraft")]
pub fn review_draft(
    draft_json: &str,
    bookings_json: &str,
    exclude_booking_id: Option<String>,
    today: &str,
    hours_json: Option<String>,
) -> Result<String, JsValue> {
    let draft = AppointmentDraft::from_json(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;
    let bookings = parse_bookings(bookings_json)?;
    let today = parse_date(today)?;
    let hours = parse_hours(hours_json.as_deref())?;

    let review = booking_engine::review_draft(
        &draft,
        &bookings,
        exclude_booking_id.as_deref(),
        today,
        &hours,
    )
    .map_err(to_js)?;

    to_json(&review)
}

/// Convert `HH:mm` (or `HH:mm:ss`) into minutes since midnight.
#[wasm_bindgen(js_name = "timeToMinutes")]
pub fn time_to_minutes(time: &str) -> Result<u32, JsValue> {
    booking_engine::time_to_minutes(time).map_err(to_js)
}

/// Format minutes since midnight as `HH:mm`. Rejects values of a day or more.
#[wasm_bindgen(js_name = "minutesToTime")]
pub fn minutes_to_time(minutes: u32) -> Result<String, JsValue> {
    booking_engine::checked_minutes_to_time(minutes).map_err(to_js)
}
