//! WASM bindings for slotwise.
//!
//! Exposes slot resolution, the per-day availability predicate, and the
//! calendar-range helper to JavaScript via `wasm-bindgen`, so the public
//! booking page runs the exact same availability logic the backend does.
//! Complex values cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slotwise-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slotwise-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slotwise_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use slotwise::types::{format_time, Schedule};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse boundary strings into chrono types
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    slotwise::types::parse_date(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Accepts both `"YYYY-MM-DD HH:MM"` and `"YYYY-MM-DDTHH:MM"`, matching what
/// a date-picker plus `Date#toISOString` slicing produces in the browser.
fn parse_datetime(s: &str) -> Result<NaiveDateTime, JsValue> {
    slotwise::types::parse_datetime(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_schedule(json: &str) -> Result<Schedule, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve the offerable start times for a date.
///
/// `schedule_json` is the business's schedule document (rules, blocked
/// periods, bookings, buffer). Returns a JSON array of `"HH:MM"` strings,
/// ascending. An empty schedule document falls back to the fixed preview
/// slot list.
///
/// # Arguments
/// - `schedule_json` -- schedule document as JSON
/// - `date` -- target date, `"YYYY-MM-DD"`
/// - `now` -- current wall-clock instant, `"YYYY-MM-DD HH:MM"`
#[wasm_bindgen(js_name = "resolveSlots")]
pub fn resolve_slots(schedule_json: &str, date: &str, now: &str) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let date = parse_date(date)?;
    let now = parse_datetime(now)?;

    let labels: Vec<String> = slotwise::resolve_slots(date, now, &schedule)
        .into_iter()
        .map(format_time)
        .collect();
    to_json(&labels)
}

/// Resolve the fixed preview slot list (no business context), filtered only
/// by the past-date guard and the same-day lead-time cutoff.
#[wasm_bindgen(js_name = "resolveDefaultSlots")]
pub fn resolve_default_slots(date: &str, now: &str) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let now = parse_datetime(now)?;

    let labels: Vec<String> = slotwise::resolve_default_slots(date, now)
        .into_iter()
        .map(format_time)
        .collect();
    to_json(&labels)
}

/// Cheap per-day availability check, used to grey out calendar days.
///
/// `false` guarantees [`resolveSlots`] would return an empty list; `true`
/// does not guarantee the opposite (the day may be fully booked).
#[wasm_bindgen(js_name = "isDateAvailable")]
pub fn is_date_available(schedule_json: &str, date: &str, today: &str) -> Result<bool, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let date = parse_date(date)?;
    let today = parse_date(today)?;

    Ok(slotwise::is_date_available(
        date,
        today,
        &schedule.rules,
        &schedule.blocked_periods,
    ))
}

/// List the available dates in `[from, to]` (inclusive), as a JSON array of
/// `"YYYY-MM-DD"` strings. One month at a time is the expected call pattern.
#[wasm_bindgen(js_name = "availableDays")]
pub fn available_days(
    schedule_json: &str,
    from: &str,
    to: &str,
    today: &str,
) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let from = parse_date(from)?;
    let to = parse_date(to)?;
    let today = parse_date(today)?;

    let labels: Vec<String> = slotwise::available_days(&schedule, from, to, today)
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    to_json(&labels)
}
