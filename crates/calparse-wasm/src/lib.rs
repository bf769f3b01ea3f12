//! WASM bindings for calparse.
//!
//! Exposes property-line, duration and date-time parsing to JavaScript via
//! `wasm-bindgen`. Structured results cross the boundary as JSON strings;
//! parse failures are thrown as JS errors carrying the error message.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p calparse-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/calparse-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/calparse_wasm.wasm
//! ```

use calparse::{DstPolicy, Duration, IanaResolver, TimeParser};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Duration as handed to JavaScript: the parsed components plus the signed
/// length in seconds, which is what alarm scheduling needs.
#[derive(Serialize)]
struct DurationDto {
    #[serde(flatten)]
    duration: Duration,
    total_seconds: i64,
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Parse one property line.
///
/// Returns a JSON string `{name, params, value}` where `value` is a string,
/// or an array of `{name, value}` pairs for structured values like `RRULE`.
#[wasm_bindgen(js_name = "parseProperty")]
pub fn parse_property(line: &str) -> Result<String, JsValue> {
    let record = calparse::parse_property(line).map_err(to_js_error)?;
    to_json(&record)
}

/// Unfold and parse an iCalendar document.
///
/// Returns a JSON array of property records in document order.
#[wasm_bindgen(js_name = "parseDocument")]
pub fn parse_document(text: &str) -> Result<String, JsValue> {
    let records = calparse::parse_document(text).map_err(to_js_error)?;
    to_json(&records)
}

/// Parse a duration literal such as `-PT15M`.
///
/// Returns a JSON object with `positive`, the present components among
/// `week`/`day`/`hour`/`minute`/`second`, and `total_seconds`.
#[wasm_bindgen(js_name = "parseDuration")]
pub fn parse_duration(literal: &str) -> Result<String, JsValue> {
    let duration = calparse::parse_duration(literal).map_err(to_js_error)?;
    to_json(&DurationDto {
        duration,
        total_seconds: duration.total_seconds(),
    })
}

/// Parse a date-time literal and return the instant as epoch milliseconds,
/// ready for `new Date(ms)`.
///
/// `timezone` is an IANA identifier used when the literal has no trailing `Z`.
/// With `reject_dst_ambiguity`, readings inside DST gaps or folds throw.
#[wasm_bindgen(js_name = "parseTime")]
pub fn parse_time(
    literal: &str,
    timezone: &str,
    reject_dst_ambiguity: Option<bool>,
) -> Result<f64, JsValue> {
    let policy = if reject_dst_ambiguity.unwrap_or(false) {
        DstPolicy::Reject
    } else {
        DstPolicy::ShiftForward
    };
    let instant = TimeParser::new(IanaResolver::with_policy(policy))
        .parse(literal, timezone)
        .map_err(to_js_error)?;
    Ok(instant.timestamp_millis() as f64)
}
