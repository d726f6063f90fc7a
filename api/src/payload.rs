//! Provider payload traversal. The raw document stays a `serde_json::Value`
//! and fields are pulled out by dotted path ("teams.home.name").

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Envelope key the backend proxy wraps result lists in.
pub const ENVELOPE_KEY: &str = "response";

// ---------------------------------------------------------------------------
// Typed wire shapes
// ---------------------------------------------------------------------------

/// `GET /sports` on the backend proxy.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SportsListResponse {
    #[serde(default)]
    pub sports: Vec<String>,
}

// ---------------------------------------------------------------------------
// Untyped traversal
// ---------------------------------------------------------------------------

/// The result list under the envelope key. Anything other than an array
/// (missing key, null, object, non-object payload) yields an empty slice.
pub fn response_list(raw: &Value) -> &[Value] {
    raw.get(ENVELOPE_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Follow a dotted path through nested objects. `null` counts as absent.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |node, key| node.get(key))
        .filter(|v| !v.is_null())
}

/// First candidate path holding a non-blank string or a number.
pub fn first_text(value: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| match lookup(value, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First candidate path holding a non-negative whole number. Zero is a value,
/// not an absence. Numeric strings ("3") are accepted.
pub fn first_count(value: &Value, paths: &[&str]) -> Option<u32> {
    paths.iter().find_map(|path| as_count(lookup(value, path)?))
}

fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// First candidate path holding a whole number, negatives included (points
/// deductions, goal difference). Same zero and numeric-string rules as
/// [`first_count`].
pub fn first_int(value: &Value, paths: &[&str]) -> Option<i32> {
    paths.iter().find_map(|path| as_int(lookup(value, path)?))
}

fn as_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// First candidate path holding a parseable date: RFC 3339, a bare
/// `YYYY-MM-DD`, or unix seconds.
pub fn first_date(value: &Value, paths: &[&str]) -> Option<DateTime<Utc>> {
    paths.iter().find_map(|path| as_date(lookup(value, path)?))
}

fn as_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            }),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}
