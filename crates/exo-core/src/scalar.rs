//! Coercion of a single raw cell into a canonical value.
//!
//! Canonical values are `number | string | array | null` (other JSON values
//! pass through untouched). Normalization is total: malformed input degrades
//! to the closest best-effort value instead of failing.

use serde_json::{Number, Value};

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Normalize one raw value.
///
/// - `null` stays `null`
/// - arrays are normalized element-wise, order preserved
/// - numbers pass through
/// - strings are trimmed; empty becomes `null`, numeric text becomes a
///   number, `[...]`/`{...}` text is parsed as JSON when possible
/// - booleans and objects pass through unchanged
#[must_use]
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::String(text) => normalize_str(text),
        other => other.clone(),
    }
}

/// Normalize a cell that is absent from its row.
#[must_use]
pub fn normalize_opt(value: Option<&Value>) -> Value {
    value.map_or(Value::Null, normalize)
}

/// Normalize raw text, as read from a CSV cell or a JSON string.
#[must_use]
pub fn normalize_str(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Some(number) = parse_number(trimmed) {
        return number_value(number);
    }
    if looks_like_json_container(trimmed) {
        if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
            return normalize(&parsed);
        }
    }
    Value::String(trimmed.to_owned())
}

/// Parse already-trimmed text as a finite number.
///
/// Accepts decimal and exponent notation plus `0x`/`0o`/`0b` integer
/// literals. `inf`/`nan` spellings parse but are not finite, so they yield
/// `None`.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    #[allow(clippy::cast_precision_loss)]
    let parsed = match radix {
        Some(radix) => u64::from_str_radix(&text[2..], radix).ok().map(|n| n as f64),
        None => text.parse::<f64>().ok(),
    };
    parsed.filter(|n| n.is_finite())
}

/// Convert a finite `f64` into a JSON number, using an integer
/// representation when the value is integral and exactly representable.
#[must_use]
pub fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        return Value::from(number as i64);
    }
    Number::from_f64(number).map_or(Value::Null, Value::Number)
}

fn looks_like_json_container(text: &str) -> bool {
    (text.starts_with('[') && text.ends_with(']')) || (text.starts_with('{') && text.ends_with('}'))
}
