//! Scalar handlers: `S`, `N`, `BOOL` and `NULL`.
//!
//! Every scalar payload must be a JSON string. It is trimmed before any other
//! check, and an empty result is invalid for all four tags.
//!
//! - **`S`**: trimmed text, or integer Unix epoch seconds when the text is an
//!   RFC3339 date-time such as `2014-07-16T20:55:46Z`
//! - **`N`**: `i64`, then `u64`, then an exact big integer, then finite `f64`;
//!   `"011"` becomes `11`
//! - **`BOOL`**: a fixed set of tokens per truth value, exact casing
//! - **`NULL`**: a true token produces `null`; anything else omits the field

use crate::transform::omit;
use crate::types::{Tag, Transformed};
use chrono::DateTime;
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

/// Tokens accepted as `true` by `BOOL` and `NULL`.
pub const TRUE_TOKENS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];

/// Tokens accepted as `false` by `BOOL` and `NULL`.
pub const FALSE_TOKENS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];

/// `YYYY-MM-DDTHH:MM:SS[.fraction](Z|±HH:MM)`, ASCII digits only.
///
/// chrono's RFC3339 parser is more lenient (lowercase `t`/`z`, a space as the
/// date/time separator), so the shape is checked here first.
static RFC3339_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2})$")
        .expect("RFC3339 shape regex is valid")
});

/// Trim a key, rejecting keys that are empty afterwards.
///
/// ```
/// use tagjson_core::sanitize_key;
///
/// assert_eq!(sanitize_key("  name "), Some("name"));
/// assert_eq!(sanitize_key(" \t "), None);
/// ```
pub fn sanitize_key(key: &str) -> Option<&str> {
    let trimmed = key.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Map a boolean token to its value. The token is matched as given, without
/// trimming or case folding.
pub fn parse_bool_token(token: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&token) {
        Some(true)
    } else if FALSE_TOKENS.contains(&token) {
        Some(false)
    } else {
        None
    }
}

/// Parse a numeric literal into the narrowest JSON number.
///
/// Integers are tried before floats, so `"7"` stays an integer and `"7.0"`
/// becomes a float. Integer literals beyond `i64`/`u64` are kept exact as
/// arbitrary-precision numbers. Floats without a JSON representation (`inf`,
/// `NaN`, overflow to infinity) are rejected.
///
/// ```
/// use tagjson_core::parse_number;
///
/// assert_eq!(parse_number("011").unwrap().as_i64(), Some(11));
/// assert_eq!(parse_number("1.50").unwrap().as_f64(), Some(1.5));
/// assert!(parse_number("5215s").is_none());
/// assert_eq!(
///     parse_number("-0123456789012345678901234567890").unwrap().to_string(),
///     "-123456789012345678901234567890"
/// );
/// ```
pub fn parse_number(literal: &str) -> Option<Number> {
    if let Ok(n) = literal.parse::<i64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = literal.parse::<u64>() {
        return Some(Number::from(n));
    }
    if let Some(n) = parse_big_integer(literal) {
        return Some(n);
    }
    literal.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Out-of-range integer literal as an exact `Number`.
///
/// JSON forbids a leading `+` and leading zeros, so the literal is normalized
/// before serde_json reads it back with `arbitrary_precision`.
fn parse_big_integer(literal: &str) -> Option<Number> {
    let (negative, digits) = match literal.as_bytes().first()? {
        b'-' => (true, &literal[1..]),
        b'+' => (false, &literal[1..]),
        _ => (false, literal),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(Number::from(0));
    }
    let normalized = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    serde_json::from_str(&normalized).ok()
}

/// Convert an RFC3339 date-time to whole Unix epoch seconds.
///
/// Returns `None` when the text does not have the RFC3339 shape or does not
/// name a real instant (`2021-13-01T00:00:00Z`). Fractional seconds are
/// truncated toward zero.
///
/// ```
/// use tagjson_core::rfc3339_to_epoch;
///
/// assert_eq!(rfc3339_to_epoch("2014-07-16T20:55:46Z"), Some(1405544146));
/// assert_eq!(rfc3339_to_epoch("2014-07-16 20:55:46Z"), None);
/// ```
pub fn rfc3339_to_epoch(text: &str) -> Option<i64> {
    if !RFC3339_SHAPE.is_match(text) {
        return None;
    }
    let dt = DateTime::parse_from_rfc3339(text).ok()?;
    let secs = dt.timestamp();
    // timestamp() floors; pre-epoch instants with a fraction need one second back.
    if secs < 0 && dt.timestamp_subsec_nanos() > 0 {
        Some(secs + 1)
    } else {
        Some(secs)
    }
}

/// Extract the trimmed, non-empty string payload shared by all scalar tags.
fn scalar_token(tag: Tag, raw: &Value) -> Option<&str> {
    let Value::String(s) = raw else {
        omit(tag, "payload is not a string");
        return None;
    };
    let token = s.trim();
    if token.is_empty() {
        omit(tag, "payload is empty");
        return None;
    }
    Some(token)
}

pub(crate) fn transform_string(raw: &Value) -> Transformed {
    let Some(text) = scalar_token(Tag::String, raw) else {
        return Transformed::Omit;
    };
    match rfc3339_to_epoch(text) {
        Some(epoch) => Transformed::Value(Value::from(epoch)),
        None => Transformed::Value(Value::String(text.to_string())),
    }
}

pub(crate) fn transform_number(raw: &Value) -> Transformed {
    let Some(literal) = scalar_token(Tag::Number, raw) else {
        return Transformed::Omit;
    };
    match parse_number(literal) {
        Some(n) => Transformed::Value(Value::Number(n)),
        None => omit(Tag::Number, "not a numeric literal"),
    }
}

pub(crate) fn transform_bool(raw: &Value) -> Transformed {
    let Some(token) = scalar_token(Tag::Boolean, raw) else {
        return Transformed::Omit;
    };
    match parse_bool_token(token) {
        Some(b) => Transformed::Value(Value::Bool(b)),
        None => omit(Tag::Boolean, "not a boolean token"),
    }
}

pub(crate) fn transform_null(raw: &Value) -> Transformed {
    let Some(token) = scalar_token(Tag::Null, raw) else {
        return Transformed::Omit;
    };
    match parse_bool_token(token) {
        Some(true) => Transformed::Value(Value::Null),
        Some(false) => omit(Tag::Null, "null flag is false"),
        None => omit(Tag::Null, "not a boolean token"),
    }
}
