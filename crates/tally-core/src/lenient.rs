//! # Lenient Parsing
//!
//! Forgiving readers for the stored back-office data.
//!
//! ## Zero-on-Unreadable Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stored value              Read as                                     │
//! │  ────────────              ───────                                     │
//! │  125.5                     125.50                                      │
//! │  "125.5"                   125.50                                      │
//! │  "125.5 pesos"             125.50   (longest numeric prefix)           │
//! │  "abc" / null / missing    0.00     (never an error)                   │
//! │  true / [] / {}            0.00                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reporting must never stop because one record is malformed. The record is
//! still included everywhere else (its items still count), only the bad
//! field reads as zero.
//!
//! Each submodule is meant for `#[serde(with = "...")]` on stored record
//! fields. Writing goes back out in the stored shape (decimal major units,
//! ISO-8601 strings) so the storage collaborator sees what it wrote.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

/// Parses the longest leading decimal number in `input`.
///
/// Permissive in the same way as the cashier screen's number fields:
/// leading whitespace is skipped, an optional sign, digits with at most one
/// decimal point, and an exponent only when digits follow it.
///
/// ## Example
/// ```rust
/// use tally_core::lenient::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix(" 12.5kg"), Some(12.5));
/// assert_eq!(parse_float_prefix(".5"), Some(0.5));
/// assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
/// assert_eq!(parse_float_prefix("e3"), None);
/// ```
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Reads a JSON value as a number, or `None` when it is not numeric.
fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Reads a JSON value as a whole number, truncating any fraction.
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_float_prefix(s).map(|f| f.trunc() as i64),
        _ => None,
    }
}

/// Money stored as decimal major units.
pub mod money {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::value_as_f64;
    use crate::money::Money;

    pub fn serialize<S: Serializer>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(amount.to_major_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value_as_f64(&value)
            .map(Money::from_major_f64)
            .unwrap_or_default())
    }
}

/// Whole-number quantities (stock levels, item counts).
pub mod count {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::value_as_i64;

    pub fn serialize<S: Serializer>(count: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*count)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value_as_i64(&value).unwrap_or(0))
    }
}

/// Instants stored as ISO-8601 strings (or epoch milliseconds).
///
/// An unreadable instant is `None`; such a record never falls inside any
/// report window, just as an invalid date never compares true.
pub mod instant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(
        at: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match at {
            Some(at) => serializer.serialize_str(&super::format_instant(at)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::value_as_instant(&value))
    }
}

/// Formats an instant the way the stored data writes it
/// (`2024-05-01T09:30:00.000Z`).
pub fn format_instant(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads a stored instant from a string or epoch-millisecond number.
pub fn value_as_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|at| at.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
