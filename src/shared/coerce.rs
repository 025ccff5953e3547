//! Lenient deserializers for form-style payloads.
//!
//! Admin forms post numeric fields either as JSON numbers or as strings.
//! Values that cannot be coerced deserialize to `None` so the validation
//! layer can report them per field instead of rejecting the whole body.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a number or numeric string into a `Decimal`
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }))
}

/// Coerce a number or numeric string into a whole `i32`; fractions are rejected
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => parse_decimal(&n.to_string()).and_then(whole_i32),
        Value::String(s) => parse_decimal(s.trim()).and_then(whole_i32),
        _ => None,
    }))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn whole_i32(value: Decimal) -> Option<i32> {
    if !value.fract().is_zero() {
        return None;
    }
    value.to_i64().and_then(|v| i32::try_from(v).ok())
}
