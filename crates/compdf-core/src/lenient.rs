// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Field deserializers that accept a value as either a JSON string or a JSON
// number. The API is not consistent about which one it sends for codes,
// counts and lifetimes.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render a scalar JSON value as a string. `null` becomes `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a scalar JSON value as an unsigned integer.
pub fn scalar_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    if value.is_null() {
        return Ok(String::new());
    }
    scalar_to_string(&value)
        .ok_or_else(|| D::Error::custom(format!("expected string or number, got {value}")))
}

pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(scalar_to_string(&value))
}

pub fn u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(d)?;
    scalar_to_u64(&value)
        .ok_or_else(|| D::Error::custom(format!("expected unsigned integer, got {value}")))
}

pub fn opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(scalar_to_u64(&value))
}
