// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Response envelope handling.
//
// Every response body is `{ "code": .., "msg": .., "data": .. }`. On success
// the payload is `data`; on failure `code` and `msg` are handed to the caller
// unmodified.

use compdf_core::error::{CompdfError, Result};
use compdf_core::lenient::scalar_to_string;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract `(code, message)` from a failed response.
///
/// Falls back to the HTTP status and the raw body when the body is not an
/// envelope.
pub(crate) fn error_fields(status: StatusCode, body: &str) -> (String, String) {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        let code = map.get("code").and_then(scalar_to_string);
        let message = map
            .get("msg")
            .or_else(|| map.get("message"))
            .and_then(scalar_to_string);
        if code.is_some() || message.is_some() {
            return (
                code.unwrap_or_else(|| status.as_u16().to_string()),
                message.unwrap_or_default(),
            );
        }
    }

    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        body.to_string()
    };
    (status.as_u16().to_string(), message)
}

/// Deserialize the `data` field of a successful response.
pub(crate) fn decode_data<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| CompdfError::InvalidResponse(format!("body is not JSON: {e}")))?;
    let data = match value {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
        other => {
            return Err(CompdfError::InvalidResponse(format!(
                "expected an envelope object, got {other}"
            )));
        }
    };
    serde_json::from_value(data)
        .map_err(|e| CompdfError::InvalidResponse(format!("unexpected data payload: {e}")))
}
