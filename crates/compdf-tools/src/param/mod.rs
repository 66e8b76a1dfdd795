// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File parameter encoding.
//
// Each tool accepts its own parameter shape. The upload endpoint carries it
// as a JSON string in the multipart `parameter` field, with boolean flags
// written as "1"/"0" and numbers written as decimal strings.

pub mod ai;
pub mod convert;
pub mod editor;

use compdf_core::error::{CompdfError, Result};
use serde_json::Value;

pub use ai::{OcrParameter, TrimCorrectionParameter};
pub use convert::{PdfToImageParameter, PdfToOfficeParameter, ToPdfParameter};
pub use editor::{
    CompressParameter, MergeParameter, PageDeleteParameter, PageExtractParameter,
    PageInsertParameter, PageRotationParameter, PageSplitParameter, WatermarkKind,
    WatermarkParameter,
};

/// A tool-specific parameter object that can be sent with an upload.
pub trait FileParameter: Send + Sync {
    /// Encode to the string carried in the upload's `parameter` field.
    fn to_parameter_json(&self) -> Result<String>;
}

/// Implement [`FileParameter`] through the type's serde representation.
macro_rules! serde_file_parameter {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::param::FileParameter for $ty {
                fn to_parameter_json(&self) -> compdf_core::error::Result<String> {
                    Ok(serde_json::to_string(self)?)
                }
            }
        )+
    };
}
pub(crate) use serde_file_parameter;

/// Caller-supplied parameter JSON for tools without a typed parameter object.
#[derive(Debug, Clone, PartialEq)]
pub struct RawParameter(String);

impl RawParameter {
    /// Accept `json` only if it is a JSON object.
    pub fn new(json: impl Into<String>) -> Result<Self> {
        let json = json.into();
        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(_)) => Ok(Self(json)),
            Ok(other) => Err(CompdfError::invalid_argument(format!(
                "parameter must be a JSON object, got {other}"
            ))),
            Err(e) => Err(CompdfError::invalid_argument(format!(
                "parameter is not valid JSON: {e}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FileParameter for RawParameter {
    fn to_parameter_json(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// `bool` on the wire as `"1"` / `"0"`.
pub(crate) mod flag {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *value { "1" } else { "0" })
    }

    /// Reads back either form. Only encodings under test are parsed.
    #[cfg(test)]
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        use serde::Deserialize;
        use serde::de::Error;
        use serde_json::Value;

        match Value::deserialize(d)? {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => Ok(n.as_u64() == Some(1)),
            Value::String(s) => match s.trim() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                other => Err(D::Error::custom(format!("invalid flag '{other}'"))),
            },
            other => Err(D::Error::custom(format!("invalid flag {other}"))),
        }
    }
}

/// Numbers on the wire as decimal strings.
pub(crate) mod numeric {
    use std::fmt::Display;

    use serde::Serializer;

    pub fn serialize<T: Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(value)
    }

    #[cfg(test)]
    pub fn deserialize<'de, T, D>(d: D) -> Result<T, D::Error>
    where
        T: std::str::FromStr,
        T::Err: Display,
        D: serde::Deserializer<'de>,
    {
        use compdf_core::lenient::scalar_to_string;
        use serde::Deserialize;
        use serde::de::Error;
        use serde_json::Value;

        let value = Value::deserialize(d)?;
        let raw = scalar_to_string(&value)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))?;
        raw.trim().parse().map_err(D::Error::custom)
    }
}
