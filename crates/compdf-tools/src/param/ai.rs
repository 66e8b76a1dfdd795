// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parameters for the document-AI tools.

#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Text recognition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct OcrParameter {
    /// Recognition language, `auto` to detect.
    pub lang: String,
}

impl Default for OcrParameter {
    fn default() -> Self {
        Self {
            lang: "auto".into(),
        }
    }
}

/// Trim and perspective correction. Takes no options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct TrimCorrectionParameter {}

super::serde_file_parameter!(OcrParameter, TrimCorrectionParameter);
