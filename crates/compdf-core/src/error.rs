// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the ComPDF client.

use thiserror::Error;

/// Top-level error type for all ComPDF client operations.
#[derive(Debug, Error)]
pub enum CompdfError {
    // -- Remote errors --
    /// The public/secret key exchange was rejected.
    #[error("authentication failed ({code}): {message}")]
    Authentication { code: String, message: String },

    /// An authenticated call answered with a non-200 status. Both fields are
    /// taken verbatim from the response envelope.
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    /// A 200 response whose body is not the expected envelope.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // -- Local errors --
    /// Malformed local input, detected before any network call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CompdfError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Server-provided code, for the two variants that carry one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Authentication { code, .. } | Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CompdfError>;
