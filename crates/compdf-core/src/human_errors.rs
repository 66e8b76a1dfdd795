// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for command-line users.
//
// Every error is mapped to a plain summary plus a concrete suggestion. The
// severity tells the caller whether trying again later can help.

use crate::error::CompdfError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A network blip or server overload. Trying again later may succeed.
    Transient,
    /// The user must change something (keys, file, task state).
    ActionRequired,
    /// Retrying the same input will fail the same way.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (printed first).
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
    /// Whether repeating the same call later is worthwhile.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `CompdfError` into a `HumanError`.
pub fn humanize_error(err: &CompdfError) -> HumanError {
    match err {
        CompdfError::Authentication { code, message } => HumanError {
            message: "The API rejected your keys.".into(),
            suggestion: format!(
                "Check the public and secret key of your project, then try again. (server said {code}: {message})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CompdfError::Api { code, message } => humanize_api_error(code, message),

        CompdfError::Http(e) if e.is_timeout() || e.is_connect() => HumanError {
            message: "We couldn't reach the API server.".into(),
            suggestion: format!("Check your network connection and try again. ({e})"),
            retriable: true,
            severity: Severity::Transient,
        },

        CompdfError::Http(e) => HumanError {
            message: "The request to the API server failed.".into(),
            suggestion: format!("Try again in a moment. ({e})"),
            retriable: true,
            severity: Severity::Transient,
        },

        CompdfError::InvalidResponse(detail) => HumanError {
            message: "The API server sent a reply we don't understand.".into(),
            suggestion: format!("Check that the base URL points at the ComPDF API. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        CompdfError::InvalidArgument(detail) => HumanError {
            message: "Some of the input is not valid.".into(),
            suggestion: detail.clone(),
            retriable: false,
            severity: Severity::Permanent,
        },

        CompdfError::Config(detail) => HumanError {
            message: "The client configuration is incomplete.".into(),
            suggestion: format!(
                "Set COMPDF_PUBLIC_KEY and COMPDF_SECRET_KEY, or pass --config. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CompdfError::Io(e) => HumanError {
            message: "A local file could not be read.".into(),
            suggestion: format!("Check that the file exists and is readable. ({e})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CompdfError::Serialization(e) => HumanError {
            message: "The data could not be encoded.".into(),
            suggestion: format!("Check the parameter JSON. ({e})"),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

/// Classify a server error by its code. Codes that start with `5` (or the
/// HTTP status itself, when the body had no envelope) are server-side.
fn humanize_api_error(code: &str, message: &str) -> HumanError {
    if code.starts_with('5') {
        return HumanError {
            message: "The API server had a problem.".into(),
            suggestion: format!("Try again later. ({code}: {message})"),
            retriable: true,
            severity: Severity::Transient,
        };
    }

    let lower = message.to_ascii_lowercase();
    if lower.contains("token") || code == "401" || code == "403" {
        return HumanError {
            message: "The API did not accept the session.".into(),
            suggestion: format!("Run the command again to sign in afresh. ({code}: {message})"),
            retriable: true,
            severity: Severity::ActionRequired,
        };
    }

    HumanError {
        message: "The API refused the request.".into(),
        suggestion: format!("{message} (code {code})"),
        retriable: false,
        severity: Severity::ActionRequired,
    }
}
