// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CompdfError, Result};
use crate::types::{Credentials, Language};

/// Production API origin. Every endpoint is a relative path under it.
pub const DEFAULT_BASE_URL: &str = "https://api-server.compdf.com/server/";

pub const ENV_PUBLIC_KEY: &str = "COMPDF_PUBLIC_KEY";
pub const ENV_SECRET_KEY: &str = "COMPDF_SECRET_KEY";
pub const ENV_BASE_URL: &str = "COMPDF_BASE_URL";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "COMPDF_CONNECT_TIMEOUT_MS";
pub const ENV_LANGUAGE: &str = "COMPDF_LANGUAGE";

/// Settings needed to build a client.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub public_key: String,
    pub secret_key: String,
    /// API origin (default [`DEFAULT_BASE_URL`]).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in milliseconds. `None`, zero and negative values
    /// (the `-1` sentinel) all mean no explicit timeout.
    #[serde(default)]
    pub connect_timeout_ms: Option<i64>,
    /// Default language for operations that do not pass one.
    #[serde(default)]
    pub language: Language,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            base_url: default_base_url(),
            connect_timeout_ms: None,
            language: Language::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX));
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Build a configuration from `COMPDF_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let required = |key: &str| {
            std::env::var(key)
                .map_err(|_| CompdfError::Config(format!("environment variable {key} is not set")))
        };
        let mut config = Self::new(required(ENV_PUBLIC_KEY)?, required(ENV_SECRET_KEY)?);

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(raw) = std::env::var(ENV_CONNECT_TIMEOUT_MS) {
            let ms = raw.trim().parse::<i64>().map_err(|_| {
                CompdfError::Config(format!("{ENV_CONNECT_TIMEOUT_MS} must be an integer, got '{raw}'"))
            })?;
            config.connect_timeout_ms = Some(ms);
        }
        if let Ok(raw) = std::env::var(ENV_LANGUAGE) {
            config.language = raw
                .parse()
                .map_err(|e: CompdfError| CompdfError::Config(e.to_string()))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CompdfError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a working client.
    pub fn validate(&self) -> Result<()> {
        if self.public_key.trim().is_empty() {
            return Err(CompdfError::Config("public key is empty".into()));
        }
        if self.secret_key.trim().is_empty() {
            return Err(CompdfError::Config("secret key is empty".into()));
        }
        self.base()?;
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.public_key.clone(), self.secret_key.clone())
    }

    /// Parsed API origin, with a trailing `/` so relative paths join under it.
    pub fn base(&self) -> Result<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| CompdfError::Config(format!("invalid base URL '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CompdfError::Config(format!(
                "base URL must be http or https, got '{}'",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Explicit connection timeout, if one is configured.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms
            .filter(|ms| *ms > 0)
            .map(|ms| Duration::from_millis(ms as u64))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("language", &self.language)
            .finish()
    }
}
