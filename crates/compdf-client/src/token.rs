// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Access token management.
//
// The manager holds at most one access token. A caller asking for a token
// gets the cached one while it is still valid; otherwise the manager
// exchanges the public/secret key pair for a new token first. There is no
// background refresh: the check happens on the call that needs a token.
//
// Concurrent callers that both see an expired token will both refresh. Each
// refresh yields a valid token and the last one stored wins, so the race is
// harmless and the lock is never held across a request.

use std::sync::RwLock;

use chrono::{DateTime, TimeDelta, Utc};
use compdf_core::error::{CompdfError, Result};
use compdf_core::types::{AccessGrant, Credentials};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::json;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::envelope::{decode_data, error_fields};

/// A bearer token and the instant it stops being usable.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Token issued at `issued_at` that lives for `lifetime_secs` seconds.
    pub fn new(value: impl Into<String>, lifetime_secs: u64, issued_at: DateTime<Utc>) -> Self {
        let lifetime = i64::try_from(lifetime_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            value: value.into(),
            expires_at: issued_at
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Valid iff non-empty and `now` is strictly before the expiry.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Owns the credentials and the single current access token.
pub struct TokenManager {
    credentials: Credentials,
    http: HttpClient,
    auth_url: Url,
    current: RwLock<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(credentials: Credentials, http: HttpClient, auth_url: Url) -> Self {
        Self {
            credentials,
            http,
            auth_url,
            current: RwLock::new(None),
        }
    }

    /// Return a currently valid token, authenticating first if none is held
    /// or the held one has expired.
    pub async fn get_token(&self) -> Result<String> {
        if let Some(token) = self.current().filter(AccessToken::is_valid) {
            return Ok(token.value);
        }
        let token = self.refresh().await?;
        Ok(token.value)
    }

    /// Store `token`, expiring `lifetime_secs` seconds from now. Replaces any
    /// previous token in one step.
    pub fn set(&self, token: impl Into<String>, lifetime_secs: u64) -> AccessToken {
        let token = AccessToken::new(token, lifetime_secs, Utc::now());
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.clone());
        token
    }

    /// Snapshot of the held token, valid or not.
    pub fn current(&self) -> Option<AccessToken> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Exchange the credentials for a new token and cache it.
    ///
    /// A rejected exchange is returned as [`CompdfError::Authentication`] and
    /// is not retried.
    #[instrument(skip(self), fields(public_key = %self.credentials.public_key()))]
    pub async fn refresh(&self) -> Result<AccessToken> {
        let grant = self.exchange().await?;
        let token = self.set(grant.access_token, grant.expires_in);
        info!(expires_at = %token.expires_at(), "access token refreshed");
        Ok(token)
    }

    async fn exchange(&self) -> Result<AccessGrant> {
        let body = json!({
            "publicKey": self.credentials.public_key(),
            "secretKey": self.credentials.secret_key(),
        });

        debug!(url = %self.auth_url, "requesting access token");
        let response = self.http.post(self.auth_url.clone()).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            let (code, message) = error_fields(status, &text);
            error!(status = status.as_u16(), %code, %message, "authentication rejected");
            return Err(CompdfError::Authentication { code, message });
        }

        let grant: AccessGrant = decode_data(&text)?;
        if grant.access_token.trim().is_empty() {
            return Err(CompdfError::InvalidResponse(
                "authentication response has an empty accessToken".into(),
            ));
        }
        Ok(grant)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .field("auth_url", &self.auth_url.as_str())
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new(
            Credentials::new("pk", "sk"),
            HttpClient::new(),
            Url::parse("http://127.0.0.1:1/v1/oauth/token").unwrap(),
        )
    }

    #[test]
    fn token_is_valid_until_expiry() {
        let issued = Utc::now();
        let token = AccessToken::new("abc", 60, issued);
        assert!(token.is_valid_at(issued));
        assert!(token.is_valid_at(issued + TimeDelta::seconds(59)));
        assert!(!token.is_valid_at(issued + TimeDelta::seconds(60)));
    }

    #[test]
    fn zero_lifetime_is_never_valid() {
        let issued = Utc::now();
        assert!(!AccessToken::new("abc", 0, issued).is_valid_at(issued));
    }

    #[test]
    fn empty_token_is_never_valid() {
        assert!(!AccessToken::new("", 3600, Utc::now()).is_valid());
    }

    #[test]
    fn huge_lifetime_saturates() {
        let token = AccessToken::new("abc", u64::MAX, Utc::now());
        assert!(token.is_valid());
    }

    #[test]
    fn set_replaces_previous_token() {
        let tokens = manager();
        assert!(tokens.current().is_none());
        tokens.set("first", 60);
        tokens.set("second", 120);
        let current = tokens.current().expect("token stored");
        assert_eq!(current.value(), "second");
        assert!(current.expires_at() > Utc::now());
    }

    #[tokio::test]
    async fn valid_cached_token_needs_no_network() {
        // The auth URL points at a closed port, so any exchange would fail.
        let tokens = manager();
        tokens.set("cached", 3600);
        assert_eq!(tokens.get_token().await.unwrap(), "cached");
    }

    #[test]
    fn debug_hides_token_value() {
        let token = AccessToken::new("super-secret-token", 60, Utc::now());
        assert!(!format!("{token:?}").contains("super-secret-token"));
    }
}
