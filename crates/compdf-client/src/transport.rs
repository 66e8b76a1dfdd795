// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Authenticated HTTP transport.
//
// Two primitives: `request` for plain GET/POST calls and `upload` for
// multipart form posts. Both attach `Authorization: Bearer <token>` obtained
// from the token manager, return the envelope's `data` on status 200, and
// turn any other status into `CompdfError::Api` with the envelope's own code
// and message. Nothing is retried. Calls are issued one at a time.

use std::path::{Path, PathBuf};

use compdf_core::config::ClientConfig;
use compdf_core::error::{CompdfError, Result};
use compdf_core::types::FileFormat;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::fs::File;
use tracing::{debug, error, instrument};
use url::Url;

use crate::endpoints;
use crate::envelope::{decode_data, error_fields};
use crate::token::TokenManager;

/// Value of one multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    /// A local file, sent as a file part named `file_name`.
    File { path: PathBuf, file_name: String },
}

/// HTTP transport bound to one API origin and one set of credentials.
#[derive(Debug)]
pub struct Transport {
    http: HttpClient,
    base: Url,
    tokens: TokenManager,
}

impl Transport {
    /// Build the transport from a validated configuration.
    ///
    /// The only timeout applied is the configured connection timeout, if any.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base = config.base()?;

        let mut builder =
            HttpClient::builder().user_agent(concat!("compdf/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build()?;

        let auth_url = join(&base, endpoints::OAUTH_TOKEN)?;
        let tokens = TokenManager::new(config.credentials(), http.clone(), auth_url);

        Ok(Self { http, base, tokens })
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Full URL of a path relative to the base address.
    pub fn url(&self, path: &str) -> Result<Url> {
        join(&self.base, path)
    }

    /// Issue an authenticated call and decode the envelope's `data`.
    #[instrument(skip(self, query, body))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let url = self.url(path)?;
        let mut request = self.http.request(method, url).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(path, request).await
    }

    /// Issue an authenticated multipart upload and decode the envelope's `data`.
    ///
    /// File fields are streamed from disk; each handle is owned by the request
    /// body and closed when the call completes or fails. A missing file is an
    /// invalid argument and stops the upload before anything is sent.
    #[instrument(skip(self, form_fields), fields(field_count = form_fields.len()))]
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form_fields: Vec<(String, FormValue)>,
    ) -> Result<T> {
        let mut form = Form::new();
        for (name, value) in form_fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File { path, file_name } => {
                    let (file, size) = open_file(&path).await?;
                    debug!(field = %name, %file_name, size, "attaching file");
                    let part = Part::stream_with_length(Body::from(file), size)
                        .file_name(file_name.clone())
                        .mime_str(FileFormat::mime_for(&file_name))?;
                    form.part(name, part)
                }
            };
        }

        let url = self.url(path)?;
        let request = self.http.post(url).multipart(form);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let token = self.tokens.get_token().await?;
        let response = request
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(path, status = status.as_u16(), bytes = text.len(), "response received");

        if status != StatusCode::OK {
            let (code, message) = error_fields(status, &text);
            error!(path, status = status.as_u16(), %code, %message, "API call failed");
            return Err(CompdfError::Api { code, message });
        }
        decode_data(&text)
    }
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| CompdfError::invalid_argument(format!("invalid endpoint path '{path}': {e}")))
}

async fn open_file(path: &Path) -> Result<(File, u64)> {
    let file = File::open(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            CompdfError::invalid_argument(format!("file not found: {}", path.display()))
        }
        _ => CompdfError::Io(e),
    })?;
    let size = file.metadata().await?.len();
    Ok((file, size))
}
