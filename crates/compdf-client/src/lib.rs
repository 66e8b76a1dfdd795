// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// compdf-client: talks to the ComPDF document API.
//
// Holds the access token, issues authenticated requests and multipart
// uploads, and exposes the task lifecycle (create, upload, execute, inspect)
// on top of them. Types shared with callers live in `compdf-core`; tool
// catalogs and parameter objects live in `compdf-tools`.

pub mod client;
pub mod endpoints;
mod envelope;
pub mod token;
pub mod transport;

pub use client::{CompdfClient, UploadRequest};
pub use token::{AccessToken, TokenManager};
pub use transport::{FormValue, Transport};
