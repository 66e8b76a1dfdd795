// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// compdf-tools: what the ComPDF API can do, described locally.
//
// Provides the three tool catalogs (conversion, document AI, editor), the
// `ToolSelector` that resolves a choice to an endpoint path, and the typed
// parameter objects encoded into the upload's `parameter` field.

pub mod catalog;
pub mod param;

// Re-export the primary types so callers can use `compdf_tools::ToolSelector` etc.
pub use catalog::{ConversionKind, DocumentAiKind, EditorKind, ToolSelector};
pub use param::{FileParameter, RawParameter};
