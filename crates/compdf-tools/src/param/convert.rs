// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parameters for the format conversion tools.

#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

use super::{flag, numeric};

/// PDF to Word, Excel, PowerPoint, HTML or RTF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct PdfToOfficeParameter {
    #[serde(with = "flag")]
    pub is_contain_img: bool,
    #[serde(with = "flag")]
    pub is_contain_annot: bool,
    #[serde(with = "flag")]
    pub enable_ai_layout: bool,
    #[serde(with = "flag")]
    pub enable_ocr: bool,
    /// OCR language, `AUTO` to detect.
    pub ocr_recognition_lang: String,
}

impl Default for PdfToOfficeParameter {
    fn default() -> Self {
        Self {
            is_contain_img: true,
            is_contain_annot: true,
            enable_ai_layout: true,
            enable_ocr: false,
            ocr_recognition_lang: "AUTO".into(),
        }
    }
}

/// PDF to raster images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct PdfToImageParameter {
    #[serde(with = "numeric")]
    pub img_dpi: u32,
}

impl Default for PdfToImageParameter {
    fn default() -> Self {
        Self { img_dpi: 300 }
    }
}

/// Word, Excel, PowerPoint, text, HTML or image to PDF. These tools take no
/// options; the object exists so every upload can carry a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct ToPdfParameter {}

super::serde_file_parameter!(PdfToOfficeParameter, PdfToImageParameter, ToPdfParameter);
