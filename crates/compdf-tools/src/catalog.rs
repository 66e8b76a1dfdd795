// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool catalogs and the tool selector.
//
// Every document operation the API offers lives at its own endpoint path.
// The three closed catalogs below name the known operations; `ToolSelector`
// lets a caller pick one of them or pass a raw endpoint path, and resolves
// the choice to a path once, before any request is made.

use std::fmt;
use std::str::FromStr;

use compdf_core::error::{CompdfError, Result};
use tracing::debug;

/// Format conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    PdfToWord,
    PdfToExcel,
    PdfToPpt,
    PdfToHtml,
    PdfToRtf,
    PdfToImage,
    PdfToPng,
    PdfToJpg,
    PdfToCsv,
    PdfToTxt,
    PdfToJson,
    WordToPdf,
    ExcelToPdf,
    PptToPdf,
    TxtToPdf,
    PngToPdf,
    JpgToPdf,
    ImageToPdf,
    HtmlToPdf,
    CsvToPdf,
    RtfToPdf,
}

impl ConversionKind {
    pub const ALL: [Self; 21] = [
        Self::PdfToWord,
        Self::PdfToExcel,
        Self::PdfToPpt,
        Self::PdfToHtml,
        Self::PdfToRtf,
        Self::PdfToImage,
        Self::PdfToPng,
        Self::PdfToJpg,
        Self::PdfToCsv,
        Self::PdfToTxt,
        Self::PdfToJson,
        Self::WordToPdf,
        Self::ExcelToPdf,
        Self::PptToPdf,
        Self::TxtToPdf,
        Self::PngToPdf,
        Self::JpgToPdf,
        Self::ImageToPdf,
        Self::HtmlToPdf,
        Self::CsvToPdf,
        Self::RtfToPdf,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::PdfToWord => "pdf/docx",
            Self::PdfToExcel => "pdf/xlsx",
            Self::PdfToPpt => "pdf/pptx",
            Self::PdfToHtml => "pdf/html",
            Self::PdfToRtf => "pdf/rtf",
            Self::PdfToImage => "pdf/img",
            Self::PdfToPng => "pdf/png",
            Self::PdfToJpg => "pdf/jpg",
            Self::PdfToCsv => "pdf/csv",
            Self::PdfToTxt => "pdf/txt",
            Self::PdfToJson => "pdf/json",
            Self::WordToPdf => "docx/pdf",
            Self::ExcelToPdf => "xlsx/pdf",
            Self::PptToPdf => "pptx/pdf",
            Self::TxtToPdf => "txt/pdf",
            Self::PngToPdf => "png/pdf",
            Self::JpgToPdf => "jpg/pdf",
            Self::ImageToPdf => "img/pdf",
            Self::HtmlToPdf => "html/pdf",
            Self::CsvToPdf => "csv/pdf",
            Self::RtfToPdf => "rtf/pdf",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PdfToWord => "pdf-to-word",
            Self::PdfToExcel => "pdf-to-excel",
            Self::PdfToPpt => "pdf-to-ppt",
            Self::PdfToHtml => "pdf-to-html",
            Self::PdfToRtf => "pdf-to-rtf",
            Self::PdfToImage => "pdf-to-image",
            Self::PdfToPng => "pdf-to-png",
            Self::PdfToJpg => "pdf-to-jpg",
            Self::PdfToCsv => "pdf-to-csv",
            Self::PdfToTxt => "pdf-to-txt",
            Self::PdfToJson => "pdf-to-json",
            Self::WordToPdf => "word-to-pdf",
            Self::ExcelToPdf => "excel-to-pdf",
            Self::PptToPdf => "ppt-to-pdf",
            Self::TxtToPdf => "txt-to-pdf",
            Self::PngToPdf => "png-to-pdf",
            Self::JpgToPdf => "jpg-to-pdf",
            Self::ImageToPdf => "image-to-pdf",
            Self::HtmlToPdf => "html-to-pdf",
            Self::CsvToPdf => "csv-to-pdf",
            Self::RtfToPdf => "rtf-to-pdf",
        }
    }
}

/// Recognition and image clean-up operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentAiKind {
    Ocr,
    MagicColor,
    /// Perspective/trim correction of photographed pages.
    TrimCorrection,
    TableRecognition,
}

impl DocumentAiKind {
    pub const ALL: [Self; 4] = [
        Self::Ocr,
        Self::MagicColor,
        Self::TrimCorrection,
        Self::TableRecognition,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Ocr => "documentAI/ocr",
            Self::MagicColor => "documentAI/magicColor",
            Self::TrimCorrection => "documentAI/dewarp",
            Self::TableRecognition => "documentAI/tableRec",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ocr => "ocr",
            Self::MagicColor => "magic-color",
            Self::TrimCorrection => "trim-correction",
            Self::TableRecognition => "table-recognition",
        }
    }
}

/// Page and document editing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Split,
    Merge,
    Compress,
    Insert,
    Extract,
    Rotate,
    DeletePages,
    AddWatermark,
    RemoveWatermark,
}

impl EditorKind {
    pub const ALL: [Self; 9] = [
        Self::Split,
        Self::Merge,
        Self::Compress,
        Self::Insert,
        Self::Extract,
        Self::Rotate,
        Self::DeletePages,
        Self::AddWatermark,
        Self::RemoveWatermark,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Split => "pdf/split",
            Self::Merge => "pdf/merge",
            Self::Compress => "pdf/compress",
            Self::Insert => "pdf/insert",
            Self::Extract => "pdf/extract",
            Self::Rotate => "pdf/rotation",
            Self::DeletePages => "pdf/delete",
            Self::AddWatermark => "pdf/addWatermark",
            Self::RemoveWatermark => "pdf/delWatermark",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Merge => "merge",
            Self::Compress => "compress",
            Self::Insert => "insert",
            Self::Extract => "extract",
            Self::Rotate => "rotate",
            Self::DeletePages => "delete-pages",
            Self::AddWatermark => "add-watermark",
            Self::RemoveWatermark => "remove-watermark",
        }
    }
}

/// Which tool a task should run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToolSelector {
    /// An endpoint path not covered by the catalogs, e.g. `pdf/docx`.
    RawPath(String),
    Conversion(ConversionKind),
    DocumentAi(DocumentAiKind),
    Editor(EditorKind),
}

impl ToolSelector {
    pub fn raw(path: impl Into<String>) -> Self {
        Self::RawPath(path.into())
    }

    /// Every catalog member, in catalog order.
    pub fn catalog() -> impl Iterator<Item = ToolSelector> {
        ConversionKind::ALL
            .into_iter()
            .map(Self::Conversion)
            .chain(DocumentAiKind::ALL.into_iter().map(Self::DocumentAi))
            .chain(EditorKind::ALL.into_iter().map(Self::Editor))
    }

    /// Resolve to the endpoint path used in the create-task call.
    ///
    /// Raw paths are trimmed of surrounding `/`; an empty path or one with
    /// whitespace in it is rejected.
    pub fn resolve(&self) -> Result<String> {
        let path = match self {
            Self::RawPath(raw) => {
                let path = raw.trim().trim_matches('/');
                if path.is_empty() {
                    return Err(CompdfError::invalid_argument("tool path is empty"));
                }
                if path.chars().any(char::is_whitespace) {
                    return Err(CompdfError::invalid_argument(format!(
                        "tool path '{raw}' contains whitespace"
                    )));
                }
                path
            }
            Self::Conversion(kind) => kind.endpoint(),
            Self::DocumentAi(kind) => kind.endpoint(),
            Self::Editor(kind) => kind.endpoint(),
        };
        debug!(tool = %self, path, "resolved tool selector");
        Ok(path.to_string())
    }

    fn catalog_endpoint(&self) -> Option<&'static str> {
        match self {
            Self::RawPath(_) => None,
            Self::Conversion(kind) => Some(kind.endpoint()),
            Self::DocumentAi(kind) => Some(kind.endpoint()),
            Self::Editor(kind) => Some(kind.endpoint()),
        }
    }

    /// Catalog name, or the raw path.
    pub fn label(&self) -> &str {
        match self {
            Self::RawPath(raw) => raw,
            Self::Conversion(kind) => kind.name(),
            Self::DocumentAi(kind) => kind.name(),
            Self::Editor(kind) => kind.name(),
        }
    }
}

impl fmt::Display for ToolSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<ConversionKind> for ToolSelector {
    fn from(kind: ConversionKind) -> Self {
        Self::Conversion(kind)
    }
}

impl From<DocumentAiKind> for ToolSelector {
    fn from(kind: DocumentAiKind) -> Self {
        Self::DocumentAi(kind)
    }
}

impl From<EditorKind> for ToolSelector {
    fn from(kind: EditorKind) -> Self {
        Self::Editor(kind)
    }
}

impl FromStr for ToolSelector {
    type Err = CompdfError;

    /// A catalog name or endpoint picks that member; any other string with a
    /// `/` in it is taken as a raw path.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        let wanted_path = wanted.trim_matches('/');
        if let Some(member) = Self::catalog().find(|member| {
            member.label().eq_ignore_ascii_case(wanted)
                || member.catalog_endpoint() == Some(wanted_path)
        }) {
            return Ok(member);
        }
        if wanted.contains('/') {
            return Ok(Self::RawPath(wanted.to_string()));
        }
        Err(CompdfError::invalid_argument(format!(
            "unrecognized tool '{wanted}' (expected a catalog name such as 'compress' or an endpoint path such as 'pdf/docx')"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_catalog_member_has_a_distinct_non_empty_endpoint() {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for member in ToolSelector::catalog() {
            let path = member.resolve().expect("catalog members always resolve");
            assert!(!path.is_empty(), "{member} has an empty endpoint");
            assert!(paths.insert(path.clone()), "duplicate endpoint {path}");
            assert!(names.insert(member.label().to_string()), "duplicate name {member}");
        }
        assert_eq!(
            paths.len(),
            ConversionKind::ALL.len() + DocumentAiKind::ALL.len() + EditorKind::ALL.len()
        );
    }

    #[test]
    fn raw_path_is_trimmed() {
        let selector = ToolSelector::raw("/pdf/docx/");
        assert_eq!(selector.resolve().unwrap(), "pdf/docx");
    }

    #[test]
    fn empty_or_spaced_raw_path_is_rejected() {
        assert!(matches!(
            ToolSelector::raw("  ").resolve(),
            Err(CompdfError::InvalidArgument(_))
        ));
        assert!(matches!(
            ToolSelector::raw("pdf/ docx").resolve(),
            Err(CompdfError::InvalidArgument(_))
        ));
    }

    #[test]
    fn parse_by_name_or_endpoint() {
        assert_eq!(
            "compress".parse::<ToolSelector>().unwrap(),
            ToolSelector::Editor(EditorKind::Compress)
        );
        assert_eq!(
            "documentAI/dewarp".parse::<ToolSelector>().unwrap(),
            ToolSelector::DocumentAi(DocumentAiKind::TrimCorrection)
        );
        assert_eq!(
            "PNG-TO-PDF".parse::<ToolSelector>().unwrap(),
            ToolSelector::Conversion(ConversionKind::PngToPdf)
        );
    }

    #[test]
    fn unknown_path_becomes_raw() {
        assert_eq!(
            "pdf/ofd".parse::<ToolSelector>().unwrap(),
            ToolSelector::raw("pdf/ofd")
        );
    }

    #[test]
    fn unknown_name_is_invalid_argument() {
        assert!(matches!(
            "frobnicate".parse::<ToolSelector>(),
            Err(CompdfError::InvalidArgument(_))
        ));
    }
}
