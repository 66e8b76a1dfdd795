// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parameters for the page and document editing tools.

use compdf_core::error::{CompdfError, Result};
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

use super::{flag, numeric};

/// Compression. `quality` ranges over 1..=100; lower means smaller output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct CompressParameter {
    #[serde(with = "numeric")]
    pub quality: u8,
}

impl CompressParameter {
    pub fn new(quality: u8) -> Result<Self> {
        if !(1..=100).contains(&quality) {
            return Err(CompdfError::invalid_argument(format!(
                "compression quality must be within 1..=100, got {quality}"
            )));
        }
        Ok(Self { quality })
    }
}

impl Default for CompressParameter {
    fn default() -> Self {
        Self { quality: 50 }
    }
}

/// Split into one output per page range, e.g. `["1-3", "4", "5-9"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct PageSplitParameter {
    pub page_options: Vec<String>,
}

/// Pages to delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct PageDeleteParameter {
    pub page_options: Vec<String>,
}

/// Pages to copy into a new document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct PageExtractParameter {
    pub page_options: Vec<String>,
}

/// Page ranges to keep from each uploaded file, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct MergeParameter {
    pub page_options: Vec<String>,
}

/// Rotate pages clockwise by a multiple of 90 degrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct PageRotationParameter {
    pub page_options: Vec<String>,
    #[serde(with = "numeric")]
    pub rotation: i32,
}

impl PageRotationParameter {
    pub fn new(page_options: Vec<String>, rotation: i32) -> Result<Self> {
        if rotation % 90 != 0 {
            return Err(CompdfError::invalid_argument(format!(
                "rotation must be a multiple of 90 degrees, got {rotation}"
            )));
        }
        Ok(Self {
            page_options,
            rotation,
        })
    }
}

/// Insert blank pages (sizes in points) before `target_page`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct PageInsertParameter {
    #[serde(with = "numeric")]
    pub target_page: u32,
    #[serde(with = "numeric")]
    pub width: u32,
    #[serde(with = "numeric")]
    pub height: u32,
    #[serde(with = "numeric")]
    pub number: u32,
}

impl Default for PageInsertParameter {
    fn default() -> Self {
        // One A4 page at the front.
        Self {
            target_page: 1,
            width: 595,
            height: 842,
            number: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "lowercase")]
pub enum WatermarkKind {
    Text,
    /// Uses the companion image sent with the upload.
    Image,
}

/// Text or image watermark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct WatermarkParameter {
    #[serde(rename = "type")]
    pub kind: WatermarkKind,
    #[serde(with = "numeric")]
    pub scale: f32,
    #[serde(with = "numeric")]
    pub opacity: f32,
    /// Radians.
    #[serde(with = "numeric")]
    pub rotation: f32,
    pub target_pages: String,
    pub vertalign: String,
    pub horizalign: String,
    #[serde(with = "numeric")]
    pub xoffset: f32,
    #[serde(with = "numeric")]
    pub yoffset: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(with = "flag")]
    pub full_screen: bool,
    #[serde(with = "numeric")]
    pub horizontal_space: f32,
    #[serde(with = "numeric")]
    pub vertical_space: f32,
}

impl WatermarkParameter {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: WatermarkKind::Text,
            content: Some(content.into()),
            text_color: Some("#59c5bb".into()),
            ..Self::image()
        }
    }

    pub fn image() -> Self {
        Self {
            kind: WatermarkKind::Image,
            scale: 1.0,
            opacity: 0.5,
            rotation: 0.0,
            target_pages: "1".into(),
            vertalign: "center".into(),
            horizalign: "center".into(),
            xoffset: 0.0,
            yoffset: 0.0,
            content: None,
            text_color: None,
            full_screen: false,
            horizontal_space: 0.0,
            vertical_space: 0.0,
        }
    }
}

super::serde_file_parameter!(
    CompressParameter,
    PageSplitParameter,
    PageDeleteParameter,
    PageExtractParameter,
    MergeParameter,
    PageRotationParameter,
    PageInsertParameter,
    WatermarkParameter,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::FileParameter;
    use serde_json::{Value, json};

    fn wire(p: &dyn FileParameter) -> Value {
        serde_json::from_str(&p.to_parameter_json().unwrap()).unwrap()
    }

    #[test]
    fn compress_quality_is_a_string_on_the_wire() {
        let p = CompressParameter::new(50).unwrap();
        assert_eq!(wire(&p), json!({ "quality": "50" }));
    }

    #[test]
    fn compress_rejects_out_of_range_quality() {
        assert!(CompressParameter::new(0).is_err());
        assert!(CompressParameter::new(101).is_err());
    }

    #[test]
    fn split_round_trips() {
        let p = PageSplitParameter {
            page_options: vec!["1".into(), "2-4".into()],
        };
        assert_eq!(wire(&p), json!({ "pageOptions": ["1", "2-4"] }));
        let back: PageSplitParameter =
            serde_json::from_str(&p.to_parameter_json().unwrap()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn rotation_must_be_right_angles() {
        assert!(PageRotationParameter::new(vec!["1".into()], 45).is_err());
        let p = PageRotationParameter::new(vec!["1".into()], 270).unwrap();
        let back: PageRotationParameter =
            serde_json::from_str(&p.to_parameter_json().unwrap()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn insert_round_trips() {
        let p = PageInsertParameter {
            target_page: 3,
            ..Default::default()
        };
        let back: PageInsertParameter =
            serde_json::from_str(&p.to_parameter_json().unwrap()).unwrap();
        assert_eq!(back, p);
        assert_eq!(wire(&p)["targetPage"], json!("3"));
    }

    #[test]
    fn text_watermark_round_trips() {
        let mut p = WatermarkParameter::text("CONFIDENTIAL");
        p.full_screen = true;
        p.opacity = 0.25;

        let json = wire(&p);
        assert_eq!(json["type"], json!("text"));
        assert_eq!(json["fullScreen"], json!("1"));
        assert_eq!(json["opacity"], json!("0.25"));

        let back: WatermarkParameter =
            serde_json::from_str(&p.to_parameter_json().unwrap()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn image_watermark_omits_text_fields() {
        let json = wire(&WatermarkParameter::image());
        assert!(json.get("content").is_none());
        assert!(json.get("textColor").is_none());
    }
}
