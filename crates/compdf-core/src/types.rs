// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the ComPDF client: credentials, identifiers, task
// status, and the payloads carried in the `data` field of API responses.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CompdfError;
use crate::lenient;

/// Status string the API reports once every file of a task is processed.
pub const TASK_FINISH: &str = "TaskFinish";

/// Public/secret key pair issued for an API project. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Language of the log and error messages produced by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    /// Numeric code sent in the `language` query/form field.
    pub fn code(self) -> u8 {
        match self {
            Self::English => 1,
            Self::Chinese => 2,
        }
    }

    pub fn as_param(self) -> String {
        self.code().to_string()
    }
}

impl FromStr for Language {
    type Err = CompdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" | "1" => Ok(Self::English),
            "chinese" | "zh" | "2" => Ok(Self::Chinese),
            other => Err(CompdfError::invalid_argument(format!(
                "unknown language '{other}' (expected english or chinese)"
            ))),
        }
    }
}

/// Server-issued identifier of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

/// Server-issued identifier of an uploaded or produced file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileKey(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(TaskId);
string_id!(FileKey);

/// Lifecycle state of a remote task as reported by the task-info call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Created, queued or running on the server.
    Processing,
    /// Every file has been processed; results can be fetched.
    Finished,
    /// The server gave up on the task.
    Failed,
    /// A status string this client does not know.
    Unknown(String),
}

impl TaskStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            TASK_FINISH => Self::Finished,
            "TaskStart" | "TaskWaiting" | "TaskProcessing" => Self::Processing,
            "TaskFail" | "TaskFailed" | "TaskOverdue" => Self::Failed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// True once the status can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }
}

/// Upload file formats, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Docx,
    Xlsx,
    Pptx,
    Txt,
    Html,
    Csv,
    Rtf,
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl FileFormat {
    /// MIME type used for the multipart file part.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Txt => "text/plain",
            Self::Html => "text/html",
            Self::Csv => "text/csv",
            Self::Rtf => "application/rtf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" | "doc" => Some(Self::Docx),
            "xlsx" | "xls" => Some(Self::Xlsx),
            "pptx" | "ppt" => Some(Self::Pptx),
            "txt" => Some(Self::Txt),
            "html" | "htm" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            "rtf" => Some(Self::Rtf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// MIME type for a file name, `application/octet-stream` when unknown.
    pub fn mime_for(file_name: &str) -> &'static str {
        std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .map(|f| f.mime_type())
            .unwrap_or("application/octet-stream")
    }
}

// ---------------------------------------------------------------------------
// Response payloads (the `data` field of the envelope)
// ---------------------------------------------------------------------------

/// Result of the public/secret key exchange.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    pub access_token: String,
    /// Token lifetime in seconds.
    #[serde(deserialize_with = "lenient::u64")]
    pub expires_in: u64,
}

/// One entry of the supported-tools listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolInfo {
    #[serde(default, alias = "toolName")]
    pub name: Option<String>,
    #[serde(default, alias = "url", alias = "path")]
    pub endpoint: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskResult {
    pub task_id: TaskId,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResult {
    pub file_key: FileKey,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Acknowledgment returned by the execute call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResult {
    #[serde(default)]
    pub task_id: Option<TaskId>,
}

/// Descriptor of a single file of a task: its state and, once processed,
/// where to download the result.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    #[serde(default)]
    pub file_key: Option<FileKey>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub file_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub convert_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub convert_time: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub failure_code: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl FileInfo {
    /// True when the server has published a download location.
    pub fn is_ready(&self) -> bool {
        self.download_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// Snapshot of a task returned by one task-info poll.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub task_id: TaskId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub task_status: String,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub task_file_num: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub task_success_num: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub task_fail_num: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub task_cost: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub task_time: Option<u64>,
    #[serde(default, rename = "fileInfoDTOList", alias = "files")]
    pub files: Vec<FileInfo>,
}

impl TaskInfo {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::parse(&self.task_status)
    }
}
