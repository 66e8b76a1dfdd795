// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Task lifecycle client.
//
// A task is created for one tool, receives one or more uploaded files,
// is started, and is then observed until the server reports it finished:
//
//   create_task -> upload_file (xN) -> execute_task -> get_task_info (poll)
//                                                    -> get_file_info
//
// The client keeps no task state of its own. Ordering rules such as "no
// uploads after execute" or the per-task file limit are enforced by the
// server and surface as `CompdfError::Api`. There is no waiting loop here;
// callers poll `get_task_info` with their own backoff.

use std::path::{Path, PathBuf};

use compdf_core::config::ClientConfig;
use compdf_core::error::{CompdfError, Result};
use compdf_core::types::{
    CreateTaskResult, ExecuteResult, FileInfo, FileKey, Language, TaskId, TaskInfo, ToolInfo,
    UploadFileResult,
};
use compdf_tools::{FileParameter, ToolSelector};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::endpoints;
use crate::transport::{FormValue, Transport};

/// Client for the ComPDF task API.
#[derive(Debug)]
pub struct CompdfClient {
    transport: Transport,
    language: Language,
}

impl CompdfClient {
    /// Build a client from configuration. No request is made until the
    /// first operation, which also fetches the first access token.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            language: config.language,
        })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Language used when an operation is not given one explicitly.
    pub fn language(&self) -> Language {
        self.language
    }

    /// List the tools the account may use.
    #[instrument(skip(self))]
    pub async fn get_tools(&self) -> Result<Vec<ToolInfo>> {
        let tools: Option<Vec<ToolInfo>> = self
            .transport
            .request(Method::GET, endpoints::TOOL_SUPPORT, &[], None)
            .await?;
        let tools = tools.unwrap_or_default();
        debug!(count = tools.len(), "tools listed");
        Ok(tools)
    }

    /// Create a task for `tool`.
    ///
    /// The selector is resolved before anything is sent, so an unusable
    /// selector fails with [`CompdfError::InvalidArgument`] and no request.
    #[instrument(skip(self, tool), fields(tool = %tool))]
    pub async fn create_task(
        &self,
        tool: &ToolSelector,
        language: Option<Language>,
    ) -> Result<TaskId> {
        let tool_path = tool.resolve()?;
        let language = language.unwrap_or(self.language);
        let created: CreateTaskResult = self
            .transport
            .request(
                Method::GET,
                &endpoints::create_task(&tool_path),
                &[("language", language.as_param())],
                None,
            )
            .await?;
        info!(task_id = %created.task_id, "task created");
        Ok(created.task_id)
    }

    /// Upload one file into an existing task.
    ///
    /// The local file (and image, if any) must exist; otherwise this fails
    /// with [`CompdfError::InvalidArgument`] before any request is made.
    #[instrument(
        skip(self, request),
        fields(task_id = %request.task_id, file = %request.file.display())
    )]
    pub async fn upload_file(&self, request: &UploadRequest<'_>) -> Result<UploadFileResult> {
        let file_name = local_file_name(&request.file).await?;
        let language = request.language.unwrap_or(self.language);

        let mut fields = vec![
            text("taskId", request.task_id.as_str()),
            (
                "file".to_string(),
                FormValue::File {
                    path: request.file.clone(),
                    file_name,
                },
            ),
            text("language", language.as_param()),
        ];

        if let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) {
            fields.push(text("password", password));
        }
        if let Some(parameter) = request.parameter {
            fields.push(text("parameter", parameter.to_parameter_json()?));
        }
        if let Some(image) = &request.image {
            let default_name = local_file_name(image).await?;
            let image_name = request
                .image_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(default_name);
            fields.push((
                "image".to_string(),
                FormValue::File {
                    path: image.clone(),
                    file_name: image_name,
                },
            ));
        }

        let uploaded: UploadFileResult = self.transport.upload(endpoints::UPLOAD_FILE, fields).await?;
        info!(file_key = %uploaded.file_key, "file uploaded");
        Ok(uploaded)
    }

    /// Start processing the task's uploaded files.
    ///
    /// Calling this twice for one task is left to the server to judge.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn execute_task(&self, task_id: &TaskId) -> Result<ExecuteResult> {
        let started: Option<ExecuteResult> = self
            .transport
            .request(Method::GET, endpoints::EXECUTE_TASK, &self.task_query(task_id), None)
            .await?;
        info!("task execution started");
        Ok(started.unwrap_or_default())
    }

    /// Fetch the task's current status and per-file details. Single shot.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn get_task_info(&self, task_id: &TaskId) -> Result<TaskInfo> {
        let info: TaskInfo = self
            .transport
            .request(Method::GET, endpoints::TASK_INFO, &self.task_query(task_id), None)
            .await?;
        debug!(status = %info.task_status, files = info.files.len(), "task info received");
        Ok(info)
    }

    /// Fetch the download descriptor of one file.
    ///
    /// Before the owning task has finished the server may return an empty or
    /// partial descriptor; that is passed through as is.
    #[instrument(skip(self), fields(file_key = %file_key))]
    pub async fn get_file_info(
        &self,
        file_key: &FileKey,
        language: Option<Language>,
    ) -> Result<FileInfo> {
        let language = language.unwrap_or(self.language);
        let info: Option<FileInfo> = self
            .transport
            .request(
                Method::GET,
                endpoints::FILE_INFO,
                &[
                    ("fileKey", file_key.to_string()),
                    ("language", language.as_param()),
                ],
                None,
            )
            .await?;
        Ok(info.unwrap_or_default())
    }

    /// Account balance and package details, as returned by the server.
    #[instrument(skip(self))]
    pub async fn get_asset_info(&self) -> Result<Value> {
        self.transport
            .request(Method::GET, endpoints::ASSET_INFO, &[], None)
            .await
    }

    /// One page of the account's task history, as returned by the server.
    #[instrument(skip(self))]
    pub async fn get_task_list(&self, page: u32, size: u32) -> Result<Value> {
        self.transport
            .request(
                Method::GET,
                endpoints::TASK_LIST,
                &[("page", page.to_string()), ("pageSize", size.to_string())],
                None,
            )
            .await
    }

    fn task_query(&self, task_id: &TaskId) -> [(&'static str, String); 2] {
        [
            ("taskId", task_id.to_string()),
            ("language", self.language.as_param()),
        ]
    }
}

/// Everything needed for one `upload_file` call.
///
/// ```no_run
/// # use compdf_client::UploadRequest;
/// # use compdf_core::TaskId;
/// # use compdf_tools::param::CompressParameter;
/// let task = TaskId::new("task-1");
/// let parameter = CompressParameter::default();
/// let request = UploadRequest::new(&task, "report.pdf").parameter(&parameter);
/// ```
#[derive(Clone)]
pub struct UploadRequest<'a> {
    task_id: TaskId,
    file: PathBuf,
    password: Option<String>,
    parameter: Option<&'a dyn FileParameter>,
    image: Option<PathBuf>,
    image_name: Option<String>,
    language: Option<Language>,
}

impl<'a> UploadRequest<'a> {
    pub fn new(task_id: &TaskId, file: impl Into<PathBuf>) -> Self {
        Self {
            task_id: task_id.clone(),
            file: file.into(),
            password: None,
            parameter: None,
            image: None,
            image_name: None,
            language: None,
        }
    }

    /// Password of an encrypted input document.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn parameter(mut self, parameter: &'a dyn FileParameter) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Companion image, e.g. the picture of an image watermark.
    pub fn image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Name sent for the image part. Defaults to the image's file name.
    pub fn image_name(mut self, name: impl Into<String>) -> Self {
        self.image_name = Some(name.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl std::fmt::Debug for UploadRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("task_id", &self.task_id)
            .field("file", &self.file)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("parameter", &self.parameter.is_some())
            .field("image", &self.image)
            .field("image_name", &self.image_name)
            .field("language", &self.language)
            .finish()
    }
}

fn text(name: &str, value: impl Into<String>) -> (String, FormValue) {
    (name.to_string(), FormValue::Text(value.into()))
}

/// File name of an existing regular file at `path`.
async fn local_file_name(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            CompdfError::invalid_argument(format!("'{}' has no file name", path.display()))
        })?
        .to_str()
        .ok_or_else(|| {
            CompdfError::invalid_argument(format!(
                "file name of '{}' is not valid UTF-8",
                path.display()
            ))
        })?
        .to_string();

    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(name),
        Ok(_) => Err(CompdfError::invalid_argument(format!(
            "'{}' is not a regular file",
            path.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CompdfError::invalid_argument(
            format!("file not found: {}", path.display()),
        )),
        Err(e) => Err(CompdfError::Io(e)),
    }
}
