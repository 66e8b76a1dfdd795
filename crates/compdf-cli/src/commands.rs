// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations.

use std::path::PathBuf;
use std::process::ExitCode;

use compdf_client::{CompdfClient, UploadRequest};
use compdf_core::error::Result;
use compdf_core::types::{FileInfo, FileKey, TaskId, TaskInfo};
use compdf_tools::{RawParameter, ToolSelector};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::poll::{PollConfig, PollOutcome, wait_for_task};

/// Arguments of the `run` subcommand.
pub struct RunJob {
    pub tool: ToolSelector,
    pub file: PathBuf,
    pub password: Option<String>,
    pub parameter: Option<String>,
    pub image: Option<PathBuf>,
    pub image_name: Option<String>,
    pub wait: bool,
}

pub async fn tools(client: &CompdfClient) -> Result<ExitCode> {
    print_json(&client.get_tools().await?)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn assets(client: &CompdfClient) -> Result<ExitCode> {
    print_json(&client.get_asset_info().await?)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn tasks(client: &CompdfClient, page: u32, size: u32) -> Result<ExitCode> {
    print_json(&client.get_task_list(page, size).await?)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn task_info(client: &CompdfClient, task_id: TaskId) -> Result<ExitCode> {
    print_json(&client.get_task_info(&task_id).await?)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn file_info(client: &CompdfClient, file_key: FileKey) -> Result<ExitCode> {
    print_json(&client.get_file_info(&file_key, None).await?)?;
    Ok(ExitCode::SUCCESS)
}

/// create -> upload -> execute, then optionally wait and print the results.
pub async fn run_job(client: &CompdfClient, job: RunJob) -> Result<ExitCode> {
    // Validate the parameter before the task exists on the server.
    let parameter = job.parameter.map(RawParameter::new).transpose()?;

    let task_id = client.create_task(&job.tool, None).await?;

    let mut request = UploadRequest::new(&task_id, &job.file);
    if let Some(password) = job.password {
        request = request.password(password);
    }
    if let Some(parameter) = &parameter {
        request = request.parameter(parameter);
    }
    if let Some(image) = job.image {
        request = request.image(image);
    }
    if let Some(name) = job.image_name {
        request = request.image_name(name);
    }
    let uploaded = client.upload_file(&request).await?;

    client.execute_task(&task_id).await?;

    if !job.wait {
        print_json(&json!({
            "taskId": task_id,
            "fileKey": uploaded.file_key,
        }))?;
        return Ok(ExitCode::SUCCESS);
    }

    match wait_for_task(client, &task_id, &PollConfig::default()).await? {
        PollOutcome::Finished(task) => {
            let results = finished_files(client, &task, &uploaded.file_key).await?;
            info!(%task_id, files = results.len(), "task complete");
            print_json(&results)?;
            Ok(ExitCode::SUCCESS)
        }
        PollOutcome::Failed(task) => {
            print_json(&task)?;
            eprintln!("task {task_id} failed on the server");
            Ok(ExitCode::FAILURE)
        }
        PollOutcome::StillProcessing(task) => {
            warn!(%task_id, status = %task.task_status, "gave up waiting");
            eprintln!(
                "task {task_id} is still processing; check later with `compdf task-info {task_id}`"
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Download descriptors of a finished task. A task that lists no files is
/// looked up by the key of the file just uploaded.
async fn finished_files(
    client: &CompdfClient,
    task: &TaskInfo,
    uploaded: &FileKey,
) -> Result<Vec<FileInfo>> {
    if task.files.is_empty() {
        return Ok(vec![client.get_file_info(uploaded, None).await?]);
    }
    let mut results = Vec::with_capacity(task.files.len());
    for file in &task.files {
        match &file.file_key {
            Some(key) => results.push(client.get_file_info(key, None).await?),
            None => results.push(file.clone()),
        }
    }
    Ok(results)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdf_core::ClientConfig;
    use serde_json::Value;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task(data: Value) -> TaskInfo {
        serde_json::from_value(data).unwrap()
    }

    async fn client_for(server: &MockServer) -> CompdfClient {
        let config =
            ClientConfig::new("pk", "sk").with_base_url(format!("{}/server/", server.uri()));
        let client = CompdfClient::new(&config).unwrap();
        client.transport().tokens().set("tok", 3600);
        client
    }

    async fn mount_file_info(server: &MockServer, key: &str) {
        Mock::given(method("GET"))
            .and(path("/server/v1/file/fileInfo"))
            .and(query_param("fileKey", key))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "200",
                "msg": "success",
                "data": { "fileKey": key, "downloadUrl": format!("https://cdn.example/{key}.pdf") },
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn empty_file_list_falls_back_to_uploaded_key() {
        let server = MockServer::start().await;
        mount_file_info(&server, "uploaded-1").await;

        let client = client_for(&server).await;
        let finished = task(json!({ "taskId": "t-1", "taskStatus": "TaskFinish" }));
        let files = finished_files(&client, &finished, &FileKey::new("uploaded-1"))
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].is_ready());
    }

    #[tokio::test]
    async fn listed_files_are_each_looked_up() {
        let server = MockServer::start().await;
        mount_file_info(&server, "out-1").await;
        mount_file_info(&server, "out-2").await;

        let client = client_for(&server).await;
        let finished = task(json!({
            "taskId": "t-1",
            "taskStatus": "TaskFinish",
            "fileInfoDTOList": [{ "fileKey": "out-1" }, { "fileKey": "out-2" }],
        }));
        let files = finished_files(&client, &finished, &FileKey::new("uploaded-1"))
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(FileInfo::is_ready));
    }
}
