// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Task lifecycle against a mock ComPDF server.

use chrono::Utc;
use compdf_client::{CompdfClient, UploadRequest};
use compdf_core::{ClientConfig, CompdfError, FileKey, Language, TaskId, TaskStatus};
use compdf_tools::param::CompressParameter;
use compdf_tools::{EditorKind, ToolSelector};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": "200",
        "msg": "success",
        "data": data,
    }))
}

fn client_for(server: &MockServer) -> CompdfClient {
    let config =
        ClientConfig::new("public-key", "secret-key").with_base_url(format!("{}/server/", server.uri()));
    CompdfClient::new(&config).unwrap()
}

async fn mount_auth(server: &MockServer, token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/server/v1/oauth/token"))
        .and(body_json(json!({
            "publicKey": "public-key",
            "secretKey": "secret-key",
        })))
        .respond_with(ok(json!({ "accessToken": token, "expiresIn": "7200" })))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn token_is_fetched_once_and_reused() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/server/v1/tool/support"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ok(json!([
            { "toolName": "pdf/docx", "url": "pdf/docx" },
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.get_tools().await.unwrap();
    let second = client.get_tools().await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].endpoint.as_deref(), Some("pdf/docx"));
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn exchange_is_unauthenticated_and_yields_future_expiry() {
    let server = MockServer::start().await;
    mount_auth(&server, "t", 1).await;

    let client = client_for(&server);
    let tokens = client.transport().tokens();
    assert_eq!(tokens.get_token().await.unwrap(), "t");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(tokens.current().unwrap().expires_at() > Utc::now());

    assert_eq!(tokens.get_token().await.unwrap(), "t");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn expired_token_is_refreshed_exactly_once() {
    let server = MockServer::start().await;
    mount_auth(&server, "fresh", 1).await;
    Mock::given(method("GET"))
        .and(path("/server/v1/asset/info"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ok(json!({ "remainingFiles": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.transport().tokens().set("stale", 0);

    let assets = client.get_asset_info().await.unwrap();
    assert_eq!(assets["remainingFiles"], 42);
    assert_eq!(client.transport().tokens().current().unwrap().value(), "fresh");
}

#[tokio::test]
async fn rejected_credentials_surface_as_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "01001",
            "msg": "public key or secret key is invalid",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/server/v1/tool/support"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.get_tools().await {
        Err(CompdfError::Authentication { code, message }) => {
            assert_eq!(code, "01001");
            assert_eq!(message, "public key or secret key is invalid");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn api_error_code_and_message_pass_through() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/server/v1/task/taskInfo"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "4001001",
            "msg": "bad token",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_task_info(&TaskId::new("t-1")).await.unwrap_err();
    match err {
        CompdfError::Api { code, message } => {
            assert_eq!(code, "4001001");
            assert_eq!(message, "bad token");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_envelope_failure_uses_http_status() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/server/v1/asset/info"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_asset_info().await.unwrap_err();
    assert_eq!(err.code(), Some("502"));
}

#[tokio::test]
async fn invalid_arguments_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .create_task(&ToolSelector::raw("  "), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CompdfError::InvalidArgument(_)));

    let task = TaskId::new("t-1");
    let err = client
        .upload_file(&UploadRequest::new(&task, "/no/such/file.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompdfError::InvalidArgument(_)));
}

#[tokio::test]
async fn task_list_sends_paging_query() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path("/server/v1/task/list"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "10"))
        .respond_with(ok(json!({ "total": 0, "list": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client.get_task_list(2, 10).await.unwrap();
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn compress_document_end_to_end() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/server/v1/task/pdf/compress"))
        .and(query_param("language", "2"))
        .respond_with(ok(json!({ "taskId": "task-42" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/server/v1/file/upload"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_string_contains("task-42"))
        .and(body_string_contains(r#"filename="report.pdf""#))
        .and(body_string_contains(r#"{"quality":"30"}"#))
        .and(body_string_contains("secret-pdf-password"))
        .and(body_string_contains("%PDF-1.7 test document"))
        .respond_with(ok(json!({
            "fileKey": "file-7",
            "taskId": "task-42",
            "fileName": "report.pdf",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/server/v1/execute/start"))
        .and(query_param("taskId", "task-42"))
        .respond_with(ok(json!({ "taskId": "task-42" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/server/v1/task/taskInfo"))
        .and(query_param("taskId", "task-42"))
        .respond_with(ok(json!({
            "taskId": "task-42",
            "taskStatus": "TaskFinish",
            "taskFileNum": 1,
            "taskSuccessNum": "1",
            "fileInfoDTOList": [{
                "fileKey": "file-7",
                "fileName": "report.pdf",
                "status": "success",
                "downloadUrl": "https://cdn.example/report.pdf",
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/server/v1/file/fileInfo"))
        .and(query_param("fileKey", "file-7"))
        .respond_with(ok(json!({
            "fileKey": "file-7",
            "downloadUrl": "https://cdn.example/report.pdf",
            "fileSize": "2048",
            "convertSize": 1024,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    std::fs::write(&input, "%PDF-1.7 test document").unwrap();

    let client = client_for(&server);
    let task_id = client
        .create_task(
            &ToolSelector::Editor(EditorKind::Compress),
            Some(Language::Chinese),
        )
        .await
        .unwrap();
    assert_eq!(task_id.as_str(), "task-42");

    let parameter = CompressParameter::new(30).unwrap();
    let uploaded = client
        .upload_file(
            &UploadRequest::new(&task_id, &input)
                .password("secret-pdf-password")
                .parameter(&parameter),
        )
        .await
        .unwrap();
    assert_eq!(uploaded.file_key, FileKey::new("file-7"));

    client.execute_task(&task_id).await.unwrap();

    let info = client.get_task_info(&task_id).await.unwrap();
    assert_eq!(info.status(), TaskStatus::Finished);
    assert_eq!(info.task_success_num, Some(1));
    assert_eq!(info.files.len(), 1);

    let file = client.get_file_info(&uploaded.file_key, None).await.unwrap();
    assert!(file.is_ready());
    assert_eq!(file.file_size, Some(2048));
}

#[tokio::test]
async fn image_part_defaults_to_image_file_name() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/server/v1/file/upload"))
        .and(body_string_contains(r#"name="image"; filename="stamp.png""#))
        .respond_with(ok(json!({ "fileKey": "file-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.pdf");
    let image = dir.path().join("stamp.png");
    std::fs::write(&input, "%PDF-1.7").unwrap();
    std::fs::write(&image, "not really a png").unwrap();

    let client = client_for(&server);
    let task = TaskId::new("task-1");
    let uploaded = client
        .upload_file(&UploadRequest::new(&task, &input).image(&image))
        .await
        .unwrap();
    assert_eq!(uploaded.file_key.as_str(), "file-1");
}
