// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Endpoint paths, relative to the configured base address.

pub const OAUTH_TOKEN: &str = "v1/oauth/token";
pub const TOOL_SUPPORT: &str = "v1/tool/support";
pub const UPLOAD_FILE: &str = "v1/file/upload";
pub const EXECUTE_TASK: &str = "v1/execute/start";
pub const TASK_INFO: &str = "v1/task/taskInfo";
pub const FILE_INFO: &str = "v1/file/fileInfo";
pub const ASSET_INFO: &str = "v1/asset/info";
pub const TASK_LIST: &str = "v1/task/list";

/// Create-task path for a resolved tool endpoint, e.g. `v1/task/pdf/compress`.
pub fn create_task(tool_path: &str) -> String {
    format!("v1/task/{tool_path}")
}
