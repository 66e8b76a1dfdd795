// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Waiting for a task to finish.
//
// The client only offers a single-shot status call, so the CLI polls it with
// exponential backoff plus jitter until the task is finished or failed, or
// the attempt budget runs out.

use std::time::Duration;

use compdf_client::CompdfClient;
use compdf_core::error::Result;
use compdf_core::types::{TaskId, TaskInfo, TaskStatus};
use tracing::{debug, info, instrument, warn};

/// Polling configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum number of status calls. At least one call is always made.
    pub max_attempts: u32,
    /// Delay before the second call; doubled after every further call.
    pub base_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(15),
        }
    }
}

/// How waiting for a task ended. Each variant carries the last snapshot.
#[derive(Debug)]
pub enum PollOutcome {
    Finished(TaskInfo),
    Failed(TaskInfo),
    /// The attempt budget ran out while the task was still running.
    StillProcessing(TaskInfo),
}

/// Poll `get_task_info` until the task reaches a terminal state.
///
/// Errors from the status call end the wait immediately.
#[instrument(skip(client, config), fields(task_id = %task_id))]
pub async fn wait_for_task(
    client: &CompdfClient,
    task_id: &TaskId,
    config: &PollConfig,
) -> Result<PollOutcome> {
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        let info = client.get_task_info(task_id).await?;
        attempt += 1;

        match info.status() {
            TaskStatus::Finished => {
                info!(attempt, "task finished");
                return Ok(PollOutcome::Finished(info));
            }
            TaskStatus::Failed => {
                warn!(attempt, status = %info.task_status, "task failed");
                return Ok(PollOutcome::Failed(info));
            }
            TaskStatus::Processing | TaskStatus::Unknown(_) => {
                if attempt >= max_attempts {
                    warn!(attempt, status = %info.task_status, "poll limit exhausted");
                    return Ok(PollOutcome::StillProcessing(info));
                }
                let delay = compute_delay(attempt - 1, config);
                debug!(attempt, status = %info.task_status, delay_ms = delay.as_millis(), "task still running");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// delay = min(base * 2^attempt + jitter, max_delay), jitter in [0, base).
fn compute_delay(attempt: u32, config: &PollConfig) -> Duration {
    let base_ms = u64::try_from(config.base_delay.as_millis()).unwrap_or(u64::MAX);
    let max_ms = u64::try_from(config.max_delay.as_millis()).unwrap_or(u64::MAX);
    let exp_ms = base_ms.saturating_mul(1u64 << attempt.min(10));
    let total_ms = exp_ms.saturating_add(jitter(base_ms, attempt));
    Duration::from_millis(total_ms.min(max_ms))
}

/// Deterministic spread over [0, base_ms).
fn jitter(base_ms: u64, attempt: u32) -> u64 {
    let hash = u64::from(attempt).wrapping_mul(6364136223846793005);
    hash % base_ms.max(1)
}
