use sonar_gate_core::api::TaskResponse;
use sonar_gate_core::{GateError, PollPolicy, TaskStatus};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::client::SonarClient;

/// How the poll loop ended successfully.
#[derive(Debug, Clone)]
pub struct PollSummary {
    /// Status requests issued, including the successful one.
    pub attempts: u32,
    /// Body of the `SUCCESS` response.
    pub task: TaskResponse,
}

/// Polls the Compute Engine task until it reaches `SUCCESS` or `FAILED`.
///
/// A request that fails (network, HTTP status, decoding) only costs that
/// attempt; the loop keeps going. `FAILED` aborts at once. After `SUCCESS`
/// the loop sleeps `policy.grace` before returning so the gate status is
/// computed by the time the caller asks for it.
pub async fn wait_for_task(
    client: &SonarClient,
    task_id: &str,
    policy: &PollPolicy,
) -> Result<PollSummary, GateError> {
    for attempt in 1..=policy.max_attempts {
        let (status, task) = match client.task(task_id).await {
            Ok(task) => (task.status(), Some(task)),
            Err(e) if e.is_transient() => {
                println!("⚠️ {e}");
                warn!(task_id, attempt, error = %e, "task status request failed");
                (TaskStatus::Unknown, None)
            }
            Err(e) => return Err(e),
        };
        println!("Attempt {attempt}: {status}");
        debug!(task_id, attempt, %status, "task status");

        match status {
            TaskStatus::Success => {
                println!(
                    "✅ Analysis processing completed. Waiting {}s for Quality Gate status...",
                    policy.grace.as_secs_f64()
                );
                info!(task_id, attempt, "task succeeded");
                sleep(policy.grace).await;
                return Ok(PollSummary {
                    attempts: attempt,
                    task: task.unwrap_or_default(),
                });
            }
            TaskStatus::Failed => {
                return Err(GateError::UpstreamTaskFailed {
                    task_id: task_id.to_string(),
                    detail: task.and_then(|t| t.error_message()),
                });
            }
            TaskStatus::Pending(_) | TaskStatus::Unknown => {
                if attempt < policy.max_attempts {
                    sleep(policy.interval).await;
                }
            }
        }
    }

    Err(GateError::PollTimeout {
        attempts: policy.max_attempts,
    })
}
