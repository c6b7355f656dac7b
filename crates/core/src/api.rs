//! Wire models and URLs of the SonarQube Web API endpoints the waiter reads.

use serde::{Deserialize, Serialize};

use crate::config::GateLookup;
use crate::model::{GateVerdict, TaskStatus};

/// Response of `GET /api/ce/task`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Absent on some error bodies.
    #[serde(default)]
    pub task: Option<CeTask>,
}

/// Compute Engine task. Only the fields the waiter reports on are modeled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeTask {
    /// Task identifier (`ceTaskId`).
    #[serde(default)]
    pub id: Option<String>,
    /// `PENDING`, `IN_PROGRESS`, `SUCCESS`, `FAILED` or `CANCELED`.
    #[serde(default)]
    pub status: Option<String>,
    /// Analysis produced by the task, set once it succeeded.
    #[serde(default)]
    pub analysis_id: Option<String>,
    /// Failure reason of a `FAILED` task.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TaskResponse {
    /// Status of the nested task, `Unknown` when the task or field is absent.
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_wire(self.task.as_ref().and_then(|t| t.status.as_deref()))
    }

    /// `task.errorMessage`, when the service provided one.
    pub fn error_message(&self) -> Option<String> {
        self.task.as_ref().and_then(|t| t.error_message.clone())
    }
}

/// Response of `GET /api/qualitygates/project_status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusResponse {
    /// Absent when the service answered with an error body.
    #[serde(default)]
    pub project_status: Option<ProjectStatus>,
}

/// Gate evaluation of the project or analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectStatus {
    /// Gate verdict, `OK` or `ERROR`.
    #[serde(default)]
    pub status: Option<String>,
    /// Every threshold the gate checked.
    #[serde(default)]
    pub conditions: Vec<GateCondition>,
}

/// One threshold of the quality gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateCondition {
    /// `OK` or `ERROR` for this threshold.
    #[serde(default)]
    pub status: String,
    /// Metric the threshold applies to, e.g. `new_coverage`.
    #[serde(default)]
    pub metric_key: String,
    /// `LT` or `GT`.
    #[serde(default)]
    pub comparator: Option<String>,
    /// Value the metric is compared against.
    #[serde(default)]
    pub error_threshold: Option<String>,
    /// Measured value.
    #[serde(default)]
    pub actual_value: Option<String>,
}

impl ProjectStatusResponse {
    /// Verdict at `projectStatus.status`.
    pub fn verdict(&self) -> GateVerdict {
        GateVerdict::from_wire(self.project_status.as_ref().and_then(|p| p.status.as_deref()))
    }

    /// Conditions whose own status is not `OK`.
    pub fn failing_conditions(&self) -> Vec<GateCondition> {
        self.project_status
            .as_ref()
            .map(|p| {
                p.conditions
                    .iter()
                    .filter(|c| c.status != "OK")
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Status URL of a Compute Engine task. The base URL is used verbatim.
pub fn task_url(base_url: &str, task_id: &str) -> String {
    format!("{base_url}/api/ce/task?id={task_id}")
}

/// Gate status URL, keyed by project key or analysis id.
pub fn gate_url(base_url: &str, lookup: GateLookup, key: &str) -> String {
    format!(
        "{base_url}/api/qualitygates/project_status?{}={key}",
        lookup.query_param()
    )
}
