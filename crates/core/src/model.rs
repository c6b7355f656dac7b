//! Domain values of one quality gate run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a SonarQube Compute Engine task as seen by one poll attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Terminal: the analysis was processed.
    Success,
    /// Terminal: the analysis could not be processed.
    Failed,
    /// Any other status string reported by the service (`PENDING`,
    /// `IN_PROGRESS`, `CANCELED`, ...). The task is still being waited on.
    Pending(String),
    /// The attempt could not observe a status (request failed, field absent).
    Unknown,
}

impl TaskStatus {
    /// Maps the raw `task.status` field.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("SUCCESS") => TaskStatus::Success,
            Some("FAILED") => TaskStatus::Failed,
            Some("") | None => TaskStatus::Unknown,
            Some(other) => TaskStatus::Pending(other.to_string()),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Success => f.write_str("SUCCESS"),
            TaskStatus::Failed => f.write_str("FAILED"),
            TaskStatus::Pending(s) => f.write_str(s),
            TaskStatus::Unknown => f.write_str("None"),
        }
    }
}

/// Verdict extracted from `projectStatus.status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    /// `OK`.
    Passed,
    /// Any other non-empty status, usually `ERROR`.
    Failing(String),
    /// Field absent or empty.
    Missing,
}

impl GateVerdict {
    /// Maps the raw `projectStatus.status` field.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("OK") => GateVerdict::Passed,
            Some("") | None => GateVerdict::Missing,
            Some(other) => GateVerdict::Failing(other.to_string()),
        }
    }
}

impl fmt::Display for GateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateVerdict::Passed => f.write_str("OK"),
            GateVerdict::Failing(s) => f.write_str(s),
            GateVerdict::Missing => f.write_str("None"),
        }
    }
}

/// Status tag exported to CI as `gate_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeStatus {
    /// Gate passed.
    Ok,
    /// Anything else.
    Error,
}

impl OutcomeStatus {
    /// Wire form used in the CI sink.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Ok => "OK",
            OutcomeStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of one invocation. Built once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// `OK` or `ERROR`.
    pub status: OutcomeStatus,
    /// Human-readable summary.
    pub message: String,
}

impl RunOutcome {
    /// Successful outcome.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Ok,
            message: message.into(),
        }
    }

    /// Failed outcome.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            message: message.into(),
        }
    }

    /// Process exit code: 0 for `OK`, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self.status {
            OutcomeStatus::Ok => 0,
            OutcomeStatus::Error => 1,
        }
    }
}
