//! Error taxonomy of a quality gate run.

use std::path::PathBuf;

use thiserror::Error;

/// Every way a quality gate run can fail.
///
/// A failing gate verdict is not listed here: it is a legitimate outcome and
/// lives in [`crate::GateVerdict`].
#[derive(Debug, Error)]
pub enum GateError {
    /// A required setting (environment variable or flag) is absent or empty.
    #[error("environment variable {0} not set")]
    ConfigurationMissing(&'static str),
    /// A tunable was given a value the run cannot work with.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Flag name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The report artifact does not exist.
    #[error("report file not found at {}", .0.display())]
    ArtifactNotFound(PathBuf),
    /// The report artifact exists but could not be read.
    #[error("cannot read report file {}: {source}", .path.display())]
    ArtifactUnreadable {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The report artifact lacks a required key.
    #[error("could not extract {0} from report-task.txt")]
    MissingField(&'static str),
    /// A single request failed (network, HTTP status or body decoding).
    #[error("error calling SonarQube API: {0}")]
    Transport(String),
    /// The background task finished in the `FAILED` state.
    #[error("SonarQube background task {task_id} failed{}", detail_suffix(.detail))]
    UpstreamTaskFailed {
        /// Task identifier.
        task_id: String,
        /// Error message reported by the service, if any.
        detail: Option<String>,
    },
    /// The task never reached a terminal state within the attempt budget.
    #[error("timeout waiting for SonarQube to finish after {attempts} attempts")]
    PollTimeout {
        /// Attempts made.
        attempts: u32,
    },
    /// The single gate status query failed.
    #[error("error fetching Quality Gate status: {0}")]
    GateQueryFailed(String),
    /// Appending to the CI output sink failed.
    #[error("cannot append to CI output file {}: {source}", .path.display())]
    SinkWriteFailed {
        /// Sink path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(": {d}"),
        _ => String::new(),
    }
}

impl GateError {
    /// Errors a poll attempt swallows instead of aborting the loop.
    pub fn is_transient(&self) -> bool {
        matches!(self, GateError::Transport(_))
    }
}
