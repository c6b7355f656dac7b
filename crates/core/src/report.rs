//! Parser for the `report-task.txt` artifact written by the SonarScanner.

use std::path::Path;

use tracing::debug;

use crate::config::GateLookup;
use crate::error::GateError;

const CE_TASK_ID: &str = "ceTaskId";
const PROJECT_KEY: &str = "projectKey";
const DASHBOARD_URL: &str = "dashboardUrl";

/// Identifiers read from the report artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// Compute Engine task to poll.
    pub ce_task_id: String,
    /// Absent only when the gate lookup does not need it.
    pub project_key: Option<String>,
    /// Link to the project dashboard, informational.
    pub dashboard_url: Option<String>,
}

impl ReportArtifact {
    /// Reads and parses the artifact at `path`.
    pub fn load(path: &Path, lookup: GateLookup) -> Result<Self, GateError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                GateError::ArtifactNotFound(path.to_path_buf())
            } else {
                GateError::ArtifactUnreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        debug!(path = %path.display(), "parsing report artifact");
        Self::parse(&contents, lookup)
    }

    /// Extracts the identifiers from `key=value` lines.
    ///
    /// Values run from the first `=` to the end of the line, so a value may
    /// itself contain `=`. The first non-empty occurrence of a key wins; an
    /// empty value is treated as if the line were absent.
    pub fn parse(contents: &str, lookup: GateLookup) -> Result<Self, GateError> {
        let mut ce_task_id = None;
        let mut project_key = None;
        let mut dashboard_url = None;

        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let slot = match key.trim_start() {
                CE_TASK_ID => &mut ce_task_id,
                PROJECT_KEY => &mut project_key,
                DASHBOARD_URL => &mut dashboard_url,
                _ => continue,
            };
            let value = value.trim();
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.to_string());
            }
            if ce_task_id.is_some() && project_key.is_some() && dashboard_url.is_some() {
                break;
            }
        }

        let ce_task_id = ce_task_id.ok_or(GateError::MissingField(CE_TASK_ID))?;
        if lookup.needs_project_key() && project_key.is_none() {
            return Err(GateError::MissingField(PROJECT_KEY));
        }

        Ok(Self {
            ce_task_id,
            project_key,
            dashboard_url,
        })
    }

    /// Identifier the gate query is keyed on.
    pub fn gate_key(&self, lookup: GateLookup) -> Result<&str, GateError> {
        match lookup {
            GateLookup::AnalysisId => Ok(&self.ce_task_id),
            GateLookup::ProjectKey => self
                .project_key
                .as_deref()
                .ok_or(GateError::MissingField(PROJECT_KEY)),
        }
    }
}
