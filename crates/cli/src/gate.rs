use sonar_gate_core::api::{GateCondition, ProjectStatusResponse};
use sonar_gate_core::{GateError, GateLookup, GateVerdict};
use tracing::info;

use crate::client::SonarClient;

/// Result of the quality gate query.
#[derive(Debug, Clone)]
pub struct GateReport {
    pub verdict: GateVerdict,
    /// Conditions the service marked as not `OK`.
    pub failing_conditions: Vec<GateCondition>,
    /// Response body as received, for operators.
    pub raw: String,
}

/// Issues exactly one gate status query. A non-`OK` verdict is returned as a
/// value, only a failed query is an error.
pub async fn fetch_gate(
    client: &SonarClient,
    lookup: GateLookup,
    key: &str,
) -> Result<GateReport, GateError> {
    let raw = client
        .project_status(lookup, key)
        .await
        .map_err(|e| match e {
            GateError::Transport(cause) => GateError::GateQueryFailed(cause),
            other => other,
        })?;
    let parsed: ProjectStatusResponse = serde_json::from_str(&raw)
        .map_err(|e| GateError::GateQueryFailed(format!("decode project status: {e}")))?;

    let verdict = parsed.verdict();
    info!(lookup = lookup.query_param(), key, %verdict, "quality gate fetched");
    Ok(GateReport {
        verdict,
        failing_conditions: parsed.failing_conditions(),
        raw,
    })
}
