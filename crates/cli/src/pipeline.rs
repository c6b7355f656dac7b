use sonar_gate_core::{Config, GateError, ReportArtifact, RunOutcome};
use tracing::info;

use crate::client::SonarClient;
use crate::gate::{fetch_gate, GateReport};
use crate::poller::wait_for_task;
use crate::reporter::Reporter;

/// Report artifact -> task poll -> gate query. Stops at the first fatal error.
///
/// The artifact is parsed before any request is made, so a malformed report
/// never reaches the network.
pub async fn run(config: &Config, client: &SonarClient) -> Result<GateReport, GateError> {
    let report = ReportArtifact::load(&config.report_path, config.gate_lookup)?;
    let gate_key = report.gate_key(config.gate_lookup)?;

    println!("🔎 Analysis ID: {}", report.ce_task_id);
    if let Some(project_key) = &report.project_key {
        println!("📦 Project Key: {project_key}");
    }
    println!("⏳ Waiting for SonarQube analysis to finish...");

    let summary = wait_for_task(client, &report.ce_task_id, &config.poll).await?;
    info!(
        task_id = %report.ce_task_id,
        attempts = summary.attempts,
        analysis_id = summary.task.task.as_ref().and_then(|t| t.analysis_id.as_deref()),
        "analysis processed"
    );

    println!("📊 Fetching Quality Gate status...");
    let gate = fetch_gate(client, config.gate_lookup, gate_key).await?;
    if let Some(url) = &report.dashboard_url {
        println!("🔗 Dashboard: {url}");
    }
    Ok(gate)
}

/// Runs the pipeline and reports the result through the configured sink.
pub async fn execute(config: &Config) -> RunOutcome {
    let reporter = Reporter::new(config.output_sink.clone());
    let result = match SonarClient::new(config) {
        Ok(client) => run(config, &client).await,
        Err(e) => Err(e),
    };
    reporter.report(result)
}
