use sonar_gate_core::{GateError, GateVerdict, OutputSink, RunOutcome};
use tracing::error;

use crate::gate::GateReport;

/// Turns the pipeline result into console output, CI output and an outcome.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    sink: Option<OutputSink>,
}

impl Reporter {
    pub fn new(sink: Option<OutputSink>) -> Self {
        Self { sink }
    }

    pub fn report(&self, result: Result<GateReport, GateError>) -> RunOutcome {
        let outcome = match result {
            Ok(gate) => verdict_outcome(&gate),
            Err(e) => {
                println!("❌ {e}");
                error!(error = %e, "quality gate run failed");
                RunOutcome::error(e.to_string())
            }
        };

        let Some(sink) = &self.sink else {
            return outcome;
        };
        match sink.write_outcome(&outcome) {
            Ok(()) => outcome,
            Err(e) => {
                println!("❌ {e}");
                error!(error = %e, "CI output not written");
                RunOutcome::error(e.to_string())
            }
        }
    }
}

fn verdict_outcome(gate: &GateReport) -> RunOutcome {
    println!("🏁 Quality Gate: {}", gate.verdict);
    match &gate.verdict {
        GateVerdict::Passed => {
            println!("✅ Quality Gate passed successfully.");
            RunOutcome::ok("Quality Gate passed")
        }
        GateVerdict::Failing(status) => {
            println!("❌ Quality Gate failed.");
            for c in &gate.failing_conditions {
                println!(
                    "   {} {}: actual {} (threshold {} {})",
                    c.status,
                    c.metric_key,
                    c.actual_value.as_deref().unwrap_or("-"),
                    c.comparator.as_deref().unwrap_or("?"),
                    c.error_threshold.as_deref().unwrap_or("-"),
                );
            }
            println!("Full API Response: {}", gate.raw);
            RunOutcome::error(format!("Quality Gate failed with status {status}"))
        }
        GateVerdict::Missing => {
            let message = "Quality Gate status is None (SonarQube may still be processing). Try increasing wait time.";
            println!("❌ {message}");
            println!("Full API Response: {}", gate.raw);
            RunOutcome::error(message)
        }
    }
}
