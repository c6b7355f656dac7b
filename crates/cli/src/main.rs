#![forbid(unsafe_code)]

//! `sonar-gate`: CI step that waits for the SonarQube quality gate.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sonar_gate::cli::{env_output_sink, usage_error, Cli};
use sonar_gate::{execute, Reporter};
use sonar_gate_core::GateError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            let outcome = Reporter::new(env_output_sink()).report(Err(usage_error(&e)));
            return ExitCode::from(outcome.exit_code());
        }
    };

    if let Err(e) = init_tracing(cli.log.as_deref()) {
        let err = GateError::InvalidSetting {
            name: "log",
            reason: format!("{e:#}"),
        };
        let outcome = Reporter::new(cli.output_sink()).report(Err(err));
        return ExitCode::from(outcome.exit_code());
    }

    let outcome = match cli.to_config() {
        Ok(config) => {
            debug!(?config, "configuration resolved");
            execute(&config).await
        }
        Err(e) => Reporter::new(cli.output_sink()).report(Err(e)),
    };

    ExitCode::from(outcome.exit_code())
}

fn init_tracing(directive: Option<&str>) -> anyhow::Result<()> {
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d).with_context(|| format!("invalid filter {d:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("install tracing subscriber")
}
