use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use sonar_gate_core::config::{DEFAULT_REPORT_PATH, HOST_URL_ENV, TOKEN_ENV};
use sonar_gate_core::{Config, GateError, GateLookup, OutputSink, PollPolicy};

/// CI output file variable, also read directly when the flags don't parse.
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Sink named by `GITHUB_OUTPUT`, for failures that happen before a `Cli`
/// exists.
pub fn env_output_sink() -> Option<OutputSink> {
    std::env::var_os(OUTPUT_ENV)
        .filter(|p| !p.is_empty())
        .map(OutputSink::new)
}

/// Turns a clap parse failure into the run's configuration error.
pub fn usage_error(err: &clap::Error) -> GateError {
    let reason = err
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    GateError::InvalidSetting {
        name: "arguments",
        reason,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sonar-gate",
    version,
    about = "Wait for a SonarQube analysis and fail on a red quality gate"
)]
pub struct Cli {
    /// SonarQube base URL, e.g. https://sonar.example.com (used as-is).
    #[arg(long, env = HOST_URL_ENV)]
    pub host_url: Option<String>,

    /// Access token; sent as the basic auth username.
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Report written by the scanner.
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report_file: PathBuf,

    /// Identifier the quality gate is looked up by.
    #[arg(long, value_enum, default_value_t = LookupArg::ProjectKey)]
    pub gate_lookup: LookupArg,

    /// Task status requests before giving up.
    #[arg(long, default_value_t = 20)]
    pub max_attempts: u32,

    /// Seconds between task status requests.
    #[arg(long, default_value_t = 5)]
    pub poll_interval_secs: u64,

    /// Seconds to wait after the task succeeded before reading the gate.
    #[arg(long, default_value_t = 5)]
    pub grace_secs: u64,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// File to append gate_status/gate_message to.
    #[arg(long, env = OUTPUT_ENV)]
    pub output_file: Option<PathBuf>,

    /// Log filter (env-filter syntax); defaults to RUST_LOG, then "warn".
    #[arg(long)]
    pub log: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupArg {
    ProjectKey,
    AnalysisId,
}

impl From<LookupArg> for GateLookup {
    fn from(arg: LookupArg) -> Self {
        match arg {
            LookupArg::ProjectKey => GateLookup::ProjectKey,
            LookupArg::AnalysisId => GateLookup::AnalysisId,
        }
    }
}

impl Cli {
    /// Sink to report to, available even when the rest of the config is not.
    pub fn output_sink(&self) -> Option<OutputSink> {
        self.output_file
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .map(OutputSink::new)
    }

    pub fn to_config(&self) -> Result<Config, GateError> {
        let config = Config::resolve(
            self.host_url.clone(),
            self.token.clone(),
            &self.report_file,
        )?
        .with_gate_lookup(self.gate_lookup.into())
        .with_http_timeout(Duration::from_secs(self.http_timeout_secs))
        .with_output_sink(self.output_file.as_deref())
        .with_poll_policy(PollPolicy {
            max_attempts: self.max_attempts,
            interval: Duration::from_secs(self.poll_interval_secs),
            grace: Duration::from_secs(self.grace_secs),
        })?;
        Ok(config)
    }
}
