//! Run configuration, resolved once at process start.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GateError;
use crate::sink::OutputSink;

/// Path the SonarScanner writes its task report to.
pub const DEFAULT_REPORT_PATH: &str = "target/sonar/report-task.txt";
/// Poll attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
/// Wait between poll attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Wait after `SUCCESS` so the gate status catches up with the task.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(5);
/// Per-request HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the SonarQube base URL.
pub const HOST_URL_ENV: &str = "SONAR_HOST_URL";
/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "SONAR_TOKEN";

/// Which identifier the gate status query is keyed on.
///
/// The two lookups can disagree when a project has concurrent analyses;
/// neither is preferred, the caller picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateLookup {
    /// `projectKey={projectKey}`: latest analysis of the project.
    #[default]
    ProjectKey,
    /// `analysisId={ceTaskId}`: the analysis this run submitted.
    AnalysisId,
}

impl GateLookup {
    /// Query parameter name sent to `/api/qualitygates/project_status`.
    pub fn query_param(&self) -> &'static str {
        match self {
            GateLookup::ProjectKey => "projectKey",
            GateLookup::AnalysisId => "analysisId",
        }
    }

    /// Whether the report artifact must carry `projectKey`.
    pub fn needs_project_key(&self) -> bool {
        matches!(self, GateLookup::ProjectKey)
    }
}

/// Fixed-interval retry policy of the task poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum status requests.
    pub max_attempts: u32,
    /// Sleep after every non-terminal attempt.
    pub interval: Duration,
    /// Sleep after observing `SUCCESS`.
    pub grace: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
            grace: DEFAULT_GRACE,
        }
    }
}

/// Validated settings for one run.
#[derive(Clone)]
pub struct Config {
    /// SonarQube base URL, used verbatim.
    pub host_url: String,
    /// Basic auth username; the password is empty.
    pub token: String,
    /// `report-task.txt` written by the scanner; known to exist.
    pub report_path: PathBuf,
    /// Key of the gate status query.
    pub gate_lookup: GateLookup,
    /// Task poll budget and waits.
    pub poll: PollPolicy,
    /// Applies to each request on its own.
    pub http_timeout: Duration,
    /// CI output file, if any.
    pub output_sink: Option<OutputSink>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host_url", &self.host_url)
            .field("token", &"<redacted>")
            .field("report_path", &self.report_path)
            .field("gate_lookup", &self.gate_lookup)
            .field("poll", &self.poll)
            .field("http_timeout", &self.http_timeout)
            .field("output_sink", &self.output_sink)
            .finish()
    }
}

impl Config {
    /// Validates the required inputs and applies defaults for the rest.
    ///
    /// Host URL and token are checked before the report file so a missing
    /// credential is reported even when the scanner has not run.
    pub fn resolve(
        host_url: Option<String>,
        token: Option<String>,
        report_path: impl Into<PathBuf>,
    ) -> Result<Self, GateError> {
        let host_url = required(host_url, HOST_URL_ENV)?;
        let token = required(token, TOKEN_ENV)?;
        let report_path = report_path.into();
        if !report_path.exists() {
            return Err(GateError::ArtifactNotFound(report_path));
        }

        Ok(Self {
            host_url,
            token,
            report_path,
            gate_lookup: GateLookup::default(),
            poll: PollPolicy::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            output_sink: None,
        })
    }

    /// Selects the gate status query key.
    pub fn with_gate_lookup(mut self, lookup: GateLookup) -> Self {
        self.gate_lookup = lookup;
        self
    }

    /// Rejects a zero attempt budget, which would time out without asking.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Result<Self, GateError> {
        if poll.max_attempts == 0 {
            return Err(GateError::InvalidSetting {
                name: "max-attempts",
                reason: "must be at least 1".into(),
            });
        }
        self.poll = poll;
        Ok(self)
    }

    /// Overrides the per-request HTTP timeout.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// An empty path (e.g. an unset CI variable exported as "") means no sink.
    pub fn with_output_sink(mut self, path: Option<&Path>) -> Self {
        self.output_sink = path
            .filter(|p| !p.as_os_str().is_empty())
            .map(OutputSink::new);
        self
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, GateError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(GateError::ConfigurationMissing(name)),
    }
}
