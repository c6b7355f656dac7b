use reqwest::Client;
use sonar_gate_core::api::{self, TaskResponse};
use sonar_gate_core::{Config, GateError, GateLookup};
use tracing::debug;

/// Authenticated client for the two SonarQube endpoints the waiter reads.
///
/// The token is sent as the basic auth username with an empty password.
#[derive(Clone)]
pub struct SonarClient {
    http: Client,
    base_url: String,
    token: String,
}

impl SonarClient {
    pub fn new(config: &Config) -> Result<Self, GateError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("sonar-gate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GateError::Transport(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.host_url.clone(),
            token: config.token.clone(),
        })
    }

    /// One `GET /api/ce/task` request. Every failure is a `Transport` error.
    pub async fn task(&self, task_id: &str) -> Result<TaskResponse, GateError> {
        let body = self.get(&api::task_url(&self.base_url, task_id)).await?;
        serde_json::from_str(&body)
            .map_err(|e| GateError::Transport(format!("task status decode: {e}")))
    }

    /// One `GET /api/qualitygates/project_status` request, returning the raw
    /// body so callers can show it verbatim.
    pub async fn project_status(&self, lookup: GateLookup, key: &str) -> Result<String, GateError> {
        self.get(&api::gate_url(&self.base_url, lookup, key)).await
    }

    async fn get(&self, url: &str) -> Result<String, GateError> {
        debug!(url, "GET");
        let resp = self
            .http
            .get(url)
            .basic_auth(&self.token, Some(""))
            .send()
            .await
            .map_err(|e| GateError::Transport(format!("request to {url}: {e}")))?;

        let status = resp.status();
        debug!(url, %status, "response");
        let resp = resp
            .error_for_status()
            .map_err(|e| GateError::Transport(format!("{url} returned {status}: {e}")))?;
        resp.text()
            .await
            .map_err(|e| GateError::Transport(format!("reading body of {url}: {e}")))
    }
}
