#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use serde_json::json;
use sonar_gate_core::{Config, GateLookup, PollPolicy};
use tempfile::TempDir;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const TOKEN: &str = "squ_test_token";
pub const TASK_ID: &str = "AY8xQe1Vn3pD";
pub const PROJECT_KEY: &str = "com.example:shop";

pub struct Fixture {
    pub server: MockServer,
    pub dir: TempDir,
    pub report_path: PathBuf,
    pub sink_path: PathBuf,
}

impl Fixture {
    pub async fn new(report: &str) -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report-task.txt");
        std::fs::write(&report_path, report).unwrap();
        let sink_path = dir.path().join("github_output");
        Self {
            server,
            dir,
            report_path,
            sink_path,
        }
    }

    pub async fn with_standard_report() -> Self {
        Self::new(&standard_report()).await
    }

    pub fn config(&self, lookup: GateLookup, policy: PollPolicy) -> Config {
        Config::resolve(Some(self.server.uri()), Some(TOKEN.into()), &self.report_path)
            .unwrap()
            .with_gate_lookup(lookup)
            .with_output_sink(Some(self.sink_path.as_path()))
            .with_poll_policy(policy)
            .unwrap()
    }

    pub fn sink_contents(&self) -> String {
        std::fs::read_to_string(&self.sink_path).unwrap_or_default()
    }

    pub async fn requests_to(&self, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .count()
    }
}

pub fn standard_report() -> String {
    format!(
        "projectKey={PROJECT_KEY}\nserverUrl=http://sonar\nceTaskId={TASK_ID}\nceTaskUrl=http://sonar/api/ce/task?id={TASK_ID}\n"
    )
}

pub fn fast_policy(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        max_attempts,
        interval: Duration::from_millis(5),
        grace: Duration::from_millis(5),
    }
}

pub fn task_endpoint() -> MockBuilder {
    Mock::given(method("GET"))
        .and(path("/api/ce/task"))
        .and(query_param("id", TASK_ID))
        .and(basic_auth(TOKEN, ""))
}

pub fn gate_endpoint(param: &str, value: &str) -> MockBuilder {
    Mock::given(method("GET"))
        .and(path("/api/qualitygates/project_status"))
        .and(query_param(param, value))
        .and(basic_auth(TOKEN, ""))
}

pub fn task_status(status: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "task": { "id": TASK_ID, "type": "REPORT", "status": status }
    }))
}

pub fn gate_status(status: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "projectStatus": {
            "status": status,
            "conditions": [
                { "status": status, "metricKey": "new_coverage", "comparator": "LT",
                  "errorThreshold": "80", "actualValue": "42.0" }
            ]
        }
    }))
}
