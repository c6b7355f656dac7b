//! Integration tests for the core crate.

use sonar_gate_core::api::{ProjectStatusResponse, TaskResponse};
use sonar_gate_core::{
    Config, GateError, GateLookup, GateVerdict, OutcomeStatus, OutputSink, ReportArtifact,
    RunOutcome, TaskStatus,
};

#[test]
fn test_task_response_serde() {
    let body = r#"{"task":{"id":"AY8x","type":"REPORT","componentKey":"shop","status":"FAILED","analysisId":"AZ01","errorMessage":"Unsupported language"}}"#;
    let resp: TaskResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.status(), TaskStatus::Failed);
    assert_eq!(resp.error_message().as_deref(), Some("Unsupported language"));
    assert_eq!(
        resp.task.as_ref().and_then(|t| t.analysis_id.as_deref()),
        Some("AZ01")
    );
}

#[test]
fn test_project_status_serde() {
    let resp: ProjectStatusResponse =
        serde_json::from_str(r#"{"projectStatus":{"status":"OK","conditions":[]}}"#).unwrap();
    assert_eq!(resp.verdict(), GateVerdict::Passed);

    let resp: ProjectStatusResponse = serde_json::from_str(r#"{"errors":[{"msg":"nope"}]}"#).unwrap();
    assert_eq!(resp.verdict(), GateVerdict::Missing);
}

#[test]
fn test_report_loaded_from_resolved_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report-task.txt");
    std::fs::write(&path, "projectKey=shop\nceTaskId=AB=12\n").unwrap();

    let cfg = Config::resolve(Some("http://sonar".into()), Some("tok".into()), &path).unwrap();
    let report = ReportArtifact::load(&cfg.report_path, cfg.gate_lookup).unwrap();
    assert_eq!(report.ce_task_id, "AB=12");
    assert_eq!(report.gate_key(GateLookup::ProjectKey).unwrap(), "shop");
}

#[test]
fn test_report_without_task_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report-task.txt");
    std::fs::write(&path, "projectKey=shop\n").unwrap();

    let err = ReportArtifact::load(&path, GateLookup::AnalysisId).unwrap_err();
    assert!(matches!(err, GateError::MissingField("ceTaskId")));
}

#[test]
fn test_sink_lines_read_back_in_append_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("github_output");
    let prior = "artifact=build.zip\nversion<<EOF\n1.2.3\nEOF\n";
    std::fs::write(&path, prior).unwrap();

    let sink = OutputSink::new(&path);
    sink.write_outcome(&RunOutcome::error("first")).unwrap();
    sink.write_outcome(&RunOutcome::ok("second")).unwrap();

    let got = std::fs::read_to_string(&path).unwrap();
    let appended: Vec<&str> = got.strip_prefix(prior).unwrap().lines().collect();
    assert_eq!(
        appended,
        vec![
            "gate_status=ERROR",
            "gate_message=first",
            "gate_status=OK",
            "gate_message=second",
        ]
    );
}

#[test]
fn test_outcome_status_wire_form() {
    assert_eq!(OutcomeStatus::Ok.to_string(), "OK");
    assert_eq!(OutcomeStatus::Error.to_string(), "ERROR");
}
