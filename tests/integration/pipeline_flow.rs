//! Library-level flow: config → orchestrator → engine → memory → renderer

use std::time::Instant;

use veripipe::config::Config;
use veripipe::contract::{OverallStatus, PipelineReport, Status};
use veripipe::intelligence::{IntelligenceEngine, RiskLevel, StructureAnalyzer};
use veripipe::memory::SystemMemory;
use veripipe::orchestrator::Orchestrator;
use veripipe::render::{PresentationState, RenderConfig, Renderer};
use veripipe::runner::{ProcessVerifier, TIMEOUT_ERROR};

use super::helpers::*;

fn run_fixture(fixture: &Fixture) -> PipelineReport {
    let config = Config::discover(fixture.root(), None).expect("Failed to load config");
    let registry = config.registry().expect("Invalid registry");
    Orchestrator::new(registry, ProcessVerifier::new(fixture.root()))
        .expect("Failed to build orchestrator")
        .with_timeout(config.timeout())
        .run()
}

fn engine(fixture: &Fixture) -> IntelligenceEngine {
    let config = Config::discover(fixture.root(), None).expect("Failed to load config");
    IntelligenceEngine::new(StructureAnalyzer::new(
        fixture.root(),
        config.structure_config(),
    ))
}

#[test]
fn test_all_passing_pipeline_end_to_end() {
    let fixture = Fixture::new(&[
        ("local_dependencies", passing_tool("local_dependencies").as_str()),
        ("filesystem_integrity", passing_tool("filesystem_integrity").as_str()),
    ]);

    let report = run_fixture(&fixture);

    assert_eq!(report.overall_status, OverallStatus::Ready);
    assert_eq!(
        report.execution_order,
        vec!["local_dependencies", "filesystem_integrity"]
    );
    report.validate().expect("Report should be well formed");

    let snapshot = engine(&fixture).consume(&report).expect("Engine rejected report");
    assert_eq!(snapshot.metrics.integrity_score, 100.0);
    assert_eq!(snapshot.metrics.structural_risk_level, RiskLevel::None);
    assert_eq!(snapshot.metrics.duration_ms, 3.0);
    // tools/, tools/core/
    assert_eq!(snapshot.structure.total_directories, 2);

    let memory = SystemMemory::new(fixture.memory_path());
    memory.write(&snapshot).expect("Failed to persist snapshot");
    assert_eq!(memory.read(), Some(snapshot));

    let out = Renderer::new(RenderConfig::plain()).render(&report);
    assert!(out.contains("System is operational and ready for use"));
}

#[test]
fn test_failures_are_isolated_and_recorded() {
    let fixture = Fixture::new(&[
        ("first", passing_tool("first").as_str()),
        ("broken", GARBAGE_TOOL),
        ("failing", failing_tool("failing", "error").as_str()),
        ("missing", "exec /nonexistent/tool"),
        ("last", passing_tool("last").as_str()),
    ]);

    let report = run_fixture(&fixture);

    assert_eq!(report.overall_status, OverallStatus::NotReady);
    assert_eq!(report.verifications.len(), 5);

    let broken = report.verifications.get("broken").unwrap();
    assert!(!broken.executed);
    assert!(broken.results.is_none());
    assert!(broken.error.as_deref().unwrap().starts_with("Invalid JSON output"));

    let failing = report.verifications.get("failing").unwrap();
    assert!(failing.executed);
    assert_eq!(failing.exit_code, Some(1));
    assert_eq!(failing.status, Status::Error);

    assert!(!report.verifications.get("missing").unwrap().executed);
    assert!(report.verifications.get("last").unwrap().is_passing());

    let snapshot = engine(&fixture).consume(&report).unwrap();
    assert_eq!(snapshot.metrics.integrity_score, 40.0);
    assert_eq!(snapshot.metrics.structural_risk_level, RiskLevel::Critical);

    let out = Renderer::new(RenderConfig::plain()).render(&report);
    assert_eq!(PresentationState::classify(&report), PresentationState::Failure);
    assert!(out.contains("Critical Failures: 3"));
    assert!(out.contains("• Fix failing"));
}

#[test]
fn test_timeout_kills_tool_and_moves_on() {
    let fixture = Fixture::with_timeout(
        &[("slow", SLOW_TOOL), ("after", passing_tool("after").as_str())],
        Some(1),
    );

    let start = Instant::now();
    let report = run_fixture(&fixture);

    assert!(start.elapsed().as_secs() < 4, "tool was not killed on timeout");
    let slow = report.verifications.get("slow").unwrap();
    assert_eq!(slow.error.as_deref(), Some(TIMEOUT_ERROR));
    assert!(!slow.executed);
    assert!(report.verifications.get("after").unwrap().is_passing());
    assert!(!report.is_ready());
}

#[test]
fn test_degraded_tool_renders_warning() {
    let fixture = Fixture::new(&[
        ("ok", passing_tool("ok").as_str()),
        ("meh", failing_tool("meh", "degraded").as_str()),
    ]);

    let report = run_fixture(&fixture);

    assert!(!report.is_ready());
    assert_eq!(PresentationState::classify(&report), PresentationState::Warning);
    let out = Renderer::new(RenderConfig::plain()).render(&report);
    assert!(out.contains("Meh: Degraded state detected"));
}

#[test]
fn test_report_json_round_trips_through_renderer_and_engine() {
    let fixture = Fixture::new(&[("only", passing_tool("only").as_str())]);
    let report = run_fixture(&fixture);

    let raw = report.to_json_pretty().unwrap();

    assert_eq!(PipelineReport::from_json(&raw).unwrap(), report);
    assert!(engine(&fixture).consume_json(&raw).is_ok());
    assert!(Renderer::new(RenderConfig::plain())
        .render_json(&raw)
        .unwrap()
        .contains("READY"));
}
