//! Read-only views over the latest persisted snapshot

use serde::Serialize;
use serde_json::json;

use super::engine::EngineSnapshot;
use crate::contract::{now_timestamp, PipelineReport, Status, ToolResult};

const RULE: &str = "==================================================";
const NO_SNAPSHOT: &str = "No engine snapshot found. Run verification pipeline first.";
const RUN_PIPELINE: &str = "Run the verification pipeline to generate snapshot.";

/// Summary of the latest pipeline execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOverview {
    pub overall_status: String,
    pub total_tools: usize,
    pub timestamp: Option<String>,
}

impl PipelineOverview {
    pub fn from_snapshot(snapshot: Option<&EngineSnapshot>) -> Self {
        match snapshot {
            Some(s) => Self {
                overall_status: s.pipeline_state.overall_status.to_string(),
                total_tools: s.pipeline_state.execution_order.len(),
                timestamp: Some(s.timestamp.clone()),
            },
            None => Self {
                overall_status: "unknown".to_string(),
                total_tools: 0,
                timestamp: None,
            },
        }
    }
}

/// Offline status of the intelligence layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    pub status: String,
    pub timestamp: String,
    pub intelligence_layer: String,
    pub integrity_score: f64,
    pub latest_pipeline_status: String,
    pub message: String,
}

impl EngineStatus {
    pub fn from_snapshot(snapshot: Option<&EngineSnapshot>) -> Self {
        let overview = PipelineOverview::from_snapshot(snapshot);
        Self {
            status: "operational".to_string(),
            timestamp: now_timestamp(),
            intelligence_layer: "ACTIVE".to_string(),
            integrity_score: snapshot.map(|s| s.metrics.integrity_score).unwrap_or(0.0),
            latest_pipeline_status: overview.overall_status,
            message: match snapshot {
                Some(_) => "Execution intelligence layer operational.".to_string(),
                None => "Execution intelligence layer operational. No snapshot found.".to_string(),
            },
        }
    }
}

/// Plain-text diagnostics of a snapshot's metrics and structure
pub fn inspect_snapshot(snapshot: &EngineSnapshot) -> String {
    let metrics = &snapshot.metrics;
    let structure = &snapshot.structure;

    let mut lines = vec![
        RULE.to_string(),
        "          ENGINE INSPECTOR DIAGNOSTICS".to_string(),
        RULE.to_string(),
        format!("Timestamp: {}", snapshot.timestamp),
        String::new(),
        "[ INTEGRITY METRICS ]".to_string(),
        format!("  Score:           {:.2}%", metrics.integrity_score),
        format!("  Stability Index: {:.2}%", metrics.stability_index),
        format!("  Structural Risk: {}", metrics.structural_risk_level),
        format!(
            "  Tools Passed:    {}/{}",
            metrics.tools_passed, metrics.total_tools_verified
        ),
        format!("  Compute Time:    {:.2}ms", metrics.duration_ms),
        String::new(),
        "[ STRUCTURE GRAPH ]".to_string(),
        format!("  Total Files:     {}", structure.total_files),
        format!("  Total Dirs:      {}", structure.total_directories),
        "  Layers:".to_string(),
    ];

    for (layer, count) in structure.layers.iter().filter(|(_, c)| **c > 0) {
        lines.push(format!("    - {layer}: {count} files"));
    }

    lines.push("  Boundaries:".to_string());
    for boundary in &structure.boundaries {
        lines.push(format!("    - {boundary}"));
    }
    lines.push(RULE.to_string());

    lines.join("\n")
}

/// ASCII map of the pipeline in execution order
pub fn pipeline_topology(report: &PipelineReport, unicode: bool) -> String {
    let (pass, fail) = if unicode { ("[✓]", "[X]") } else { ("[+]", "[X]") };

    let mut lines = vec![
        RULE.to_string(),
        "           PIPELINE EXECUTION TOPOLOGY".to_string(),
        RULE.to_string(),
    ];

    if report.execution_order.is_empty() {
        lines.push("Pipeline is empty.".to_string());
    }

    let last = report.execution_order.len().saturating_sub(1);
    for (i, step) in report.execution_order.iter().enumerate() {
        let passing = report
            .verifications
            .get(step)
            .is_some_and(|r| r.is_passing());
        let icon = if passing { pass } else { fail };
        lines.push(format!("    {icon} {step}"));
        if i < last {
            lines.push("     |".to_string());
            lines.push("     v".to_string());
        }
    }

    lines.push(RULE.to_string());
    lines.push(format!(
        "Pipeline Overall Status: {}",
        report.overall_status.as_str().to_uppercase()
    ));

    lines.join("\n")
}

/// Inspector output wrapped in the result contract
pub fn inspector_check(snapshot: Option<&EngineSnapshot>) -> ToolResult {
    match snapshot {
        Some(s) => ToolResult::new("engine_inspector", Status::Ready, "Engine inspected successfully.")
            .with_results(json!({
                "inspector_output": inspect_snapshot(s),
                "metrics": s.metrics,
                "structure": s.structure,
            })),
        None => missing_snapshot("engine_inspector", "Failed to inspect engine."),
    }
}

/// Topology map wrapped in the result contract
pub fn topology_check(snapshot: Option<&EngineSnapshot>, unicode: bool) -> ToolResult {
    match snapshot {
        Some(s) => ToolResult::new(
            "pipeline_visualizer",
            Status::Ready,
            "Pipeline visualized successfully.",
        )
        .with_results(json!({
            "ascii_map": pipeline_topology(&s.pipeline_state, unicode),
            "order": s.pipeline_state.execution_order,
        })),
        None => missing_snapshot("pipeline_visualizer", "Failed to visualize pipeline."),
    }
}

fn missing_snapshot(category: &str, message: &str) -> ToolResult {
    ToolResult::new(category, Status::Error, message)
        .with_results(json!({ "error": NO_SNAPSHOT }))
        .with_remediation(RUN_PIPELINE)
}
