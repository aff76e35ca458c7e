//! Tests for report classification and layout

use serde_json::json;

use super::*;
use crate::contract::{Status, ToolResult, Verifications};

fn report(results: Vec<ToolResult>) -> PipelineReport {
    let order = results.iter().map(|r| r.category.clone()).collect();
    let verifications: Verifications = results
        .into_iter()
        .map(|r| (r.category.clone(), r))
        .collect();
    PipelineReport::new(order, verifications)
}

fn tool(category: &str, status: Status) -> ToolResult {
    ToolResult::new(category, status, "")
}

fn plain() -> Renderer {
    Renderer::new(RenderConfig::plain())
}

#[test]
fn test_classify_success() {
    let r = report(vec![tool("a", Status::Ready), tool("b", Status::Healthy)]);
    assert_eq!(PresentationState::classify(&r), PresentationState::Success);
}

#[test]
fn test_classify_warning_beats_failure_when_degraded() {
    let r = report(vec![
        tool("a", Status::Ready),
        tool("b", Status::Degraded),
        ToolResult::runner_failure("c", "Tool execution timeout"),
    ]);
    assert_eq!(PresentationState::classify(&r), PresentationState::Warning);
}

#[test]
fn test_classify_failure() {
    let r = report(vec![tool("a", Status::Ready), tool("b", Status::Error)]);
    assert_eq!(PresentationState::classify(&r), PresentationState::Failure);
}

#[test]
fn test_success_layout() {
    let r = report(vec![
        tool("local_dependencies", Status::Ready),
        tool("agent_registry", Status::Ready),
    ]);

    let out = plain().render(&r);

    assert!(out.contains("VERIPIPE — ENGINEERING VERIFICATION CORE"));
    assert!(out.contains("Overall Status:    READY"));
    assert!(out.contains("System Ready:      Yes"));
    assert!(out.contains("Verified at:"));
    assert!(out.contains("Local Dependencies"));
    assert!(out.contains("[✓] READY"));
    assert!(out.contains("0 agents"));
    assert!(out.contains("System is operational and ready for use"));
}

#[test]
fn test_table_follows_execution_order() {
    let r = report(vec![
        tool("schema_validation", Status::Ready),
        tool("local_dependencies", Status::Ready),
    ]);

    let out = plain().render(&r);

    let schema = out.find("Schema Validation").unwrap();
    let deps = out.find("Local Dependencies").unwrap();
    assert!(schema < deps);
}

#[test]
fn test_no_ansi_when_color_disabled() {
    let r = report(vec![
        tool("a", Status::Ready),
        ToolResult::runner_failure("b", "Tool execution timeout"),
    ]);

    let out = plain().render(&r);

    assert!(!out.contains('\x1b'));
    assert_eq!(strip_ansi(&out), out);
}

#[test]
fn test_ascii_mode_is_pure_ascii() {
    let mut packages = tool("python_packages", Status::Error);
    packages.results = Some(json!({
        "packages_checked": 2,
        "packages_present": 1,
        "details": [{"name": "yaml", "status": "missing"}]
    }));
    let r = report(vec![tool("a", Status::Ready), packages]);

    let out = Renderer::new(RenderConfig::ascii()).render(&r);

    assert!(out.is_ascii(), "{out}");
    assert!(out.contains("+===="));
    assert!(out.contains("VERIPIPE - ENGINEERING VERIFICATION CORE"));
    assert!(out.contains("-> Install missing packages manually"));
}

#[test]
fn test_warning_layout_lists_advisories() {
    let r = report(vec![
        tool("local_dependencies", Status::Ready),
        tool("workspace_hygiene", Status::Degraded),
    ]);

    let out = plain().render(&r);

    assert!(out.contains("OPERATIONAL (with warnings)"));
    assert!(out.contains("Yes (degraded)"));
    assert!(out.contains("Advisories:"));
    assert!(out.contains("[!] Workspace Hygiene: Degraded state detected"));
    assert!(out.contains("System operational but review recommended"));
    assert!(!out.contains("Required Actions:"));
}

#[test]
fn test_failure_layout() {
    let mut deps = ToolResult::new("local_dependencies", Status::Error, "Dependency check failed");
    deps.extra.insert(
        "python_version".into(),
        json!({"current": "3.6.9", "required": "3.8", "meets_requirement": false}),
    );
    deps.extra
        .insert("modules".into(), json!({"missing": ["json", "pathlib"]}));
    let r = report(vec![
        deps,
        tool("filesystem_integrity", Status::Ready),
        ToolResult::runner_failure("agent_registry", "Tool execution timeout"),
    ]);

    let out = plain().render(&r);

    assert!(out.contains("NOT READY"));
    assert!(out.contains("Critical Failures: 2"));
    // Non-passing rows show the tool's own message
    assert!(out.contains("Dependency check failed"));
    assert!(out.contains("Tool execution failed"));
    assert!(out.contains("Error Details:"));
    assert!(out.contains("  Local Dependencies:"));
    assert!(out.contains("• Python 3.6.9 does not meet requirement (≥3.8)"));
    assert!(out.contains("• Missing modules: json, pathlib"));
    assert!(out.contains("  Agent Registry:"));
    assert!(out.contains("• Error: Tool execution timeout"));
    // A tool that never ran gets no payload-based lines
    assert!(!out.contains("Registry file not found"));
    assert!(!out.contains("Create agents/_registry.json file"));
    assert!(out.contains("Impact:"));
    assert!(out.contains("Required Actions:"));
    assert!(out.contains("• Upgrade Python to version 3.8 or higher"));
    assert!(out.contains("• Install missing modules: json, pathlib"));
    assert!(out.contains("Resolve errors before proceeding"));
}

#[test]
fn test_violation_details() {
    let mut syntax = tool("python_syntax", Status::Error);
    syntax.results = Some(json!({
        "violations": [{"file": "tools/core/x.py", "line": 12}]
    }));
    let mut boundary = tool("ant_boundary", Status::Error);
    boundary.results = Some(json!({
        "violations": [{"file": "tools/a.py", "line": 3, "import": "openai"}]
    }));
    boundary.remediation = Some("Move AI calls out of tools/".into());
    let r = report(vec![syntax, boundary]);

    let out = plain().render(&r);

    assert!(out.contains("1 syntax error(s) detected"));
    assert!(out.contains("First error: tools/core/x.py:12"));
    assert!(out.contains("First error: openai in tools/a.py:3"));
    assert!(out.contains("• Move AI calls out of tools/"));
    assert!(out.contains("A.N.T Boundary"));
}

#[test]
fn test_unknown_category_uses_default_view() {
    let mut custom = tool("custom_lint_check", Status::Ready);
    custom.message = "lint clean".into();
    let r = report(vec![custom]);

    let out = plain().render(&r);

    assert!(out.contains("Custom Lint Check"));
    assert!(out.contains("lint clean"));
}

#[test]
fn test_default_view_remediation_from_field() {
    let failing = tool("custom_lint_check", Status::NotReady)
        .with_remediation("Run the formatter");
    let r = report(vec![failing]);

    let out = plain().render(&r);

    assert!(out.contains("NOT_READY"));
    assert!(out.contains("• Run the formatter"));
}

#[test]
fn test_render_json_rejects_malformed_report() {
    let raw = r#"{"overall_status": "ready", "verifications": {}, "execution_order": ["a"]}"#;
    assert!(plain().render_json(raw).is_err());
}

#[test]
fn test_render_json_accepts_orchestrator_output() {
    let r = report(vec![tool("a", Status::Ready)]);
    let raw = r.to_json_pretty().unwrap();
    assert!(plain().render_json(&raw).unwrap().contains("READY"));
}

#[test]
fn test_empty_report_renders_success_without_table() {
    let out = plain().render(&report(Vec::new()));
    assert!(out.contains("READY"));
    assert!(!out.contains("Component"));
}

#[test]
fn test_layout_helpers() {
    let palette = Palette::new(&RenderConfig::plain());

    assert_eq!(
        kv_pair(&palette, "Overall Status", "READY", 18),
        "Overall Status:    READY"
    );
    assert_eq!(title_case("agent_registry"), "Agent Registry");
    assert_eq!(visible_width("\x1b[91mabc\x1b[0m"), 3);

    let lines: Vec<String> = banner(&palette, "HI", 6).lines().map(String::from).collect();
    assert_eq!(lines, vec!["╔══════╗", "║  HI  ║", "╚══════╝"]);

    let t = table(
        &palette,
        &["A", "B"],
        &[vec!["long".to_string(), "x".to_string()]],
    );
    let rows: Vec<&str> = t.lines().collect();
    assert_eq!(rows[0], "  A     B");
    assert_eq!(rows[1], "  ────  ─");
    assert_eq!(rows[2], "  long  x");
}

#[test]
fn test_missing_packages_get_both_remediation_steps() {
    let mut packages = tool("python_packages", Status::Error);
    packages.results = Some(json!({
        "packages_checked": 2,
        "packages_present": 0,
        "details": [
            {"name": "yaml", "status": "missing"},
            {"name": "jsonschema", "status": "missing"}
        ]
    }));

    let out = plain().render(&report(vec![packages]));

    assert!(out.contains("• Verify Python installation completeness, missing: yaml, jsonschema"));
    assert!(out.contains(
        "• See architecture/sops/verification_operational_guidelines.md \
         §Package Dependency Failures for remediation guidance"
    ));
}
