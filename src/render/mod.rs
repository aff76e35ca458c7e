//! Terminal rendering of a pipeline report
//!
//! The renderer is a pure function of the report and a [`RenderConfig`]:
//! it never runs tools, touches memory, or sets process-wide colour state.
//! One of three layouts is chosen by [`PresentationState::classify`].

mod categories;
mod layout;
mod state;
mod style;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::contract::payload::CategoryPayload;
use crate::contract::{PipelineReport, ToolResult};
use crate::error::ReportError;
use crate::REPORT_TITLE;

pub use categories::{title_case, CategoryRegistry, CategoryView, DefaultView};
pub use layout::{banner, kv_pair, strip_ansi, table, visible_width};
pub use state::PresentationState;
pub use style::{Palette, RenderConfig};

const KEY_ALIGN: usize = 18;
const TABLE_HEADERS: [&str; 3] = ["Component", "Status", "Details"];

pub struct Renderer {
    config: RenderConfig,
    palette: Palette,
    registry: CategoryRegistry,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            palette: Palette::new(&config),
            config,
            registry: CategoryRegistry::standard(),
        }
    }

    /// Replace the category views, e.g. to present project-specific tools
    pub fn with_registry(mut self, registry: CategoryRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, report: &PipelineReport) -> String {
        match PresentationState::classify(report) {
            PresentationState::Success => self.render_success(report),
            PresentationState::Warning => self.render_warning(report),
            PresentationState::Failure => self.render_failure(report),
        }
    }

    /// Render raw orchestrator output; malformed reports are rejected
    pub fn render_json(&self, raw: &str) -> Result<String, ReportError> {
        let report = PipelineReport::from_json(raw)?;
        Ok(self.render(&report))
    }

    /// Render a report saved to disk
    pub fn render_file(&self, path: &Path) -> Result<String> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        self.render_json(&raw)
            .with_context(|| format!("Invalid pipeline report: {}", path.display()))
    }

    fn render_success(&self, report: &PipelineReport) -> String {
        let p = &self.palette;
        let mut lines = self.header();
        lines.push(kv_pair(p, "Overall Status", "READY", KEY_ALIGN));
        lines.push(kv_pair(p, "System Ready", "Yes", KEY_ALIGN));
        self.push_body(&mut lines, report);

        lines.push(p.success_indicator("System is operational and ready for use"));
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_warning(&self, report: &PipelineReport) -> String {
        let p = &self.palette;
        let mut lines = self.header();
        lines.push(kv_pair(p, "Overall Status", "OPERATIONAL (with warnings)", KEY_ALIGN));
        lines.push(kv_pair(p, "System Ready", "Yes (degraded)", KEY_ALIGN));
        self.push_body(&mut lines, report);

        let advisories: Vec<String> = report
            .ordered_results()
            .filter(|(_, r)| r.is_degraded())
            .map(|(category, _)| format!("{}: Degraded state detected", title_case(category)))
            .collect();
        if !advisories.is_empty() {
            lines.push(p.lime("Advisories:"));
            lines.push(String::new());
            for advisory in &advisories {
                lines.push(p.warning_indicator(&p.text(advisory)));
            }
        }

        lines.push(String::new());
        lines.push(p.info_indicator("System operational but review recommended"));
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_failure(&self, report: &PipelineReport) -> String {
        let p = &self.palette;
        let mut lines = self.header();
        lines.push(kv_pair(p, "Overall Status", &p.red("NOT READY"), KEY_ALIGN));
        lines.push(kv_pair(p, "System Ready", &p.red("No"), KEY_ALIGN));
        let critical = report
            .verifications
            .values()
            .filter(|r| !r.is_passing() && !r.is_degraded())
            .count();
        lines.push(kv_pair(p, "Critical Failures", &critical.to_string(), KEY_ALIGN));
        self.push_body(&mut lines, report);

        let mut has_errors = false;
        for (category, result) in report.ordered_results().filter(|(_, r)| !r.is_passing()) {
            let details = self.error_details(category, result);
            if details.is_empty() {
                continue;
            }
            if !has_errors {
                lines.push(p.lime("Error Details:"));
                lines.push(String::new());
                has_errors = true;
            }
            lines.push(format!("  {}:", p.red(&title_case(category))));
            for detail in details {
                lines.push(format!("    {} {}", p.bullet(), p.text(&detail)));
            }
        }
        if has_errors {
            lines.push(String::new());
        }

        lines.push(p.lime("Impact:"));
        lines.push(p.error_indicator("System cannot operate until issues resolved"));
        lines.push(String::new());

        let steps: Vec<String> = report
            .ordered_results()
            .filter(|(_, r)| !r.is_passing() && !r.is_degraded() && r.executed)
            .flat_map(|(category, result)| {
                let payload = CategoryPayload::from_result(category, result);
                self.registry.view(category).remediation(result, &payload)
            })
            .collect();
        if !steps.is_empty() {
            lines.push(p.lime("Required Actions:"));
            lines.push(String::new());
            for step in &steps {
                lines.push(format!("  {} {}", p.bullet(), p.text(step)));
            }
        }

        lines.push(String::new());
        lines.push(p.error_indicator("Resolve errors before proceeding"));
        lines.push(String::new());
        lines.join("\n")
    }

    fn header(&self) -> Vec<String> {
        vec![
            String::new(),
            banner(&self.palette, &self.palette.text(REPORT_TITLE), self.config.width),
            String::new(),
        ]
    }

    /// Timestamp line and the results table, shared by all layouts
    fn push_body(&self, lines: &mut Vec<String>, report: &PipelineReport) {
        let p = &self.palette;
        if let Some(timestamp) = report.timestamp.as_deref().filter(|t| !t.is_empty()) {
            lines.push(kv_pair(p, "Verified at", timestamp, KEY_ALIGN));
        }
        lines.push(String::new());

        let rows = self.table_rows(report);
        if !rows.is_empty() {
            lines.push(table(p, &TABLE_HEADERS, &rows));
        }
        lines.push(String::new());
    }

    fn table_rows(&self, report: &PipelineReport) -> Vec<Vec<String>> {
        let p = &self.palette;
        report
            .ordered_results()
            .map(|(category, result)| {
                let view = self.registry.view(category);
                let payload = CategoryPayload::from_result(category, result);
                let status = result.status.label();
                let status_cell = if result.is_passing() {
                    p.success_indicator(&status)
                } else {
                    status
                };
                vec![
                    p.text(&view.label(category)).into_owned(),
                    status_cell,
                    p.text(&view.describe(result, &payload)).into_owned(),
                ]
            })
            .collect()
    }

    /// The runner's error first, then what the category view can tell from
    /// the payload. Tools that never executed have no payload to inspect.
    fn error_details(&self, category: &str, result: &ToolResult) -> Vec<String> {
        let mut details = Vec::new();
        if let Some(error) = &result.error {
            details.push(self.palette.red(&format!("Error: {error}")));
        }
        if result.executed {
            let payload = CategoryPayload::from_result(category, result);
            details.extend(
                self.registry
                    .view(category)
                    .errors(result, &payload, &self.palette),
            );
        }
        details
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
