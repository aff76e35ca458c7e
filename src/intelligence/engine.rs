//! Execution intelligence engine: pipeline report in, engine snapshot out

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::metrics::IntegrityMetrics;
use super::structure::{StructureAnalyzer, StructureGraph};
use crate::contract::{now_timestamp, PipelineReport};
use crate::error::ReportError;

/// Derived health and structure for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub timestamp: String,
    pub pipeline_state: PipelineReport,
    pub metrics: IntegrityMetrics,
    pub structure: StructureGraph,
}

pub struct IntelligenceEngine {
    analyzer: StructureAnalyzer,
}

impl IntelligenceEngine {
    pub fn new(analyzer: StructureAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Build a fresh snapshot from `report`, which is only read.
    ///
    /// Malformed reports are rejected rather than scored. A failed tree
    /// scan degrades to an empty structure graph.
    pub fn consume(&self, report: &PipelineReport) -> Result<EngineSnapshot, ReportError> {
        report.validate()?;

        let metrics = IntegrityMetrics::from_report(report);
        let structure = self.analyzer.analyze().unwrap_or_else(|e| {
            warn!(
                root = %self.analyzer.root().display(),
                error = %e,
                "structural scan failed"
            );
            StructureGraph::empty(self.analyzer.config())
        });

        info!(
            integrity_score = metrics.integrity_score,
            risk = %metrics.structural_risk_level,
            total_files = structure.total_files,
            "engine snapshot built"
        );

        Ok(EngineSnapshot {
            timestamp: now_timestamp(),
            pipeline_state: report.clone(),
            metrics,
            structure,
        })
    }

    /// Same as [`consume`](Self::consume) for raw orchestrator output
    pub fn consume_json(&self, raw: &str) -> Result<EngineSnapshot, ReportError> {
        let report = PipelineReport::from_json(raw)?;
        self.consume(&report)
    }
}
