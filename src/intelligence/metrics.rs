//! Health metrics derived from a pipeline report

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contract::PipelineReport;

/// Categorical banding of the integrity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    None,
    Low,
    Moderate,
    Critical,
}

impl RiskLevel {
    /// Bands are inclusive on their lower bound: 100 / ≥80 / ≥50 / below
    pub fn from_score(score: f64) -> Self {
        if score >= 100.0 {
            RiskLevel::None
        } else if score >= 80.0 {
            RiskLevel::Low
        } else if score >= 50.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "NONE",
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityMetrics {
    pub integrity_score: f64,
    /// Currently identical to `integrity_score`. A richer model would weigh
    /// timeouts and duration variance.
    pub stability_index: f64,
    pub structural_risk_level: RiskLevel,
    pub total_tools_verified: usize,
    pub tools_passed: usize,
    pub duration_ms: f64,
}

impl IntegrityMetrics {
    pub fn from_report(report: &PipelineReport) -> Self {
        let duration_ms: f64 = report.verifications.values().map(|r| r.duration_ms()).sum();
        Self::from_counts(report.verifications.len(), report.passed_count(), duration_ms)
    }

    /// Score `tools_passed` out of `total_tools`; the band follows the
    /// rounded score so the two never disagree
    pub(crate) fn from_counts(total_tools: usize, tools_passed: usize, duration_ms: f64) -> Self {
        let raw_score = if total_tools > 0 {
            100.0 * tools_passed as f64 / total_tools as f64
        } else {
            0.0
        };
        let integrity_score = round2(raw_score);

        Self {
            integrity_score,
            stability_index: integrity_score,
            structural_risk_level: RiskLevel::from_score(integrity_score),
            total_tools_verified: total_tools,
            tools_passed,
            duration_ms: round2(duration_ms),
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
