//! Sequential verification orchestrator
//!
//! Holds a fixed, ordered registration list and runs every tool in that
//! order: no parallelism, no reordering, no skipping. A failing tool never
//! aborts the run. The only decision made here is the overall status, a
//! plain conjunction over all results.

mod registry;


use std::time::{Duration, Instant};
use tracing::info;

use crate::contract::{PipelineReport, Verifications};
use crate::error::ConfigError;
use crate::runner::{ToolSpec, Verifier, DEFAULT_TOOL_TIMEOUT};

pub use registry::{default_registry, validate_registry};

pub struct Orchestrator<V> {
    registry: Vec<ToolSpec>,
    verifier: V,
    timeout: Duration,
}

impl<V: Verifier> Orchestrator<V> {
    /// Create an orchestrator over `registry`, rejecting duplicate categories
    pub fn new(registry: Vec<ToolSpec>, verifier: V) -> Result<Self, ConfigError> {
        validate_registry(&registry)?;
        Ok(Self {
            registry,
            verifier,
            timeout: DEFAULT_TOOL_TIMEOUT,
        })
    }

    /// Override the per-tool timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &[ToolSpec] {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn execution_order(&self) -> Vec<String> {
        self.registry.iter().map(|s| s.category.clone()).collect()
    }

    /// Run every registered tool once, in order, and aggregate the results
    pub fn run(&self) -> PipelineReport {
        let start = Instant::now();
        let mut verifications = Verifications::new();

        for spec in &self.registry {
            let result = self.verifier.verify(spec, self.timeout);
            info!(
                category = %spec.category,
                status = %result.status,
                executed = result.executed,
                "verification finished"
            );
            verifications.insert(spec.category.clone(), result);
        }

        let report = PipelineReport::new(self.execution_order(), verifications);
        info!(
            overall_status = %report.overall_status,
            tools = self.registry.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "verification pipeline finished"
        );
        report
    }
}
