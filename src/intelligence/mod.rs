//! Execution intelligence: health metrics and structure from a pipeline report
//!
//! The engine never mutates the report it consumes. Running it twice on the
//! same report over the same tree yields identical snapshots apart from the
//! timestamp.

mod engine;
mod metrics;
mod structure;
mod views;


pub use engine::{EngineSnapshot, IntelligenceEngine};
pub use metrics::{IntegrityMetrics, RiskLevel};
pub use structure::{
    StructureAnalyzer, StructureConfig, StructureGraph, DEFAULT_BOUNDARIES, DEFAULT_EXCLUDES,
    DEFAULT_LAYERS,
};
pub use views::{
    inspect_snapshot, inspector_check, pipeline_topology, topology_check, EngineStatus,
    PipelineOverview,
};
