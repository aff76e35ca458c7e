//! Result contract shared by every verification tool and every consumer
//!
//! Tools print one JSON object on stdout. The runner deserializes it into a
//! [`ToolResult`] right at the process boundary; everything downstream works
//! with the typed form. The wire format is preserved for compatibility:
//! unknown fields survive a parse/serialize cycle.
//!
//! A result is passing only when its status is `ready` or `healthy`.
//! `degraded` is the one non-passing status that the renderer treats as a
//! warning rather than a failure.

pub mod payload;
mod report;
mod result;
mod status;


pub use payload::CategoryPayload;
pub use report::{PipelineReport, Verifications, ORCHESTRATOR_ID};
pub use result::{now_timestamp, ToolMetrics, ToolResult};
pub use status::{OverallStatus, Status};
