//! Timing limits for tool execution

use std::time::Duration;

/// Default wall-clock limit for a single verification tool (30 seconds)
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Error text recorded for a tool killed at the timeout
pub const TIMEOUT_ERROR: &str = "Tool execution timeout";
