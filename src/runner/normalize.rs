//! Turn whatever a tool produced into a contract-conforming result

use tracing::{debug, warn};

use super::config::TIMEOUT_ERROR;
use super::executor::ProcessOutcome;
use crate::contract::{CategoryPayload, ToolMetrics, ToolResult};

/// Normalize a finished (or killed) process into a [`ToolResult`].
///
/// Never fails: timeouts and unparseable output become synthetic error
/// results with `executed=false`.
pub fn normalize_outcome(category: &str, outcome: &ProcessOutcome) -> ToolResult {
    if outcome.timed_out {
        warn!(category, duration_ms = outcome.duration_ms(), "verification tool timed out");
        return ToolResult::runner_failure(category, TIMEOUT_ERROR);
    }

    if !outcome.stderr.trim().is_empty() {
        debug!(category, stderr = %outcome.stderr.trim(), "verification tool wrote to stderr");
    }

    match ToolResult::from_tool_output(category, &outcome.stdout, outcome.exit_code) {
        Ok(mut result) => {
            if result.metrics.is_none() {
                result.metrics = Some(ToolMetrics {
                    duration_ms: round_ms(outcome.duration_ms()),
                });
            }
            if result.category != category {
                debug!(
                    category,
                    reported = %result.category,
                    "tool reported a different category than it was registered under"
                );
            }
            check_payload_shape(category, &result);
            debug!(
                category,
                status = %result.status,
                exit_code = ?outcome.exit_code,
                "verification tool finished"
            );
            result
        }
        Err(e) => {
            warn!(category, error = %e, "verification tool produced unusable output");
            ToolResult::runner_failure(category, e.to_string())
        }
    }
}

/// Log, but accept, known categories whose payload has an unexpected shape
fn check_payload_shape(category: &str, result: &ToolResult) {
    if CategoryPayload::is_known_category(category)
        && CategoryPayload::from_result(category, result).is_opaque()
    {
        warn!(category, "payload does not match the known shape for this category");
    }
}

fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
