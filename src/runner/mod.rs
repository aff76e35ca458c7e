//! Tool runner: execute one verification tool in isolation
//!
//! Each tool runs as its own child process with no shared memory. Whatever
//! happens (valid JSON, garbage, crash, missing binary, timeout) the caller
//! gets back a [`ToolResult`]; runner failures are data, never `Err`.
//!
//! There are no retries. One failed attempt is final for that pipeline run.
//!
//! # Timeout Behavior
//!
//! When a tool exceeds its timeout:
//! - The process is killed (SIGKILL on Unix, TerminateProcess on Windows)
//! - The result has `status=error`, `executed=false`, `error="Tool execution timeout"`
//! - The orchestrator moves on to the next tool

mod config;
mod executor;
mod normalize;
mod spec;


use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::contract::ToolResult;

pub use config::{DEFAULT_TOOL_TIMEOUT, TIMEOUT_ERROR};
pub use executor::{run_process, ProcessOutcome};
pub use normalize::normalize_outcome;
pub use spec::{ToolLocator, ToolSpec};

/// Runs one verification tool and reports its result.
///
/// This is the seam between the orchestrator and the isolation mechanism:
/// a single timeout-bounded call that cannot fail.
pub trait Verifier {
    fn verify(&self, spec: &ToolSpec, timeout: Duration) -> ToolResult;
}

/// Runs each tool as a separate OS process rooted at the project directory
#[derive(Debug, Clone)]
pub struct ProcessVerifier {
    working_dir: PathBuf,
}

impl ProcessVerifier {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl Verifier for ProcessVerifier {
    fn verify(&self, spec: &ToolSpec, timeout: Duration) -> ToolResult {
        let category = spec.category.as_str();

        let program = match spec.locator.resolve_program(&self.working_dir) {
            Ok(program) => program,
            Err(e) => {
                warn!(category, program = %spec.locator.program, "tool program not found");
                return ToolResult::runner_failure(
                    category,
                    format!("Tool program not found: {} ({e})", spec.locator.program),
                );
            }
        };

        info!(category, command = %spec.locator, "running verification tool");

        match run_process(&program, &spec.locator.args, &self.working_dir, timeout) {
            Ok(outcome) => normalize_outcome(category, &outcome),
            Err(e) => {
                warn!(category, error = %e, "failed to run verification tool");
                ToolResult::runner_failure(category, e.to_string())
            }
        }
    }
}
