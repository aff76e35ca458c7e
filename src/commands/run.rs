//! `veripipe run`: execute the pipeline, persist the snapshot, show the report

use anyhow::{Context, Result};
use tracing::warn;

use super::common::{print_json, OutputOptions, Project};
use crate::orchestrator::Orchestrator;
use crate::render::Renderer;
use crate::runner::ProcessVerifier;

/// Run every registered tool and report. Returns whether the system is ready.
///
/// Failing to persist the snapshot is logged and does not change the outcome.
pub fn execute(project: &Project, output: OutputOptions) -> Result<bool> {
    let registry = project
        .config()
        .registry()
        .context("Invalid tool registry")?;
    let orchestrator = Orchestrator::new(registry, ProcessVerifier::new(project.root()))
        .context("Invalid tool registry")?
        .with_timeout(project.config().timeout());

    let report = orchestrator.run();

    match project.engine().consume(&report) {
        Ok(snapshot) => {
            let memory = project.memory();
            if let Err(e) = memory.write(&snapshot) {
                warn!(path = %memory.path().display(), error = %e, "failed to persist engine snapshot");
            }
        }
        Err(e) => warn!(error = %e, "engine rejected pipeline report"),
    }

    if output.json {
        print_json(&report)?;
    } else {
        println!("{}", Renderer::new(output.render_config()).render(&report));
    }

    Ok(report.is_ready())
}
