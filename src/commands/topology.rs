//! `veripipe topology`: execution map of the last pipeline run

use anyhow::Result;

use super::common::{print_json, OutputOptions, Project};
use crate::intelligence::{pipeline_topology, topology_check};

/// Returns false when there is no snapshot to draw
pub fn execute(project: &Project, output: OutputOptions) -> Result<bool> {
    let snapshot = project.latest_snapshot();
    let unicode = output.render_config().unicode;

    if output.json {
        let check = topology_check(snapshot.as_ref(), unicode);
        print_json(&check)?;
        return Ok(check.is_passing());
    }

    match snapshot {
        Some(snapshot) => {
            println!("{}", pipeline_topology(&snapshot.pipeline_state, unicode));
            Ok(true)
        }
        None => {
            eprintln!("No engine snapshot found. Run `veripipe run` first.");
            Ok(false)
        }
    }
}
