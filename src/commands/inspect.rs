//! `veripipe inspect`: diagnostics of the persisted snapshot

use anyhow::Result;

use super::common::{print_json, OutputOptions, Project};
use crate::intelligence::{inspect_snapshot, inspector_check};

/// Returns false when there is no snapshot to inspect
pub fn execute(project: &Project, output: OutputOptions) -> Result<bool> {
    let snapshot = project.latest_snapshot();

    if output.json {
        let check = inspector_check(snapshot.as_ref());
        print_json(&check)?;
        return Ok(check.is_passing());
    }

    match snapshot {
        Some(snapshot) => {
            println!("{}", inspect_snapshot(&snapshot));
            Ok(true)
        }
        None => {
            eprintln!("No engine snapshot found. Run `veripipe run` first.");
            Ok(false)
        }
    }
}
