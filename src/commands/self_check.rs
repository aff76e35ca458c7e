//! `veripipe self-check`: is system memory usable

use anyhow::Result;

use super::common::{print_json, OutputOptions, Project};
use crate::render::{kv_pair, Palette};

/// Returns true only when memory is fully usable; degraded is reported but not ready
pub fn execute(project: &Project, output: OutputOptions) -> Result<bool> {
    let result = project.memory().self_check();

    if output.json {
        print_json(&result)?;
        return Ok(result.is_passing());
    }

    let p = Palette::new(&output.render_config());
    println!(
        "{}",
        kv_pair(&p, "System Memory", &project.memory().path().display().to_string(), 18)
    );
    if result.is_passing() {
        println!("{}", p.success_indicator(&result.message));
    } else {
        println!("{}", p.warning_indicator(&result.message));
        if let Some(error) = &result.error {
            println!("  {}", p.red(error));
        }
        if let Some(remediation) = &result.remediation {
            println!("  {} {}", p.arrow(), remediation);
        }
    }
    Ok(result.is_passing())
}
