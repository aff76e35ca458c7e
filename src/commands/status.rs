//! `veripipe status`: offline engine status from the persisted snapshot

use anyhow::Result;

use super::common::{print_json, OutputOptions, Project};
use crate::intelligence::{EngineStatus, PipelineOverview};
use crate::render::{kv_pair, Palette};

const ALIGN: usize = 18;

pub fn execute(project: &Project, output: OutputOptions) -> Result<()> {
    let snapshot = project.latest_snapshot();
    let status = EngineStatus::from_snapshot(snapshot.as_ref());

    if output.json {
        return print_json(&status);
    }

    let overview = PipelineOverview::from_snapshot(snapshot.as_ref());
    let p = Palette::new(&output.render_config());
    println!("{}", kv_pair(&p, "Engine", &status.status, ALIGN));
    println!("{}", kv_pair(&p, "Intelligence", &status.intelligence_layer, ALIGN));
    println!(
        "{}",
        kv_pair(&p, "Integrity Score", &format!("{:.2}%", status.integrity_score), ALIGN)
    );
    println!(
        "{}",
        kv_pair(&p, "Latest Pipeline", &status.latest_pipeline_status.to_uppercase(), ALIGN)
    );
    println!("{}", kv_pair(&p, "Tools", &overview.total_tools.to_string(), ALIGN));
    if let Some(timestamp) = &overview.timestamp {
        println!("{}", kv_pair(&p, "Snapshot At", timestamp, ALIGN));
    }
    println!("{}", p.info_indicator(&status.message));
    Ok(())
}
