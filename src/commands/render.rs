//! `veripipe render`: render a saved pipeline report

use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

use super::common::OutputOptions;
use crate::render::Renderer;

/// Render the report at `input`, or from stdin when `input` is absent or `-`
pub fn execute(input: Option<&Path>, output: OutputOptions) -> Result<()> {
    let renderer = Renderer::new(output.render_config());

    let rendered = match input.filter(|p| *p != Path::new("-")) {
        Some(path) => renderer.render_file(path)?,
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read report from stdin")?;
            renderer
                .render_json(&raw)
                .context("Invalid pipeline report on stdin")?
        }
    };

    println!("{rendered}");
    Ok(())
}
