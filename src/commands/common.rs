//! Project context shared by the commands

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::intelligence::{EngineSnapshot, IntelligenceEngine, StructureAnalyzer};
use crate::memory::SystemMemory;
use crate::render::RenderConfig;

/// The project being verified and its configuration
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Resolve `root` and load its configuration
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Project root not found: {}", root.display()))?;
        let config = Config::discover(&root, config_path)?;
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory(&self) -> SystemMemory {
        SystemMemory::new(self.config.memory_path(&self.root))
    }

    pub fn engine(&self) -> IntelligenceEngine {
        IntelligenceEngine::new(StructureAnalyzer::new(
            &self.root,
            self.config.structure_config(),
        ))
    }

    pub fn latest_snapshot(&self) -> Option<EngineSnapshot> {
        self.memory().read()
    }
}

/// Terminal output flags common to the rendering commands
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub no_color: bool,
    pub ascii: bool,
}

impl OutputOptions {
    /// `--no-color` or `NO_COLOR` drop both colour and box-drawing glyphs;
    /// `--ascii` drops only the glyphs
    pub fn render_config(&self) -> RenderConfig {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let plain = self.no_color || no_color_env;
        RenderConfig {
            color: !plain,
            unicode: !(plain || self.ascii),
            ..RenderConfig::default()
        }
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
