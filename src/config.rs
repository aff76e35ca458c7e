//! Project configuration from `veripipe.toml`
//!
//! Every section is optional. A project without a config file runs the
//! default registry with the default timeout and memory location.
//!
//! ```toml
//! [pipeline]
//! timeout_secs = 30
//!
//! [[tool]]
//! category = "local_dependencies"
//! command = ["python3", "tools/core/local_dependency_check.py"]
//!
//! [memory]
//! path = ".veripipe/system_memory.json"
//!
//! [structure]
//! source_extension = "py"
//! layers = ["tools", "navigation", "architecture", "cli"]
//! ```

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::ConfigError;
use crate::intelligence::StructureConfig;
use crate::memory::DEFAULT_MEMORY_PATH;
use crate::orchestrator::{default_registry, validate_registry};
use crate::runner::{ToolLocator, ToolSpec, DEFAULT_TOOL_TIMEOUT};

pub const CONFIG_FILE_NAME: &str = "veripipe.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VERIPIPE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSection,
    #[serde(rename = "tool")]
    pub tools: Vec<ToolEntry>,
    pub memory: MemorySection,
    pub structure: StructureSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    /// Per-tool timeout; zero or absent means the default
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolEntry {
    pub category: String,
    /// Program followed by its fixed arguments
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemorySection {
    /// Snapshot file, relative to the project root unless absolute
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StructureSection {
    pub source_extension: Option<String>,
    pub layers: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub boundaries: Option<Vec<String>>,
}

impl Config {
    /// Load and parse the file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find the configuration for the project at `root`.
    ///
    /// Precedence: `explicit`, then `VERIPIPE_CONFIG`, then
    /// `<root>/veripipe.toml`. A named file must exist; the default one
    /// may be absent.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config from --config");
            return Self::load(path);
        }

        if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            let path = PathBuf::from(path);
            debug!(path = %path.display(), "loading config from {CONFIG_ENV_VAR}");
            return Self::load(&path);
        }

        let default_path = root.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            debug!(path = %default_path.display(), "loading project config");
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Registered tools in execution order, or the default registry
    pub fn registry(&self) -> Result<Vec<ToolSpec>, ConfigError> {
        if self.tools.is_empty() {
            return Ok(default_registry());
        }

        let registry = self
            .tools
            .iter()
            .map(|entry| {
                ToolLocator::from_command(&entry.category, &entry.command)
                    .map(|locator| ToolSpec::new(entry.category.clone(), locator))
            })
            .collect::<Result<Vec<_>, _>>()?;
        validate_registry(&registry)?;
        Ok(registry)
    }

    pub fn timeout(&self) -> Duration {
        self.pipeline
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOOL_TIMEOUT)
    }

    pub fn memory_path(&self, root: &Path) -> PathBuf {
        let path = self
            .memory
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEMORY_PATH));
        if path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    }

    /// Scan settings with unset fields taken from the defaults
    pub fn structure_config(&self) -> StructureConfig {
        let defaults = StructureConfig::default();
        let section = &self.structure;
        StructureConfig {
            source_extension: section
                .source_extension
                .clone()
                .map(|e| e.trim_start_matches('.').to_string())
                .unwrap_or(defaults.source_extension),
            layers: section.layers.clone().unwrap_or(defaults.layers),
            exclude: section.exclude.clone().unwrap_or(defaults.exclude),
            boundaries: section.boundaries.clone().unwrap_or(defaults.boundaries),
        }
    }
}
