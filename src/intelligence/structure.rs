//! Structural scan of the project tree
//!
//! Independent of verification results and deterministic for a fixed tree.

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Architectural rules declared for the scanned codebase
pub const DEFAULT_BOUNDARIES: [&str; 3] = [
    "Intelligence Wall (tools/core no AI)",
    "Linear Pipeline (orchestrator execution)",
    "Output Determinism (CLI JSON rendering)",
];

pub const DEFAULT_LAYERS: [&str; 4] = ["tools", "navigation", "architecture", "cli"];

pub const DEFAULT_EXCLUDES: [&str; 8] = [
    ".git",
    "__pycache__",
    "venv",
    ".venv",
    "target",
    "node_modules",
    ".veripipe",
    ".glaido",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureGraph {
    pub total_files: usize,
    pub total_directories: usize,
    /// Top-level area → number of source files in it
    pub layers: BTreeMap<String, usize>,
    /// Sorted `area/subarea` paths that contain source files
    pub modules: Vec<String>,
    pub boundaries: Vec<String>,
}

impl StructureGraph {
    /// Graph for a tree that could not be scanned
    pub fn empty(config: &StructureConfig) -> Self {
        Self {
            total_files: 0,
            total_directories: 0,
            layers: config.layers.iter().map(|l| (l.clone(), 0)).collect(),
            modules: Vec::new(),
            boundaries: config.boundaries.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureConfig {
    /// Extension (without dot) of files counted into layers and modules
    pub source_extension: String,
    pub layers: Vec<String>,
    /// Glob patterns matched against each path component
    pub exclude: Vec<String>,
    pub boundaries: Vec<String>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            source_extension: "py".to_string(),
            layers: DEFAULT_LAYERS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            boundaries: DEFAULT_BOUNDARIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StructureAnalyzer {
    root: PathBuf,
    config: StructureConfig,
    excludes: Vec<Pattern>,
}

impl StructureAnalyzer {
    /// Invalid exclude patterns are dropped with a warning
    pub fn new(root: impl Into<PathBuf>, config: StructureConfig) -> Self {
        let excludes = config
            .exclude
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "ignoring invalid exclude pattern");
                    None
                }
            })
            .collect();
        Self {
            root: root.into(),
            config,
            excludes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Walk the tree and build the structural graph.
    ///
    /// Fails only if the root itself cannot be read; unreadable
    /// subdirectories are counted but not descended into.
    pub fn analyze(&self) -> io::Result<StructureGraph> {
        let mut scan = Scan {
            graph: StructureGraph::empty(&self.config),
            modules: BTreeSet::new(),
        };

        let entries = sorted_entries(&self.root)?;
        self.walk(entries, &mut Vec::new(), &mut scan);

        scan.graph.modules = scan.modules.into_iter().collect();
        Ok(scan.graph)
    }

    fn walk(&self, entries: Vec<fs::DirEntry>, rel: &mut Vec<String>, scan: &mut Scan) {
        for entry in entries {
            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_excluded(&name) {
                continue;
            }

            let path = entry.path();
            let is_real_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_real_dir {
                scan.graph.total_directories += 1;
                match sorted_entries(&path) {
                    Ok(children) => {
                        rel.push(name);
                        self.walk(children, rel, scan);
                        rel.pop();
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping unreadable directory")
                    }
                }
            } else if path.is_dir() {
                // Symlinked directory: counted, not followed
                scan.graph.total_directories += 1;
            } else if path.is_file() {
                scan.graph.total_files += 1;
                if self.is_source(&path) {
                    self.record_source(rel, scan);
                }
            }
        }
    }

    fn record_source(&self, rel_dirs: &[String], scan: &mut Scan) {
        let Some(layer) = rel_dirs.first() else {
            // Files at the root belong to no layer
            return;
        };
        if let Some(count) = scan.graph.layers.get_mut(layer) {
            *count += 1;
        }
        if let Some(sub) = rel_dirs.get(1) {
            scan.modules.insert(format!("{layer}/{sub}"));
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excludes.iter().any(|p| p.matches(name))
    }

    fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|e| e.to_string_lossy() == self.config.source_extension)
    }
}

struct Scan {
    graph: StructureGraph,
    modules: BTreeSet<String>,
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}
