//! System memory: the single latest engine snapshot on disk.
//!
//! There is no history. Each write replaces the file atomically through a
//! temp file in the same directory, so a reader sees either the previous
//! snapshot or the new one. Concurrent writers are not coordinated; the
//! last one wins.
//!
//! Reads never fail: a missing, unreadable or corrupt file reads as `None`.


use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::contract::{Status, ToolResult};
use crate::error::MemoryError;
use crate::intelligence::EngineSnapshot;

/// Snapshot location relative to the project root
pub const DEFAULT_MEMORY_PATH: &str = ".veripipe/system_memory.json";

/// Category reported by [`SystemMemory::self_check`]
pub const MEMORY_CATEGORY: &str = "system_memory";

#[derive(Debug, Clone)]
pub struct SystemMemory {
    path: PathBuf,
}

impl SystemMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Memory at the default location under `root`
    pub fn in_project(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_MEMORY_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the persisted snapshot with `snapshot`
    pub fn write(&self, snapshot: &EngineSnapshot) -> Result<(), MemoryError> {
        let parent = self.parent_dir();
        fs::create_dir_all(parent).map_err(|source| MemoryError::Io {
            path: parent.to_path_buf(),
            source,
        })?;

        let body = serde_json::to_string_pretty(snapshot)?;

        let io_err = |source: std::io::Error| MemoryError::Io {
            path: self.path.clone(),
            source,
        };
        let mut staging = NamedTempFile::new_in(parent).map_err(io_err)?;
        staging.write_all(body.as_bytes()).map_err(io_err)?;
        staging.write_all(b"\n").map_err(io_err)?;
        staging.as_file().sync_all().map_err(io_err)?;
        staging.persist(&self.path)?;

        debug!(path = %self.path.display(), bytes = body.len(), "engine snapshot persisted");
        Ok(())
    }

    /// The persisted snapshot, or `None` if there is no usable one
    pub fn read(&self) -> Option<EngineSnapshot> {
        let raw = self.read_to_string()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt engine snapshot");
                None
            }
        }
    }

    /// Check that the memory directory is usable.
    ///
    /// I/O problems give a `degraded` result: losing the snapshot never
    /// blocks a pipeline run.
    pub fn self_check(&self) -> ToolResult {
        let parent = self.parent_dir();
        let checked = fs::create_dir_all(parent).and_then(|_| fs::read_dir(parent).map(|_| ()));

        match checked {
            Ok(()) => {
                let size_bytes = fs::metadata(&self.path).map(|m| m.len()).ok();
                ToolResult::new(MEMORY_CATEGORY, Status::Ready, "System memory accessible.")
                    .with_results(json!({
                        "memory_path": self.path.display().to_string(),
                        "exists": size_bytes.is_some(),
                        "size_bytes": size_bytes.unwrap_or(0),
                    }))
            }
            Err(e) => {
                warn!(path = %parent.display(), error = %e, "system memory unavailable");
                let mut result = ToolResult::new(
                    MEMORY_CATEGORY,
                    Status::Degraded,
                    "System memory unavailable.",
                )
                .with_results(json!({
                    "memory_path": self.path.display().to_string(),
                    "exists": false,
                }))
                .with_remediation(format!(
                    "Check directory permissions for {}",
                    parent.display()
                ));
                result.error = Some(e.to_string());
                result
            }
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn read_to_string(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read engine snapshot");
                None
            }
        }
    }
}
