//! Error types shared across the pipeline stages
//!
//! Tool invocation failures never show up here: the runner turns them into
//! synthetic results. These enums cover the cases a caller must handle.

use std::io;
use std::path::PathBuf;

/// A tool's stdout could not be turned into a result record
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid JSON output: expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Result contract violation: {0}")]
    Shape(serde_json::Error),
}

/// A pipeline report is malformed and must not be consumed
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to parse pipeline report: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Category '{0}' appears more than once in execution_order")]
    DuplicateInOrder(String),

    #[error("Category '{0}' appears more than once in verifications")]
    DuplicateVerification(String),

    #[error("Category '{0}' is listed in execution_order but has no verification result")]
    MissingVerification(String),

    #[error("Category '{0}' has a verification result but is not listed in execution_order")]
    UnlistedVerification(String),
}

/// Snapshot persistence failures
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize engine snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to replace snapshot file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Configuration loading and registry validation failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Tool category '{0}' is registered more than once")]
    DuplicateCategory(String),

    #[error("Tool category '{0}' has an empty command")]
    EmptyCommand(String),

    #[error("Tool category must not be empty")]
    EmptyCategory,
}
