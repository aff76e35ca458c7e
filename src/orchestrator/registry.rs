//! Default tool registration list

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::runner::{ToolLocator, ToolSpec};

/// Interpreter used by the bundled verification tools
const DEFAULT_INTERPRETER: &str = "python3";

/// Tools run when the configuration does not register its own, in order:
/// local dependencies and filesystem integrity first (critical), then
/// schema validation and the agent registry.
pub fn default_registry() -> Vec<ToolSpec> {
    [
        ("local_dependencies", "tools/core/local_dependency_check.py"),
        ("filesystem_integrity", "tools/core/filesystem_integrity_check.py"),
        ("schema_validation", "tools/core/schema_validator_stub.py"),
        ("agent_registry", "tools/agents/registry_readiness_check.py"),
    ]
    .into_iter()
    .map(|(category, script)| {
        ToolSpec::new(
            category,
            ToolLocator::new(DEFAULT_INTERPRETER, vec![script.to_string()]),
        )
    })
    .collect()
}

/// Reject registrations with empty or repeated categories
pub fn validate_registry(registry: &[ToolSpec]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for spec in registry {
        if spec.category.trim().is_empty() {
            return Err(ConfigError::EmptyCategory);
        }
        if !seen.insert(spec.category.as_str()) {
            return Err(ConfigError::DuplicateCategory(spec.category.clone()));
        }
    }
    Ok(())
}
