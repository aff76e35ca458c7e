//! Typed views over the payloads of the known tool categories
//!
//! Decoding is opportunistic: a payload that does not match the expected
//! shape falls back to [`CategoryPayload::Opaque`] and is never an error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::result::ToolResult;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PythonVersion {
    pub current: Option<String>,
    pub required: Option<String>,
    pub meets_requirement: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissingList {
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocalDependencies {
    pub python_version: Option<PythonVersion>,
    pub modules: MissingList,
}

impl LocalDependencies {
    /// A missing version block counts as not meeting the requirement
    pub fn meets_python_requirement(&self) -> bool {
        self.python_version
            .as_ref()
            .map(|v| v.meets_requirement)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilesystemIntegrity {
    pub directories: MissingList,
    pub core_files: MissingList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidatorImport {
    pub importable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidatorFile {
    pub exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchemaValidation {
    pub validator_import: Option<ValidatorImport>,
    pub validator_file: Option<ValidatorFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentRegistry {
    pub registry_exists: bool,
    pub registry_valid_json: bool,
    pub agent_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackageDetail {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackageSummary {
    pub packages_checked: u64,
    pub packages_present: Option<u64>,
    pub details: Vec<PackageDetail>,
}

impl PackageSummary {
    pub fn present(&self) -> u64 {
        self.packages_present.unwrap_or(self.packages_checked)
    }

    pub fn missing(&self) -> Vec<&str> {
        self.details
            .iter()
            .filter(|d| d.status == "missing")
            .map(|d| d.name.as_str())
            .collect()
    }
}

/// One finding of a scanning tool. Tools fill different subsets of fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Violation {
    pub path: Option<String>,
    pub rule: Option<String>,
    pub file: Option<String>,
    pub line: Option<Value>,
    pub import: Option<String>,
    pub reason: Option<String>,
    pub broken_link: Option<String>,
}

impl Violation {
    /// Line number as displayed; `?` when absent
    pub fn line_display(&self) -> String {
        match &self.line {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => "?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViolationList {
    pub violations: Vec<Violation>,
}

/// Categories whose payload shape is known
pub const KNOWN_CATEGORIES: [&str; 10] = [
    "local_dependencies",
    "workspace_hygiene",
    "python_syntax",
    "ant_boundary",
    "pipeline_integrity",
    "architecture_links",
    "filesystem_integrity",
    "python_packages",
    "schema_validation",
    "agent_registry",
];

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryPayload {
    LocalDependencies(LocalDependencies),
    FilesystemIntegrity(FilesystemIntegrity),
    SchemaValidation(SchemaValidation),
    AgentRegistry(AgentRegistry),
    PythonPackages(PackageSummary),
    Violations(ViolationList),
    /// Unknown category, or a known one whose payload did not decode
    Opaque(Value),
}

impl CategoryPayload {
    /// Decode the payload of `result` according to its category.
    ///
    /// Older tools put their fields at the top level of the record; newer
    /// ones nest them under `results`.
    pub fn from_result(category: &str, result: &ToolResult) -> Self {
        let top_level = Value::Object(result.extra.clone());
        let nested = result.results.clone().unwrap_or(Value::Null);

        let decoded = match category {
            "local_dependencies" => decode(top_level).map(Self::LocalDependencies),
            "filesystem_integrity" => decode(top_level).map(Self::FilesystemIntegrity),
            "schema_validation" => decode(top_level).map(Self::SchemaValidation),
            "agent_registry" => decode(top_level).map(Self::AgentRegistry),
            "python_packages" => decode(nested.clone()).map(Self::PythonPackages),
            "workspace_hygiene" | "python_syntax" | "ant_boundary" | "pipeline_integrity"
            | "architecture_links" => decode(nested.clone()).map(Self::Violations),
            _ => None,
        };

        decoded.unwrap_or(Self::Opaque(nested))
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    pub fn is_known_category(category: &str) -> bool {
        KNOWN_CATEGORIES.contains(&category)
    }
}

fn decode<T: DeserializeOwned + Default>(value: Value) -> Option<T> {
    match value {
        Value::Null => Some(T::default()),
        other => serde_json::from_value(other).ok(),
    }
}
