//! Per-category presentation: labels, table details, error lines, remediation
//!
//! Known categories get a dedicated [`CategoryView`]; anything else falls
//! back to [`DefaultView`]. Views read the typed payload decoded once by
//! the renderer and tolerate an opaque one.

use std::collections::HashMap;

use super::style::Palette;
use crate::contract::payload::{CategoryPayload, PackageSummary, Violation, ViolationList};
use crate::contract::ToolResult;

const DEFAULT_PYTHON_REQUIREMENT: &str = "3.8";

/// How one tool category is presented
pub trait CategoryView {
    /// Label in the results table
    fn label(&self, category: &str) -> String {
        title_case(category)
    }

    /// Table detail for a passing result
    fn detail(&self, result: &ToolResult, payload: &CategoryPayload) -> String;

    /// Extra lines under "Error Details" for a non-passing result
    fn errors(&self, _result: &ToolResult, _payload: &CategoryPayload, _palette: &Palette) -> Vec<String> {
        Vec::new()
    }

    /// Steps under "Required Actions" for a failed result
    fn remediation(&self, result: &ToolResult, _payload: &CategoryPayload) -> Vec<String> {
        result.remediation.iter().cloned().collect()
    }

    /// Table detail: a non-passing result shows its own message when it has one
    fn describe(&self, result: &ToolResult, payload: &CategoryPayload) -> String {
        if !result.is_passing() && !result.message.is_empty() {
            result.message.clone()
        } else {
            self.detail(result, payload)
        }
    }
}

/// `snake_case` → `Snake Case`
pub fn title_case(category: &str) -> String {
    category
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Fallback for categories without a dedicated view
pub struct DefaultView;

impl CategoryView for DefaultView {
    fn detail(&self, result: &ToolResult, _payload: &CategoryPayload) -> String {
        if result.message.is_empty() {
            "OK".to_string()
        } else {
            result.message.clone()
        }
    }
}

struct LocalDependenciesView;

impl CategoryView for LocalDependenciesView {
    fn label(&self, _category: &str) -> String {
        "Local Dependencies".to_string()
    }

    fn detail(&self, _result: &ToolResult, payload: &CategoryPayload) -> String {
        let current = match payload {
            CategoryPayload::LocalDependencies(deps) => deps
                .python_version
                .as_ref()
                .and_then(|v| v.current.clone())
                .filter(|c| !c.is_empty()),
            _ => None,
        };
        match current {
            Some(version) => format!("Python {version}"),
            None => "All OK".to_string(),
        }
    }

    fn errors(&self, _result: &ToolResult, payload: &CategoryPayload, _palette: &Palette) -> Vec<String> {
        let CategoryPayload::LocalDependencies(deps) = payload else {
            return Vec::new();
        };
        let mut lines = Vec::new();
        if !deps.meets_python_requirement() {
            let version = deps.python_version.clone().unwrap_or_default();
            lines.push(format!(
                "Python {} does not meet requirement (≥{})",
                version.current.as_deref().unwrap_or("unknown"),
                version.required.as_deref().unwrap_or(DEFAULT_PYTHON_REQUIREMENT)
            ));
        }
        if !deps.modules.missing.is_empty() {
            lines.push(format!("Missing modules: {}", deps.modules.missing.join(", ")));
        }
        lines
    }

    fn remediation(&self, _result: &ToolResult, payload: &CategoryPayload) -> Vec<String> {
        let CategoryPayload::LocalDependencies(deps) = payload else {
            return Vec::new();
        };
        let mut steps = Vec::new();
        if !deps.meets_python_requirement() {
            let required = deps
                .python_version
                .as_ref()
                .and_then(|v| v.required.as_deref())
                .unwrap_or(DEFAULT_PYTHON_REQUIREMENT);
            steps.push(format!("Upgrade Python to version {required} or higher"));
        }
        if !deps.modules.missing.is_empty() {
            steps.push(format!(
                "Install missing modules: {}",
                deps.modules.missing.join(", ")
            ));
        }
        steps
    }
}

struct FilesystemView;

impl CategoryView for FilesystemView {
    fn label(&self, _category: &str) -> String {
        "Filesystem Integrity".to_string()
    }

    fn detail(&self, _result: &ToolResult, _payload: &CategoryPayload) -> String {
        "All directories present".to_string()
    }

    fn errors(&self, _result: &ToolResult, payload: &CategoryPayload, _palette: &Palette) -> Vec<String> {
        let CategoryPayload::FilesystemIntegrity(fs) = payload else {
            return Vec::new();
        };
        let mut lines = Vec::new();
        if !fs.directories.missing.is_empty() {
            lines.push(format!(
                "Missing directories: {}",
                fs.directories.missing.join(", ")
            ));
        }
        if !fs.core_files.missing.is_empty() {
            lines.push(format!("Missing files: {}", fs.core_files.missing.join(", ")));
        }
        lines
    }

    fn remediation(&self, _result: &ToolResult, payload: &CategoryPayload) -> Vec<String> {
        match payload {
            CategoryPayload::FilesystemIntegrity(fs) if !fs.directories.missing.is_empty() => {
                vec!["Create missing directories using project structure".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

struct SchemaValidationView;

impl CategoryView for SchemaValidationView {
    fn label(&self, _category: &str) -> String {
        "Schema Validation".to_string()
    }

    fn detail(&self, _result: &ToolResult, _payload: &CategoryPayload) -> String {
        "Validator importable".to_string()
    }

    fn errors(&self, _result: &ToolResult, payload: &CategoryPayload, _palette: &Palette) -> Vec<String> {
        match payload {
            CategoryPayload::SchemaValidation(schema)
                if !schema.validator_import.as_ref().is_some_and(|i| i.importable) =>
            {
                vec!["Schema validator not importable".to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn remediation(&self, _result: &ToolResult, payload: &CategoryPayload) -> Vec<String> {
        match payload {
            CategoryPayload::SchemaValidation(schema)
                if !schema.validator_file.as_ref().is_some_and(|f| f.exists) =>
            {
                vec!["Create tools/core/validator.py module".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

struct AgentRegistryView;

impl CategoryView for AgentRegistryView {
    fn label(&self, _category: &str) -> String {
        "Agent Registry".to_string()
    }

    fn detail(&self, _result: &ToolResult, payload: &CategoryPayload) -> String {
        let count = match payload {
            CategoryPayload::AgentRegistry(registry) => registry.agent_count,
            _ => 0,
        };
        format!("{count} agents")
    }

    fn errors(&self, _result: &ToolResult, payload: &CategoryPayload, _palette: &Palette) -> Vec<String> {
        let CategoryPayload::AgentRegistry(registry) = payload else {
            return Vec::new();
        };
        if !registry.registry_exists {
            vec!["Registry file not found".to_string()]
        } else if !registry.registry_valid_json {
            vec!["Registry file is not valid JSON".to_string()]
        } else {
            Vec::new()
        }
    }

    fn remediation(&self, _result: &ToolResult, payload: &CategoryPayload) -> Vec<String> {
        match payload {
            CategoryPayload::AgentRegistry(registry) if !registry.registry_exists => {
                vec!["Create agents/_registry.json file".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

struct PythonPackagesView;

impl PythonPackagesView {
    fn summary(payload: &CategoryPayload) -> Option<&PackageSummary> {
        match payload {
            CategoryPayload::PythonPackages(summary) => Some(summary),
            _ => None,
        }
    }
}

impl CategoryView for PythonPackagesView {
    fn label(&self, _category: &str) -> String {
        "Python Packages".to_string()
    }

    fn detail(&self, _result: &ToolResult, payload: &CategoryPayload) -> String {
        let summary = Self::summary(payload).cloned().unwrap_or_default();
        let (present, total) = (summary.present(), summary.packages_checked);
        if present == total {
            format!("All {total} packages importable")
        } else {
            format!("{present}/{total} present")
        }
    }

    fn errors(&self, _result: &ToolResult, payload: &CategoryPayload, palette: &Palette) -> Vec<String> {
        let Some(summary) = Self::summary(payload) else {
            return Vec::new();
        };
        let missing = summary.missing();
        let mut lines = vec![format!(
            "{} of {} packages importable",
            summary.packages_present.unwrap_or(0),
            summary.packages_checked
        )];
        for package in &missing {
            lines.push(format!(
                "{} {} not installed",
                palette.red(&format!("{} {package}", palette.bullet())),
                if palette.unicode() { "—" } else { "-" }
            ));
        }
        if !missing.is_empty() {
            lines.push(palette.cyan(&format!(
                "{} Install missing packages manually (offline-first rule)",
                palette.arrow()
            )));
        }
        lines
    }

    fn remediation(&self, _result: &ToolResult, payload: &CategoryPayload) -> Vec<String> {
        let missing = Self::summary(payload).map(|s| s.missing()).unwrap_or_default();
        if missing.is_empty() {
            Vec::new()
        } else {
            vec![
                format!(
                    "Verify Python installation completeness, missing: {}",
                    missing.join(", ")
                ),
                "See architecture/sops/verification_operational_guidelines.md \
                 §Package Dependency Failures for remediation guidance"
                    .to_string(),
            ]
        }
    }
}

/// Scanning tools that report a list of violations
#[derive(Debug, Clone, Copy)]
enum ViolationKind {
    WorkspaceHygiene,
    PythonSyntax,
    AntBoundary,
    PipelineIntegrity,
    ArchitectureLinks,
}

struct ViolationsView(ViolationKind);

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

impl ViolationsView {
    fn violations(payload: &CategoryPayload) -> &[Violation] {
        match payload {
            CategoryPayload::Violations(ViolationList { violations }) => violations.as_slice(),
            _ => &[],
        }
    }

    fn summary_line(&self, count: usize) -> String {
        let noun = match self.0 {
            ViolationKind::WorkspaceHygiene | ViolationKind::AntBoundary => "violation(s)",
            ViolationKind::PythonSyntax => "syntax error(s)",
            ViolationKind::PipelineIntegrity => "orphaned tool(s)",
            ViolationKind::ArchitectureLinks => "broken link(s)",
        };
        format!("{count} {noun} detected")
    }

    fn example_line(&self, first: &Violation) -> String {
        match self.0 {
            ViolationKind::WorkspaceHygiene => {
                format!("Example: {} ({})", or_none(&first.path), or_none(&first.rule))
            }
            ViolationKind::PythonSyntax => format!(
                "First error: {}:{}",
                or_none(&first.file),
                first.line_display()
            ),
            ViolationKind::AntBoundary => format!(
                "First error: {} in {}:{}",
                or_none(&first.import),
                or_none(&first.file),
                first.line_display()
            ),
            ViolationKind::PipelineIntegrity => format!(
                "First error: {} {}",
                or_none(&first.file),
                or_none(&first.reason)
            ),
            ViolationKind::ArchitectureLinks => format!(
                "First error: {} in {}:{}",
                or_none(&first.broken_link),
                or_none(&first.file),
                first.line_display()
            ),
        }
    }
}

impl CategoryView for ViolationsView {
    fn label(&self, _category: &str) -> String {
        match self.0 {
            ViolationKind::WorkspaceHygiene => "Workspace Hygiene",
            ViolationKind::PythonSyntax => "Python Syntax",
            ViolationKind::AntBoundary => "A.N.T Boundary",
            ViolationKind::PipelineIntegrity => "Pipeline Integrity",
            ViolationKind::ArchitectureLinks => "Architecture Links",
        }
        .to_string()
    }

    fn detail(&self, _result: &ToolResult, _payload: &CategoryPayload) -> String {
        match self.0 {
            ViolationKind::WorkspaceHygiene => "Workspace structure verified",
            ViolationKind::PythonSyntax => "No syntax errors detected",
            ViolationKind::AntBoundary => "Layer boundaries respected",
            ViolationKind::PipelineIntegrity => "All tools registered",
            ViolationKind::ArchitectureLinks => "No broken architecture links",
        }
        .to_string()
    }

    fn errors(&self, _result: &ToolResult, payload: &CategoryPayload, _palette: &Palette) -> Vec<String> {
        let violations = Self::violations(payload);
        let mut lines = vec![self.summary_line(violations.len())];
        if let Some(first) = violations.first() {
            lines.push(self.example_line(first));
        }
        lines
    }
}

/// Category name → view, with [`DefaultView`] for everything else
pub struct CategoryRegistry {
    views: HashMap<String, Box<dyn CategoryView>>,
    fallback: DefaultView,
}

impl CategoryRegistry {
    /// Registry with no dedicated views
    pub fn empty() -> Self {
        Self {
            views: HashMap::new(),
            fallback: DefaultView,
        }
    }

    /// Views for the ten known categories
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("local_dependencies", LocalDependenciesView);
        registry.register("filesystem_integrity", FilesystemView);
        registry.register("schema_validation", SchemaValidationView);
        registry.register("agent_registry", AgentRegistryView);
        registry.register("python_packages", PythonPackagesView);
        for (category, kind) in [
            ("workspace_hygiene", ViolationKind::WorkspaceHygiene),
            ("python_syntax", ViolationKind::PythonSyntax),
            ("ant_boundary", ViolationKind::AntBoundary),
            ("pipeline_integrity", ViolationKind::PipelineIntegrity),
            ("architecture_links", ViolationKind::ArchitectureLinks),
        ] {
            registry.register(category, ViolationsView(kind));
        }
        registry
    }

    /// Add or replace the view for `category`
    pub fn register(&mut self, category: impl Into<String>, view: impl CategoryView + 'static) {
        self.views.insert(category.into(), Box::new(view));
    }

    pub fn view(&self, category: &str) -> &dyn CategoryView {
        match self.views.get(category) {
            Some(view) => &**view,
            None => &self.fallback,
        }
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
