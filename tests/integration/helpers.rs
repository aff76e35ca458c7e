//! Shared fixtures: throwaway projects with shell-script tools

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A tool that prints a passing result for `category`
pub fn passing_tool(category: &str) -> String {
    format!(
        r#"echo '{{"category": "{category}", "status": "ready", "message": "ok", "actionable": false, "remediation": null, "results": {{}}, "metrics": {{"duration_ms": 1.5}}}}'"#
    )
}

/// A tool that prints a result with `status` and exits non-zero
pub fn failing_tool(category: &str, status: &str) -> String {
    format!(
        r#"echo '{{"category": "{category}", "status": "{status}", "message": "{category} check failed", "actionable": true, "remediation": "Fix {category}"}}'
exit 1"#
    )
}

/// Hangs in a subprocess of the tool shell
pub const SLOW_TOOL: &str = "sleep 10";
pub const GARBAGE_TOOL: &str = "echo 'this is not json'";

/// Temporary project whose tools are `(category, script body)` pairs,
/// registered in order through `veripipe.toml`
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new(tools: &[(&str, &str)]) -> Self {
        Self::with_timeout(tools, None)
    }

    pub fn with_timeout(tools: &[(&str, &str)], timeout_secs: Option<u64>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = dir.path();
        fs::create_dir_all(root.join("tools/core")).expect("Failed to create tools dir");

        let mut config = String::new();
        if let Some(secs) = timeout_secs {
            config.push_str(&format!("[pipeline]\ntimeout_secs = {secs}\n\n"));
        }
        for (category, body) in tools {
            let script = format!("tools/core/{category}.sh");
            fs::write(root.join(&script), format!("#!/bin/sh\n{body}\n"))
                .expect("Failed to write tool script");
            config.push_str(&format!(
                "[[tool]]\ncategory = \"{category}\"\ncommand = [\"sh\", \"{script}\"]\n\n"
            ));
        }
        fs::write(root.join("veripipe.toml"), config).expect("Failed to write config");

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn memory_path(&self) -> PathBuf {
        self.root().join(".veripipe/system_memory.json")
    }
}
