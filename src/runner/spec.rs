//! Registration entries: which tool verifies which category

use shell_escape::escape;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// How to start a verification tool.
///
/// `args` are fixed at registration time (typically an interpreter's
/// script path); the pipeline never passes anything else to a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLocator {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolLocator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` command list
    pub fn from_command(category: &str, command: &[String]) -> Result<Self, ConfigError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ConfigError::EmptyCommand(category.to_string()))?;
        if program.trim().is_empty() {
            return Err(ConfigError::EmptyCommand(category.to_string()));
        }
        Ok(Self::new(program.clone(), args.to_vec()))
    }

    /// Resolve the program to an executable path.
    ///
    /// Paths (anything with a separator) are taken relative to `root`;
    /// bare names are looked up on `PATH`.
    pub fn resolve_program(&self, root: &Path) -> Result<PathBuf, which::Error> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 || program.is_absolute() {
            Ok(root.join(program))
        } else {
            which::which(&self.program)
        }
    }
}

impl fmt::Display for ToolLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", escape(Cow::Borrowed(self.program.as_str())))?;
        for arg in &self.args {
            write!(f, " {}", escape(Cow::Borrowed(arg.as_str())))?;
        }
        Ok(())
    }
}

/// One entry of the orchestrator's ordered registration list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub category: String,
    pub locator: ToolLocator,
}

impl ToolSpec {
    pub fn new(category: impl Into<String>, locator: ToolLocator) -> Self {
        Self {
            category: category.into(),
            locator,
        }
    }
}
