//! The result record every verification tool emits

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::status::Status;
use crate::error::ContractError;

/// Timing reported by (or measured for) a tool run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolMetrics {
    #[serde(default)]
    pub duration_ms: f64,
}

/// One verification tool's result for one pipeline run.
///
/// Optional fields default when absent. Fields this struct does not know
/// about (older tools put their payload at the top level) are kept in
/// `extra` and written back flat, so the wire format round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: Status,
    /// ISO-8601 with offset, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub actionable: bool,
    #[serde(default)]
    pub remediation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ToolMetrics>,
    /// False only when the runner could not obtain any output
    #[serde(default)]
    pub executed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolResult {
    /// Build a result from a tool's raw stdout.
    ///
    /// The output must be a single JSON object. The registered `category`
    /// fills in for a missing one; `executed` and `exit_code` are stamped.
    pub fn from_tool_output(
        category: &str,
        stdout: &str,
        exit_code: Option<i32>,
    ) -> Result<Self, ContractError> {
        let value: Value = serde_json::from_str(stdout)?;
        if !value.is_object() {
            return Err(ContractError::NotAnObject(json_kind(&value)));
        }

        let mut result: ToolResult = serde_json::from_value(value).map_err(ContractError::Shape)?;
        if result.category.is_empty() {
            result.category = category.to_string();
        }
        result.executed = true;
        result.exit_code = exit_code;
        Ok(result)
    }

    /// Synthetic result for a tool the runner could not get output from
    pub fn runner_failure(category: &str, error: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            status: Status::Error,
            timestamp: Some(now_timestamp()),
            message: "Tool execution failed".to_string(),
            actionable: true,
            remediation: None,
            results: None,
            metrics: None,
            executed: false,
            exit_code: None,
            error: Some(error.into()),
            extra: Map::new(),
        }
    }

    /// Build a result in-process, e.g. for self-checks that follow the same contract
    pub fn new(category: &str, status: Status, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            status,
            timestamp: Some(now_timestamp()),
            message: message.into(),
            actionable: !status.is_passing(),
            remediation: None,
            results: None,
            metrics: None,
            executed: true,
            exit_code: None,
            error: None,
            extra: Map::new(),
        }
    }

    pub fn with_results(mut self, results: Value) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.metrics = Some(ToolMetrics { duration_ms });
        self
    }

    pub fn is_passing(&self) -> bool {
        self.status.is_passing()
    }

    pub fn is_degraded(&self) -> bool {
        self.status.is_degraded()
    }

    /// Reported duration, 0 when the tool did not report one
    pub fn duration_ms(&self) -> f64 {
        self.metrics.map(|m| m.duration_ms).unwrap_or(0.0)
    }
}

/// Current time in the contract's timestamp format
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
