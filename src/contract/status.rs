//! Status vocabulary shared by every verification tool

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Status a verification tool reports for its precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    Ready,
    Healthy,
    /// Impaired but not blocking
    Degraded,
    Error,
    NotReady,
    #[default]
    Unknown,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Ready,
        Status::Healthy,
        Status::Degraded,
        Status::Error,
        Status::NotReady,
        Status::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Healthy => "healthy",
            Status::Degraded => "degraded",
            Status::Error => "error",
            Status::NotReady => "not_ready",
            Status::Unknown => "unknown",
        }
    }

    /// Only `ready` and `healthy` count as passing during aggregation
    pub fn is_passing(&self) -> bool {
        matches!(self, Status::Ready | Status::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Status::Degraded)
    }

    /// Upper-case label used in rendered tables
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = std::convert::Infallible;

    /// Unrecognised strings map to `Unknown` instead of failing
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ready" => Status::Ready,
            "healthy" => Status::Healthy,
            "degraded" => Status::Degraded,
            "error" => Status::Error,
            "not_ready" => Status::NotReady,
            _ => Status::Unknown,
        })
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Aggregate status of a whole pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Ready,
    #[default]
    NotReady,
}

impl OverallStatus {
    /// `Ready` iff every result was executed and reports a passing status.
    ///
    /// There is no partial credit: a single `degraded` result yields `NotReady`.
    pub fn aggregate<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a super::ToolResult>,
    {
        let all_passed = results
            .into_iter()
            .all(|r| r.executed && r.status.is_passing());
        if all_passed {
            OverallStatus::Ready
        } else {
            OverallStatus::NotReady
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Ready => "ready",
            OverallStatus::NotReady => "not_ready",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, OverallStatus::Ready)
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
