//! Pipeline report: the orchestrator's aggregate of one run

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use super::result::ToolResult;
use super::status::OverallStatus;
use crate::error::ReportError;

/// Identifier written into every report this crate produces
pub const ORCHESTRATOR_ID: &str = "verification_orchestrator";

/// Category → result mapping that keeps insertion order.
///
/// Serialized as a JSON object. Deserialization keeps repeated keys so
/// that validation can reject them instead of silently keeping the last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Verifications {
    entries: Vec<(String, ToolResult)>,
}

impl Verifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the result for `category`, returning the old one
    pub fn insert(&mut self, category: impl Into<String>, result: ToolResult) -> Option<ToolResult> {
        let category = category.into();
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => Some(std::mem::replace(existing, result)),
            None => {
                self.entries.push((category, result));
                None
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&ToolResult> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, r)| r)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ToolResult)> {
        self.entries.iter().map(|(c, r)| (c.as_str(), r))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &ToolResult> {
        self.entries.iter().map(|(_, r)| r)
    }
}

impl FromIterator<(String, ToolResult)> for Verifications {
    fn from_iter<T: IntoIterator<Item = (String, ToolResult)>>(iter: T) -> Self {
        let mut map = Verifications::new();
        for (category, result) in iter {
            map.insert(category, result);
        }
        map
    }
}

impl Serialize for Verifications {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, result) in &self.entries {
            map.serialize_entry(category, result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Verifications {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Verifications;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category to verification result")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, result)) = access.next_entry::<String, ToolResult>()? {
                    entries.push((category, result));
                }
                Ok(Verifications { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Aggregate of all results for one pipeline run.
///
/// `execution_order` defines both execution and display order and must be
/// a permutation of the keys of `verifications`; see [`PipelineReport::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    #[serde(default = "unknown_orchestrator")]
    pub orchestrator: String,
    #[serde(default)]
    pub overall_status: OverallStatus,
    #[serde(default)]
    pub verifications: Verifications,
    #[serde(default)]
    pub execution_order: Vec<String>,
    /// When the run finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn unknown_orchestrator() -> String {
    "unknown".to_string()
}

impl PipelineReport {
    /// Assemble a report; `overall_status` is derived, never supplied
    pub fn new(execution_order: Vec<String>, verifications: Verifications) -> Self {
        let overall_status = OverallStatus::aggregate(verifications.values());
        Self {
            orchestrator: ORCHESTRATOR_ID.to_string(),
            overall_status,
            verifications,
            execution_order,
            timestamp: Some(super::result::now_timestamp()),
        }
    }

    /// Parse raw orchestrator output and validate it
    pub fn from_json(raw: &str) -> Result<Self, ReportError> {
        let report: PipelineReport = serde_json::from_str(raw)?;
        report.validate()?;
        Ok(report)
    }

    /// Accept an already-parsed JSON value and validate it
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        let report: PipelineReport = serde_json::from_value(value)?;
        report.validate()?;
        Ok(report)
    }

    /// Reject reports whose `execution_order` is not a permutation of the
    /// `verifications` keys
    pub fn validate(&self) -> Result<(), ReportError> {
        let mut ordered = HashSet::new();
        for category in &self.execution_order {
            if !ordered.insert(category.as_str()) {
                return Err(ReportError::DuplicateInOrder(category.clone()));
            }
        }

        let mut seen = HashSet::new();
        for category in self.verifications.keys() {
            if !seen.insert(category) {
                return Err(ReportError::DuplicateVerification(category.to_string()));
            }
            if !ordered.contains(category) {
                return Err(ReportError::UnlistedVerification(category.to_string()));
            }
        }

        if let Some(missing) = self
            .execution_order
            .iter()
            .find(|c| !seen.contains(c.as_str()))
        {
            return Err(ReportError::MissingVerification(missing.clone()));
        }

        Ok(())
    }

    /// Results in `execution_order`. Categories without a result are skipped,
    /// which cannot happen for a validated report.
    pub fn ordered_results(&self) -> impl Iterator<Item = (&str, &ToolResult)> {
        self.execution_order.iter().filter_map(|category| {
            self.verifications
                .get(category)
                .map(|result| (category.as_str(), result))
        })
    }

    pub fn is_ready(&self) -> bool {
        self.overall_status.is_ready()
    }

    pub fn passed_count(&self) -> usize {
        self.verifications.values().filter(|r| r.is_passing()).count()
    }

    pub fn has_degraded(&self) -> bool {
        self.verifications.values().any(|r| r.is_degraded())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
