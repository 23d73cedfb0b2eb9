//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffSummary, ModelDiff, Refactoring};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(&self, diff: &ModelDiff, config: &ReportConfig) -> Result<String, ReportError> {
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
                generated_at: Utc::now().to_rfc3339(),
                title: config.title.as_deref(),
                before: config.metadata.before_path.as_deref(),
                after: config.metadata.after_path.as_deref(),
            },
            summary: &diff.summary,
            refactorings: diff.refactorings.iter().map(JsonRefactoring::from).collect(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures for serialization

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    summary: &'a DiffSummary,
    refactorings: Vec<JsonRefactoring<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    before: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

/// Flat record: entity refs stay internal to the de-duplication key.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRefactoring<'a> {
    #[serde(rename = "type")]
    refactoring_type: String,
    description: &'a str,
    left_side_locations: &'a [crate::diff::CodeLocation],
    right_side_locations: &'a [crate::diff::CodeLocation],
    confidence: f64,
}

impl<'a> From<&'a Refactoring> for JsonRefactoring<'a> {
    fn from(r: &'a Refactoring) -> Self {
        Self {
            refactoring_type: r.refactoring_type.to_string(),
            description: &r.description,
            left_side_locations: &r.left_locations,
            right_side_locations: &r.right_locations,
            confidence: r.confidence,
        }
    }
}
