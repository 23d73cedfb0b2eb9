//! Report generation for diff results.
//!
//! Two output formats:
//! - JSON: the refactoring list in the `type` / `description` /
//!   `leftSideLocations` / `rightSideLocations` shape, for tooling
//! - Summary: compact shell-friendly output
//!
//! Reporters only render; filtering happens before a diff reaches them.

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::ModelDiff;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a diff result
    fn generate_diff_report(&self, diff: &ModelDiff, config: &ReportConfig) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_diff_report(
        &self,
        diff: &ModelDiff,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_diff_report(diff, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(format: ReportFormat, use_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_for_each_format() {
        for format in [ReportFormat::Summary, ReportFormat::Json] {
            assert_eq!(create_reporter(format).format(), format);
        }
    }

    #[test]
    fn test_write_diff_report() {
        let mut buffer = Vec::new();
        JsonReporter::new()
            .write_diff_report(&ModelDiff::default(), &ReportConfig::default(), &mut buffer)
            .expect("writes to memory");
        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");
        assert_eq!(value["refactorings"], serde_json::json!([]));
    }
}
