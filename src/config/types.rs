//! Configuration types for refminer operations.

use crate::diff::{ModelDiff, RefactoringType};
use crate::error::Result;
use crate::matching::{MatchThresholds, MatchingConfig};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Matching preset and threshold overrides
    pub matching: MatchingSection,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Report filtering (type allowlist, minimum confidence)
    pub filtering: FilterConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the matching preset.
    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.config.matching.preset = preset.into();
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Only report these refactoring types.
    pub fn types(mut self, types: Vec<String>) -> Self {
        self.config.filtering.types = types;
        self
    }

    pub const fn min_confidence(mut self, min_confidence: Option<f64>) -> Self {
        self.config.filtering.min_confidence = min_confidence;
        self
    }

    pub const fn fail_on_refactoring(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_refactoring = fail;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.behavior.parallel = parallel;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Command Configuration
// ============================================================================

/// Configuration for the `diff` command.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    pub paths: DiffPaths,
    pub matching: MatchingSection,
    pub output: OutputConfig,
    pub filtering: FilterConfig,
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    /// Combine input paths with application settings.
    #[must_use]
    pub fn from_app_config(paths: DiffPaths, app: AppConfig) -> Self {
        Self {
            paths,
            matching: app.matching,
            output: app.output,
            filtering: app.filtering,
            behavior: app.behavior,
        }
    }
}

/// Input files for a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPaths {
    /// Snapshot document of the earlier revision
    pub before: PathBuf,
    /// Snapshot document of the later revision
    pub after: PathBuf,
    /// Optional JSON object of rename hints
    pub hints: Option<PathBuf>,
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Matching preset selection with optional per-kind threshold overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchingSection {
    /// Preset name: strict, balanced or permissive
    pub preset: String,
    /// Class acceptance threshold (overrides preset)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub class_threshold: Option<f64>,
    /// Method acceptance threshold (overrides preset)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub method_threshold: Option<f64>,
    /// Field acceptance threshold (overrides preset)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub field_threshold: Option<f64>,
    /// Minimum body overlap for extract/inline method (overrides preset)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub extract_overlap: Option<f64>,
}

impl Default for MatchingSection {
    fn default() -> Self {
        Self {
            preset: super::DEFAULT_MATCHING_PRESET.to_string(),
            class_threshold: None,
            method_threshold: None,
            field_threshold: None,
            extract_overlap: None,
        }
    }
}

impl MatchingSection {
    /// Resolve the preset and apply threshold overrides.
    #[must_use]
    pub fn to_matching_config(&self) -> MatchingConfig {
        let config = MatchingConfig::from_preset(&self.preset).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown matching preset '{}', using 'balanced'. Valid: strict, balanced, permissive",
                self.preset
            );
            MatchingConfig::balanced()
        });

        let base = &config.thresholds;
        let thresholds = MatchThresholds {
            class: self.class_threshold.unwrap_or(base.class),
            method: self.method_threshold.unwrap_or(base.method),
            field: self.field_threshold.unwrap_or(base.field),
            extract_overlap: self.extract_overlap.unwrap_or(base.extract_overlap),
        };
        config.with_thresholds(thresholds)
    }

    /// Whether any threshold is overridden.
    #[must_use]
    pub const fn has_overrides(&self) -> bool {
        self.class_threshold.is_some()
            || self.method_threshold.is_some()
            || self.field_threshold.is_some()
            || self.extract_overlap.is_some()
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Filtering of reported refactorings.
///
/// Applied to a finished [`ModelDiff`]; never changes what is detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterConfig {
    /// Refactoring types to report, by display name (empty reports all)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Drop refactorings below this confidence
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub min_confidence: Option<f64>,
}

impl FilterConfig {
    /// Whether the filter drops anything at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.types.is_empty() || self.min_confidence.is_some()
    }

    /// Parse the type allowlist.
    pub fn allowed_types(&self) -> Result<Vec<RefactoringType>> {
        self.types.iter().map(|name| name.parse()).collect()
    }

    /// A copy of `diff` keeping only the allowed refactorings.
    pub fn apply(&self, diff: &ModelDiff) -> Result<ModelDiff> {
        if !self.is_active() {
            return Ok(diff.clone());
        }
        let allowed = self.allowed_types()?;
        let min_confidence = self.min_confidence.unwrap_or(0.0);
        Ok(diff.filtered(|r| {
            (allowed.is_empty() || allowed.contains(&r.refactoring_type)) && r.confidence >= min_confidence
        }))
    }
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any refactoring is reported
    pub fail_on_refactoring: bool,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Score candidates and run detectors on multiple threads
    pub parallel: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            fail_on_refactoring: false,
            quiet: false,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{EntityRef, MatchSet, Refactoring};

    fn sample_diff() -> ModelDiff {
        let record = |kind: RefactoringType, confidence: f64| {
            Refactoring::new(kind, EntityRef::class("a.A"), EntityRef::class("a.B"), kind.to_string(), confidence)
        };
        ModelDiff::new(
            MatchSet::default(),
            vec![
                record(RefactoringType::RenameClass, 0.9),
                record(RefactoringType::ChangeClassModifier, 0.4),
            ],
        )
    }

    #[test]
    fn test_threshold_overrides() {
        let section = MatchingSection {
            preset: "strict".to_string(),
            method_threshold: Some(0.65),
            ..MatchingSection::default()
        };
        let config = section.to_matching_config();
        assert!((config.thresholds.method - 0.65).abs() < f64::EPSILON);
        assert!((config.thresholds.class - MatchThresholds::strict().class).abs() < f64::EPSILON);
        assert!(section.has_overrides());
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let section = MatchingSection {
            preset: "fuzzy".to_string(),
            ..MatchingSection::default()
        };
        assert_eq!(section.to_matching_config(), MatchingConfig::balanced());
    }

    #[test]
    fn test_filter_by_type_and_confidence() {
        let diff = sample_diff();

        let by_type = FilterConfig {
            types: vec!["rename-class".to_string()],
            min_confidence: None,
        };
        let filtered = by_type.apply(&diff).expect("valid filter");
        assert_eq!(filtered.refactorings.len(), 1);

        let by_confidence = FilterConfig {
            types: Vec::new(),
            min_confidence: Some(0.5),
        };
        let filtered = by_confidence.apply(&diff).expect("valid filter");
        assert_eq!(filtered.summary.total_refactorings, 1);
        assert_eq!(filtered.refactorings[0].refactoring_type, RefactoringType::RenameClass);
    }

    #[test]
    fn test_filter_rejects_unknown_type() {
        let filter = FilterConfig {
            types: vec!["Teleport Class".to_string()],
            min_confidence: None,
        };
        assert!(filter.apply(&sample_diff()).is_err());
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .preset("permissive")
            .fail_on_refactoring(true)
            .parallel(false)
            .build();
        assert_eq!(config.matching.preset, "permissive");
        assert!(config.behavior.fail_on_refactoring);
        assert!(!config.behavior.parallel);
    }
}
