//! Configuration validation for refminer.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, FilterConfig, MatchingSection, OutputConfig};
use crate::diff::RefactoringType;
use crate::matching::MatchingConfig;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_unit_range(errors: &mut Vec<ConfigError>, field: String, value: f64) {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::new(
            field,
            format!("must be between 0.0 and 1.0, got {value}"),
        ));
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.matching.validate());
        errors.extend(self.filtering.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for MatchingSection {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if MatchingConfig::from_preset(&self.preset).is_none() {
            errors.push(ConfigError::new(
                "matching.preset",
                format!(
                    "Invalid preset '{}'. Valid options: strict, balanced, permissive",
                    self.preset
                ),
            ));
        }

        let overrides = [
            ("class_threshold", self.class_threshold),
            ("method_threshold", self.method_threshold),
            ("field_threshold", self.field_threshold),
            ("extract_overlap", self.extract_overlap),
        ];
        for (name, value) in overrides {
            if let Some(value) = value {
                check_unit_range(&mut errors, format!("matching.{name}"), value);
            }
        }
        errors
    }
}

impl Validatable for MatchingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (name, value) in self.weights.named() {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(
                    format!("weights.{name}"),
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        for (name, value) in [
            ("return_type_bonus", self.weights.return_type_bonus),
            ("kind_mismatch_factor", self.weights.kind_mismatch_factor),
        ] {
            check_unit_range(&mut errors, format!("weights.{name}"), value);
        }

        let totals = [
            ("method", self.weights.method_total()),
            ("class", self.weights.class_total()),
            ("field", self.weights.field_total()),
        ];
        for (kind, total) in totals {
            if total.partial_cmp(&0.0) != Some(std::cmp::Ordering::Greater) {
                errors.push(ConfigError::new(
                    format!("weights.{kind}"),
                    "component weights must have a positive sum",
                ));
            }
        }

        for (name, value) in self.thresholds.named() {
            check_unit_range(&mut errors, format!("thresholds.{name}"), value);
        }
        errors
    }
}

impl Validatable for FilterConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for name in &self.types {
            if name.parse::<RefactoringType>().is_err() {
                errors.push(ConfigError::new(
                    "filtering.types",
                    format!("Unknown refactoring type '{name}'"),
                ));
            }
        }
        if let Some(min_confidence) = self.min_confidence {
            check_unit_range(&mut errors, "filtering.min_confidence".to_string(), min_confidence);
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let inputs = [
            ("paths.before", Some(&self.paths.before)),
            ("paths.after", Some(&self.paths.after)),
            ("paths.hints", self.paths.hints.as_ref()),
        ];
        for (field, path) in inputs {
            if let Some(path) = path {
                if !path.exists() {
                    errors.push(ConfigError::new(field, format!("File not found: {}", path.display())));
                }
            }
        }

        errors.extend(self.matching.validate());
        errors.extend(self.filtering.validate());
        errors.extend(self.output.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffPaths;
    use crate::matching::SimilarityWeights;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
        assert!(MatchingConfig::strict().is_valid());
        assert!(MatchingConfig::permissive().is_valid());
    }

    #[test]
    fn test_invalid_preset_and_threshold() {
        let section = MatchingSection {
            preset: "fuzzy".to_string(),
            class_threshold: Some(1.5),
            ..MatchingSection::default()
        };
        let errors = section.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "matching.preset");
        assert_eq!(errors[1].field, "matching.class_threshold");
    }

    #[test]
    fn test_negative_and_non_finite_weights() {
        let config = MatchingConfig::balanced().with_weights(SimilarityWeights {
            method_body: -0.1,
            field_type: f64::NAN,
            ..SimilarityWeights::balanced()
        });
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"weights.method_body".to_string()));
        assert!(fields.contains(&"weights.field_type".to_string()));
    }

    #[test]
    fn test_zero_weight_sum() {
        let config = MatchingConfig::balanced().with_weights(SimilarityWeights {
            class_members: 0.0,
            class_name: 0.0,
            class_hierarchy: 0.0,
            ..SimilarityWeights::balanced()
        });
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "weights.class");
    }

    #[test]
    fn test_filter_validation() {
        let filter = FilterConfig {
            types: vec!["Rename Method".to_string(), "Teleport".to_string()],
            min_confidence: Some(-0.2),
        };
        assert_eq!(filter.validate().len(), 2);
    }

    #[test]
    fn test_missing_input_files() {
        let config = DiffConfig::from_app_config(
            DiffPaths {
                before: PathBuf::from("/nonexistent/before.json"),
                after: PathBuf::from("/nonexistent/after.json"),
                hints: None,
            },
            AppConfig::default(),
        );
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().starts_with("paths.before: File not found"));
    }
}
