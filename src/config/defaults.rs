//! Default configurations and presets for refminer.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AppConfig, BehaviorConfig, MatchingSection, OutputConfig};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Balanced matching, human-readable summary
    Default,
    /// High thresholds: fewer, more certain refactorings
    Strict,
    /// Low thresholds for heavily restructured code
    Permissive,
    /// CI/CD: JSON output, fail when refactorings are found
    CiCd,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Permissive => "permissive",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "exact" => Some(Self::Strict),
            "permissive" | "loose" => Some(Self::Permissive),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced matching suitable for most revisions",
            Self::Strict => "High acceptance thresholds, reports only confident refactorings",
            Self::Permissive => "Low acceptance thresholds for large restructurings",
            Self::CiCd => "JSON output that fails the build when refactorings are found",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Permissive, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::with_matching_preset("strict"),
            ConfigPreset::Permissive => Self::with_matching_preset("permissive"),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    fn with_matching_preset(name: &str) -> Self {
        Self {
            matching: MatchingSection {
                preset: name.to_string(),
                ..MatchingSection::default()
            },
            ..Self::default()
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Exit code 1 when any refactoring is reported
    /// - Quiet, uncolored output
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        use crate::reports::ReportFormat;

        Self {
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
            },
            behavior: BehaviorConfig {
                fail_on_refactoring: true,
                quiet: true,
                parallel: true,
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default matching preset name.
pub const DEFAULT_MATCHING_PRESET: &str = "balanced";
