//! Configuration module for refminer.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```
//! use refminer::config::{AppConfig, ConfigPreset};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//! assert_eq!(config.matching.preset, "strict");
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .preset("permissive")
//!     .min_confidence(Some(0.7))
//!     .fail_on_refactoring(true)
//!     .build();
//! let matching = config.matching.to_matching_config();
//! assert!(matching.thresholds.class < 0.5);
//! ```
//!
//! # Configuration File
//!
//! Place a `.refminer.yaml` file in your project root or `~/.config/refminer/`:
//!
//! ```yaml
//! matching:
//!   preset: strict
//!   method_threshold: 0.7
//! filtering:
//!   types: [Rename Method, Move Class]
//! behavior:
//!   fail_on_refactoring: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_MATCHING_PRESET};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffPaths, FilterConfig, MatchingSection, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.refminer.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
