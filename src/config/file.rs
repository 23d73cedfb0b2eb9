//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[".refminer.yaml", ".refminer.yml", "refminer.yaml", "refminer.yml"];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/refminer/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    let candidates = [
        std::env::current_dir().ok(),
        find_git_root(),
        dirs::config_dir().map(|dir| dir.join("refminer")),
        dirs::home_dir(),
    ];
    candidates.into_iter().flatten().find_map(|dir| find_config_in_dir(&dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors().find(|dir| dir.join(".git").exists()).map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml_ng::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Config file not found: {}", path.display()),
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for ConfigFileError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override. This layers CLI
    /// args over file config.
    pub fn merge(&mut self, other: &Self) {
        // Matching
        if other.matching.preset != super::DEFAULT_MATCHING_PRESET {
            self.matching.preset.clone_from(&other.matching.preset);
        }
        if other.matching.class_threshold.is_some() {
            self.matching.class_threshold = other.matching.class_threshold;
        }
        if other.matching.method_threshold.is_some() {
            self.matching.method_threshold = other.matching.method_threshold;
        }
        if other.matching.field_threshold.is_some() {
            self.matching.field_threshold = other.matching.field_threshold;
        }
        if other.matching.extract_overlap.is_some() {
            self.matching.extract_overlap = other.matching.extract_overlap;
        }

        // Output
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Filtering
        if !other.filtering.types.is_empty() {
            self.filtering.types.clone_from(&other.filtering.types);
        }
        if other.filtering.min_confidence.is_some() {
            self.filtering.min_confidence = other.filtering.min_confidence;
        }

        // Behavior: flags only switch on, except parallel which only switches off
        if other.behavior.fail_on_refactoring {
            self.behavior.fail_on_refactoring = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if !other.behavior.parallel {
            self.behavior.parallel = false;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(config_path: Option<&Path>, cli_overrides: &Self) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# refminer configuration
# Place this file at .refminer.yaml in your project root or ~/.config/refminer/

{}
",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# refminer configuration file
# ============================
#
# Place it at:
#   - .refminer.yaml in your project root
#   - ~/.config/refminer/refminer.yaml for global config
#
# CLI arguments always override file settings.

# Entity matching
matching:
  # Preset: strict, balanced, permissive
  preset: balanced
  # Acceptance thresholds (0.0-1.0), override the preset
  # class_threshold: 0.5
  # method_threshold: 0.6
  # field_threshold: 0.6
  # Minimum body overlap for extract/inline method
  # extract_overlap: 0.8

# Output
output:
  # Format: summary, json
  format: summary
  # Output file path (omit for stdout)
  # file: refactorings.json
  # Disable colored output
  no_color: false

# Report filtering (applied after detection)
filtering:
  # Only report these refactoring types (empty reports all)
  types: []
  # types: [Rename Method, Move Class]
  # Drop refactorings below this confidence
  # min_confidence: 0.7

# Behavior flags
behavior:
  # Exit with code 1 if any refactoring is reported
  fail_on_refactoring: false
  # Suppress non-essential output
  quiet: false
  # Score candidates and run detectors on multiple threads
  parallel: true
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BehaviorConfig, FilterConfig, MatchingSection};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".refminer.yaml");
        std::fs::write(&config_path, "matching:\n  preset: strict\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
matching:
  preset: strict
  method_threshold: 0.7
output:
  format: json
filtering:
  types: [Rename Method, Move Class]
behavior:
  fail_on_refactoring: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.matching.preset, "strict");
        assert_eq!(config.matching.method_threshold, Some(0.7));
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.filtering.types.len(), 2);
        assert!(config.behavior.fail_on_refactoring);
        assert!(config.behavior.parallel);
    }

    #[test]
    fn test_load_config_file_errors() {
        let missing = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(missing, Err(ConfigFileError::NotFound(_))));

        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "matching: [unclosed").unwrap();
        assert!(matches!(load_config_file(&config_path), Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig {
            matching: MatchingSection {
                preset: "permissive".to_string(),
                class_threshold: Some(0.45),
                ..MatchingSection::default()
            },
            ..AppConfig::default()
        };
        let overrides = AppConfig {
            matching: MatchingSection {
                method_threshold: Some(0.8),
                ..MatchingSection::default()
            },
            filtering: FilterConfig {
                types: vec!["Rename Class".to_string()],
                min_confidence: None,
            },
            behavior: BehaviorConfig {
                parallel: false,
                ..BehaviorConfig::default()
            },
            ..AppConfig::default()
        };

        base.merge(&overrides);

        assert_eq!(base.matching.preset, "permissive");
        assert_eq!(base.matching.class_threshold, Some(0.45));
        assert_eq!(base.matching.method_threshold, Some(0.8));
        assert_eq!(base.filtering.types, vec!["Rename Class".to_string()]);
        assert!(!base.behavior.parallel);
    }

    #[test]
    fn test_example_configs_parse() {
        let example = generate_example_config();
        assert!(example.contains("matching:"));
        let parsed: AppConfig = serde_yaml_ng::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig = serde_yaml_ng::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "matching:\n  preset: strict").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
