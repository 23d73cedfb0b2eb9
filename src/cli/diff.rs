//! Diff command handler.
//!
//! Implements the `diff` subcommand for detecting refactorings between two
//! snapshot documents.

use crate::config::{DiffConfig, Validatable};
use crate::diff::ModelDiff;
use crate::model::RenameHints;
use crate::pipeline::{compute_diff, exit_codes, load_hints, load_snapshot, output_report, PipelineError};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let problems = config.validate();
    if !problems.is_empty() {
        let listed: Vec<String> = problems.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", listed.join("\n  "));
    }
    let quiet = config.behavior.quiet;

    let load = |path: &std::path::Path| {
        load_snapshot(path, quiet).map_err(|source| PipelineError::LoadFailed {
            path: path.display().to_string(),
            source,
        })
    };
    let before = load(&config.paths.before)?;
    let after = load(&config.paths.after)?;
    let hints = match &config.paths.hints {
        Some(path) => load_hints(path).map_err(|source| PipelineError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?,
        None => RenameHints::new(),
    };

    let diff =
        compute_diff(&config, &before, &after, &hints).map_err(|source| PipelineError::DiffFailed { source })?;
    let exit_code = determine_exit_code(&config, &diff);

    output_report(&config, &diff).map_err(|source| PipelineError::ReportFailed { source })?;

    Ok(exit_code)
}

/// Determine the exit code from the (filtered) diff and config flags.
fn determine_exit_code(config: &DiffConfig, diff: &ModelDiff) -> i32 {
    if config.behavior.fail_on_refactoring && diff.has_refactorings() {
        return exit_codes::REFACTORINGS_FOUND;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::model::{ClassDecl, MethodDecl, Snapshot, SnapshotDocument};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_snapshot(dir: &Path, name: &str, class: &str) -> std::path::PathBuf {
        let snapshot = Snapshot::builder()
            .class(ClassDecl::new("app", class))
            .method(MethodDecl::new(&format!("app.{class}"), "run").with_body(["load", "check", "store"]))
            .build()
            .unwrap();
        let path = dir.join(name);
        std::fs::write(&path, SnapshotDocument::from_snapshot(&snapshot).to_json().unwrap()).unwrap();
        path
    }

    fn config(tmp: &TempDir, after_class: &str, fail: bool) -> DiffConfig {
        let app = AppConfig::builder()
            .fail_on_refactoring(fail)
            .quiet(true)
            .output_file(Some(tmp.path().join("report.txt")))
            .build();
        DiffConfig::from_app_config(
            DiffPaths {
                before: write_snapshot(tmp.path(), "before.json", "Job"),
                after: write_snapshot(tmp.path(), "after.json", after_class),
                hints: None,
            },
            app,
        )
    }

    #[test]
    fn test_exit_code_with_fail_flag() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(run_diff(config(&tmp, "Task", true)).unwrap(), exit_codes::REFACTORINGS_FOUND);
        assert_eq!(run_diff(config(&tmp, "Job", true)).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_exit_code_without_fail_flag() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(run_diff(config(&tmp, "Task", false)).unwrap(), exit_codes::SUCCESS);
        let report = std::fs::read_to_string(tmp.path().join("report.txt")).unwrap();
        assert!(report.contains("Rename Class"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut config = config(&tmp, "Task", false);
        config.paths.before = tmp.path().join("missing.json");
        assert!(run_diff(config).is_err());
    }
}
