//! Diff computation stage.
//!
//! Builds the engine from configuration, runs the diff and applies the
//! report filter.

use crate::config::{DiffConfig, Validatable};
use crate::diff::{DiffEngine, EngineConfig, ModelDiff};
use crate::model::{RenameHints, Snapshot};
use anyhow::{Context, Result};

/// Run the model diff between two snapshots.
///
/// The returned diff is already filtered by the configured type allowlist
/// and minimum confidence.
pub fn compute_diff(config: &DiffConfig, before: &Snapshot, after: &Snapshot, hints: &RenameHints) -> Result<ModelDiff> {
    let matching = config.matching.to_matching_config();
    let problems = matching.validate();
    if !problems.is_empty() {
        let listed: Vec<String> = problems.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid matching configuration: {}", listed.join("; "));
    }

    let engine_config = if config.behavior.parallel {
        EngineConfig::default()
    } else {
        EngineConfig::sequential()
    };
    let engine = DiffEngine::new().with_config(matching).with_engine_config(engine_config);

    if !config.behavior.quiet {
        tracing::info!("Detecting refactorings...");
    }
    let diff = engine.diff(before, after, hints).context("Failed to compute diff")?;

    if !config.filtering.is_active() {
        return Ok(diff);
    }
    let filtered = config.filtering.apply(&diff).context("Invalid report filter")?;
    tracing::debug!(
        kept = filtered.refactorings.len(),
        dropped = diff.refactorings.len() - filtered.refactorings.len(),
        "applied report filter"
    );
    Ok(filtered)
}
