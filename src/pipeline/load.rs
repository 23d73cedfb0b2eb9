//! Snapshot and hint loading stage.

use crate::model::{RenameHints, Snapshot, SnapshotDocument};
use anyhow::{Context, Result};
use std::path::Path;

/// Read a snapshot document and convert it into a validated [`Snapshot`].
pub fn load_snapshot(path: &Path, quiet: bool) -> Result<Snapshot> {
    if !quiet {
        tracing::info!("Loading snapshot: {:?}", path);
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
    let snapshot = SnapshotDocument::from_json(&raw)
        .and_then(SnapshotDocument::into_snapshot)
        .with_context(|| format!("Failed to load snapshot: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Loaded {} classes, {} declarations",
            snapshot.classes.len(),
            snapshot.declaration_count()
        );
    }
    Ok(snapshot)
}

/// Read a JSON object of before -> after rename hints.
pub fn load_hints(path: &Path) -> Result<RenameHints> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read hints file: {}", path.display()))?;
    let hints: RenameHints =
        serde_json::from_str(&raw).with_context(|| format!("Hints must be a JSON object: {}", path.display()))?;
    tracing::debug!(hints = hints.len(), "loaded rename hints");
    Ok(hints)
}
