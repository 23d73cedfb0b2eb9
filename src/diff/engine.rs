//! Model diff engine implementation.

use super::detectors::default_detectors;
use super::engine_config::EngineConfig;
use super::engine_matching::match_entities;
use super::precedence::deduplicate;
use super::refactoring::Refactoring;
use super::result::ModelDiff;
use super::traits::{DetectionContext, RefactoringDetector};
use crate::error::{ErrorContext, Result};
use crate::matching::MatchingConfig;
use crate::model::{RenameHints, Snapshot, SnapshotIndex};
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info, info_span};

/// Refactoring-detecting diff engine for structural snapshots.
pub struct DiffEngine {
    config: MatchingConfig,
    engine_config: EngineConfig,
    detectors: Vec<Box<dyn RefactoringDetector>>,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MatchingConfig::balanced(),
            engine_config: EngineConfig::default(),
            detectors: default_detectors(),
        }
    }

    /// Set matching weights and thresholds
    #[must_use]
    pub fn with_config(mut self, config: MatchingConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure parallel execution
    #[must_use]
    pub fn with_engine_config(mut self, engine_config: EngineConfig) -> Self {
        self.engine_config = engine_config;
        self
    }

    /// Replace the detector pipeline. Order is precedence order.
    #[must_use]
    pub fn with_detectors(mut self, detectors: Vec<Box<dyn RefactoringDetector>>) -> Self {
        self.detectors = detectors;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &MatchingConfig {
        &self.config
    }

    #[must_use]
    pub const fn engine_config(&self) -> &EngineConfig {
        &self.engine_config
    }

    /// Detector names in precedence order.
    #[must_use]
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Compare two snapshots and classify their differences.
    ///
    /// Both snapshots are validated first; a malformed snapshot is the only
    /// failure. The result is deterministic for equal inputs.
    pub fn diff(&self, before: &Snapshot, after: &Snapshot, hints: &RenameHints) -> Result<ModelDiff> {
        let span = info_span!(
            "model_diff",
            before = before.declaration_count(),
            after = after.declaration_count()
        );
        let _guard = span.enter();

        before.validate().context("before snapshot")?;
        after.validate().context("after snapshot")?;

        let before_index = SnapshotIndex::build(before);
        let after_index = SnapshotIndex::build(after);
        let matches = match_entities(&before_index, &after_index, hints, &self.config, &self.engine_config);

        // Quick check: identical content without hints cannot hold a refactoring
        if hints.is_empty() && before.content_hash() == after.content_hash() {
            debug!("snapshots are identical, skipping detectors");
            return Ok(ModelDiff::new(matches, Vec::new()));
        }

        let ctx = DetectionContext {
            before: &before_index,
            after: &after_index,
            matches: &matches,
            config: &self.config,
        };
        let outputs: Vec<Vec<_>> = if self.engine_config.parallel {
            // Indexed collect keeps detector order
            self.detectors.par_iter().map(|d| run_detector(d.as_ref(), &ctx)).collect()
        } else {
            self.detectors.iter().map(|d| run_detector(d.as_ref(), &ctx)).collect()
        };

        let refactorings = deduplicate(outputs.into_iter().flatten().collect());
        let diff = ModelDiff::new(matches, refactorings);
        info!(
            matched = diff.summary.matched,
            added = diff.summary.added,
            removed = diff.summary.removed,
            refactorings = diff.summary.total_refactorings,
            "model diff complete"
        );
        Ok(diff)
    }
}

fn run_detector(detector: &dyn RefactoringDetector, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
    let found = detector.detect(ctx);
    debug!(detector = detector.name(), found = found.len(), "detector finished");
    found
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiffEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffEngine")
            .field("config", &self.config)
            .field("engine_config", &self.engine_config)
            .field("detectors", &self.detector_names())
            .finish()
    }
}
