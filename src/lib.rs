//! **Refactoring detection between two structural snapshots of a codebase.**
//!
//! `refminer` takes two [`Snapshot`]s, the declarations of a codebase at two
//! revisions, and explains their differences as named refactorings: renamed
//! and moved classes, pulled-up methods, extracted and inlined methods,
//! changed signatures and modifiers.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Snapshot`] of one revision (packages, classes,
//!   methods, fields), the JSON [`SnapshotDocument`] front-ends produce, and
//!   the [`SnapshotIndex`] used for hierarchy and membership queries.
//! - **[`matching`]**: similarity scoring of declaration pairs, tunable through
//!   [`MatchingConfig`].
//! - **[`diff`]**: the [`DiffEngine`]. It matches entities, runs the ordered
//!   detector pipeline and resolves overlapping explanations into a
//!   [`ModelDiff`].
//! - **[`reports`]**, **[`pipeline`]**, **[`config`]**, **[`cli`]**: the
//!   command-line surface. Loading, filtering, rendering and configuration
//!   files.
//!
//! ## Getting Started
//!
//! ```
//! use refminer::model::{ClassDecl, MethodDecl, RenameHints, Snapshot};
//! use refminer::diff::RefactoringType;
//!
//! fn main() -> refminer::Result<()> {
//!     let before = Snapshot::builder()
//!         .class(ClassDecl::new("app", "Job"))
//!         .method(MethodDecl::new("app.Job", "run").with_body(["load", "check", "store"]))
//!         .build()?;
//!     let after = Snapshot::builder()
//!         .class(ClassDecl::new("app", "Task"))
//!         .method(MethodDecl::new("app.Task", "run").with_body(["load", "check", "store"]))
//!         .build()?;
//!
//!     let result = refminer::diff(&before, &after, &RenameHints::new())?;
//!     assert_eq!(result.refactorings.len(), 1);
//!     assert_eq!(result.refactorings[0].refactoring_type, RefactoringType::RenameClass);
//!     Ok(())
//! }
//! ```
//!
//! Filtering by refactoring type is left to the caller; see
//! [`config::FilterConfig`] for the allowlist the CLI applies.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Scores and counts convert between usize and f64 throughout
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `before`/`after` pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod matching;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, DiffConfig};
pub use config::{BehaviorConfig, FilterConfig, MatchingSection, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{DiffEngine, DiffSummary, EngineConfig, ModelDiff, Refactoring, RefactoringType};
pub use error::{ErrorContext, OptionContext, RefMinerError, Result};
pub use matching::{MatchThresholds, MatchingConfig, SimilarityWeights};
pub use model::{RenameHints, Snapshot, SnapshotDocument, SnapshotIndex};
pub use reports::{ReportFormat, ReportGenerator};

/// Compare two snapshots with the default configuration.
///
/// Shorthand for `DiffEngine::new().diff(before, after, hints)`.
pub fn diff(before: &Snapshot, after: &Snapshot, hints: &RenameHints) -> Result<ModelDiff> {
    DiffEngine::new().diff(before, after, hints)
}
