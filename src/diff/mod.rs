//! Refactoring-aware diff of two structural snapshots.
//!
//! # Architecture
//!
//! A diff runs in three stages:
//!
//! - Entity matching pairs classes, then methods and fields inside matched
//!   classes, then cross-class leftovers, producing a [`MatchSet`]
//! - Each [`RefactoringDetector`](traits::RefactoringDetector) in the
//!   [`detectors`] pipeline reads the match set independently
//! - Precedence resolution keeps the first record per entity pair, so
//!   detector order decides between overlapping explanations
//!
//! # Example
//!
//! ```
//! use refminer::diff::DiffEngine;
//! use refminer::model::{ClassDecl, MethodDecl, RenameHints, Snapshot};
//!
//! let before = Snapshot::builder()
//!     .class(ClassDecl::new("app", "Job"))
//!     .method(MethodDecl::new("app.Job", "run").with_body(["a", "b"]))
//!     .build()?;
//! let result = DiffEngine::new().diff(&before, &before, &RenameHints::new())?;
//! assert!(result.refactorings.is_empty());
//! # Ok::<(), refminer::RefMinerError>(())
//! ```

pub mod detectors;
mod engine;
mod engine_config;
mod engine_matching;
mod match_set;
mod precedence;
mod refactoring;
mod result;
pub mod traits;

pub use detectors::default_detectors;
pub use engine::DiffEngine;
pub use engine_config::EngineConfig;
pub use engine_matching::match_entities;
pub use match_set::{Ambiguity, KindMatches, MatchOrigin, MatchSet, MatchedPair};
pub use precedence::deduplicate;
pub use refactoring::{CodeLocation, EntityKind, EntityRef, Refactoring, RefactoringType};
pub use result::{DiffSummary, ModelDiff};
pub use traits::{DetectionContext, RefactoringDetector};
