//! Similarity scoring between declarations of two snapshots.
//!
//! Identifier similarity, token-sequence comparisons and the weighted
//! per-kind scores that drive entity matching. Calibration lives in
//! [`MatchingConfig`].
//!
//! # Example
//!
//! ```
//! use refminer::matching::{MatchingConfig, SimilarityScorer};
//! use refminer::model::MethodDecl;
//!
//! let config = MatchingConfig::default();
//! let scorer = SimilarityScorer::new(&config.weights);
//! let a = MethodDecl::new("app.Cart", "total").with_body(["sum", "return"]);
//! let b = MethodDecl::new("app.Cart", "computeTotal").with_body(["sum", "return"]);
//! assert!(scorer.method_score(&a, &b) > config.thresholds.method);
//! ```

mod config;
pub mod scoring;
pub mod sequence;
pub mod string_similarity;

pub use config::{MatchThresholds, MatchingConfig, SimilarityWeights};
pub use scoring::{
    body_similarity, jaccard, weighted_average, ClassProfile, MethodScoreBreakdown,
    SimilarityScorer,
};
pub use sequence::{align, EditOp};
pub use string_similarity::name_similarity;
