//! Weighted similarity scoring for classes, methods and fields.
//!
//! Every score is a normalized weighted average of component similarities.
//! Components that compare two empty things (bodies, member sets,
//! hierarchies) carry no evidence and are dropped from the average.

use super::config::SimilarityWeights;
use super::sequence::{lcs_dice, lcs_length, multiset_dice};
use super::string_similarity::name_similarity;
use crate::model::{ClassDecl, FieldDecl, MethodDecl};
use std::collections::BTreeSet;

/// A class together with the facts class scoring needs from its snapshot.
#[derive(Debug, Clone)]
pub struct ClassProfile<'a> {
    pub decl: &'a ClassDecl,
    /// Names of declared methods and fields
    pub members: BTreeSet<&'a str>,
    /// Simple names of declared super types
    pub supers: BTreeSet<&'a str>,
}

/// Per-component similarities of a method pair, before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodScoreBreakdown {
    pub name: f64,
    pub signature: f64,
    /// `None` when both bodies are empty
    pub body: Option<f64>,
}

/// Pure scorer over declaration pairs. Symmetric, in [0, 1], and 1.0 for identical inputs.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer<'w> {
    weights: &'w SimilarityWeights,
}

impl<'w> SimilarityScorer<'w> {
    #[must_use]
    pub const fn new(weights: &'w SimilarityWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &SimilarityWeights {
        self.weights
    }

    /// Component similarities of two methods.
    #[must_use]
    pub fn method_breakdown(&self, a: &MethodDecl, b: &MethodDecl) -> MethodScoreBreakdown {
        MethodScoreBreakdown {
            name: name_similarity(&a.name, &b.name),
            signature: self.signature_similarity(a, b),
            body: body_similarity(&a.body_tokens, &b.body_tokens),
        }
    }

    #[must_use]
    pub fn method_score(&self, a: &MethodDecl, b: &MethodDecl) -> f64 {
        let parts = self.method_breakdown(a, b);
        weighted_average(&[
            (self.weights.method_name, Some(parts.name)),
            (self.weights.method_signature, Some(parts.signature)),
            (self.weights.method_body, parts.body),
        ])
    }

    /// Parameter-type LCS similarity plus a return-type equality bonus.
    #[must_use]
    pub fn signature_similarity(&self, a: &MethodDecl, b: &MethodDecl) -> f64 {
        let bonus = self.weights.return_type_bonus.clamp(0.0, 1.0);
        let params = lcs_dice(&a.parameter_types(), &b.parameter_types());
        let returns = if a.return_type == b.return_type { 1.0 } else { 0.0 };
        (1.0 - bonus).mul_add(params, bonus * returns)
    }

    #[must_use]
    pub fn field_score(&self, a: &FieldDecl, b: &FieldDecl) -> f64 {
        let type_match = if a.type_signature == b.type_signature { 1.0 } else { 0.0 };
        let initializer = if a.initializer_tokens.is_empty() && b.initializer_tokens.is_empty() {
            None
        } else {
            Some(multiset_dice(&a.initializer_tokens, &b.initializer_tokens))
        };
        weighted_average(&[
            (self.weights.field_name, Some(name_similarity(&a.name, &b.name))),
            (self.weights.field_type, Some(type_match)),
            (self.weights.field_initializer, initializer),
        ])
    }

    #[must_use]
    pub fn class_score(&self, a: &ClassProfile<'_>, b: &ClassProfile<'_>) -> f64 {
        let members = jaccard(&a.members, &b.members);
        let hierarchy = jaccard(&a.supers, &b.supers);
        let score = weighted_average(&[
            (self.weights.class_members, members),
            (self.weights.class_name, Some(name_similarity(&a.decl.name, &b.decl.name))),
            (self.weights.class_hierarchy, hierarchy),
        ]);
        if a.decl.kind == b.decl.kind {
            score
        } else {
            score * self.weights.kind_mismatch_factor.clamp(0.0, 1.0)
        }
    }
}

/// Body similarity: half multiset Dice, half LCS over the shorter body.
///
/// The LCS part stays high when statements were only added around an
/// unchanged core. `None` when both bodies are empty.
#[must_use]
pub fn body_similarity(a: &[String], b: &[String]) -> Option<f64> {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => None,
        (true, false) | (false, true) => Some(0.0),
        (false, false) => {
            let shorter = a.len().min(b.len());
            let core = lcs_length(a, b) as f64 / shorter as f64;
            Some(0.5 * multiset_dice(a, b) + 0.5 * core)
        }
    }
}

/// Jaccard similarity, `None` when both sets are empty.
#[must_use]
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> Option<f64> {
    if a.is_empty() && b.is_empty() {
        return None;
    }
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    Some(shared as f64 / union as f64)
}

/// `sum(w * s) / sum(w)` over the present components. Zero when no weight remains.
#[must_use]
pub fn weighted_average(components: &[(f64, Option<f64>)]) -> f64 {
    let (total, weight) = components
        .iter()
        .filter_map(|(w, s)| s.map(|s| (*w, s)))
        .filter(|(w, _)| *w > 0.0)
        .fold((0.0, 0.0), |(total, weight), (w, s)| (w.mul_add(s, total), weight + w));
    if weight > 0.0 {
        (total / weight).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassKind;

    fn method(name: &str, body: &[&str]) -> MethodDecl {
        MethodDecl::new("a.A", name)
            .with_parameter("x", "Int")
            .with_return_type("Int")
            .with_body(body.iter().copied())
    }

    #[test]
    fn test_identical_method_scores_one() {
        let weights = SimilarityWeights::balanced();
        let scorer = SimilarityScorer::new(&weights);
        let m = method("compute", &["val y = x * 2", "return y"]);
        assert!((scorer.method_score(&m, &m) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_body_dominates_method_score() {
        let weights = SimilarityWeights::balanced();
        let scorer = SimilarityScorer::new(&weights);
        let body = ["a", "b", "c", "d"];
        let renamed = scorer.method_score(&method("compute", &body), &method("calculate", &body));
        let rewritten = scorer.method_score(&method("compute", &body), &method("compute", &["w", "x", "y", "z"]));
        assert!(renamed > 0.6, "renamed with same body: {renamed}");
        assert!(rewritten < 0.6, "same name, unrelated body: {rewritten}");
    }

    #[test]
    fn test_empty_bodies_are_ignored() {
        let weights = SimilarityWeights::balanced();
        let scorer = SimilarityScorer::new(&weights);
        let a = MethodDecl::new("a.A", "close");
        let b = MethodDecl::new("b.B", "close");
        assert!((scorer.method_score(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_body_tolerates_surrounding_inserts() {
        let core: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();
        let wrapped: Vec<String> = ["log", "a", "b", "c", "log"].iter().map(ToString::to_string).collect();
        let score = body_similarity(&core, &wrapped).expect("non-empty");
        assert!(score > 0.85, "{score}");
    }

    #[test]
    fn test_class_kind_mismatch_penalized() {
        let weights = SimilarityWeights::balanced();
        let scorer = SimilarityScorer::new(&weights);
        let class = ClassDecl::new("a", "Shape");
        let interface = ClassDecl::new("a", "Shape").with_kind(ClassKind::Interface);
        fn profile(decl: &ClassDecl) -> ClassProfile<'_> {
            ClassProfile {
                decl,
                members: ["area"].into_iter().collect(),
                supers: BTreeSet::new(),
            }
        }
        let same = scorer.class_score(&profile(&class), &profile(&class));
        let mixed = scorer.class_score(&profile(&class), &profile(&interface));
        assert!((same - 1.0).abs() < 1e-9);
        assert!((mixed - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_skips_missing() {
        assert_eq!(weighted_average(&[(1.0, Some(0.5)), (3.0, None)]), 0.5);
        assert_eq!(weighted_average(&[(0.0, Some(0.5))]), 0.0);
        assert_eq!(jaccard::<u8>(&BTreeSet::new(), &BTreeSet::new()), None);
    }
}
