//! Pairing of before/after declarations produced by entity matching.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Why two declarations were paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchOrigin {
    /// Identical qualified name (and signature, for methods)
    Identity,
    /// Pre-paired from an external rename hint
    RenameHint,
    /// Accepted in the best-candidate pass
    Similarity,
}

/// One-to-one pairing of a before and an after declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub before: String,
    pub after: String,
    pub score: f64,
    pub origin: MatchOrigin,
}

impl MatchedPair {
    pub fn new(before: impl Into<String>, after: impl Into<String>, score: f64, origin: MatchOrigin) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            score,
            origin,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.before == self.after
    }
}

/// An accepted pair that had an equally scored alternative.
///
/// Resolved by the deterministic tie-break; kept so ambiguity can be measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ambiguity {
    pub before: String,
    pub after: String,
    /// The equally scored candidate that lost the tie-break
    pub alternative: (String, String),
    pub score: f64,
}

/// Output of entity matching, input to the detectors.
///
/// Every declaration of both snapshots appears in exactly one of the
/// matched, removed or added collections. All collections are sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSet {
    pub matched_classes: Vec<MatchedPair>,
    pub matched_methods: Vec<MatchedPair>,
    pub matched_fields: Vec<MatchedPair>,
    pub removed_classes: Vec<String>,
    pub added_classes: Vec<String>,
    pub removed_methods: Vec<String>,
    pub added_methods: Vec<String>,
    pub removed_fields: Vec<String>,
    pub added_fields: Vec<String>,
    pub ambiguities: Vec<Ambiguity>,
    #[serde(skip)]
    class_forward: HashMap<String, String>,
    #[serde(skip)]
    class_backward: HashMap<String, String>,
}

/// Matching outcome for one declaration kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KindMatches {
    pub matched: Vec<MatchedPair>,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl KindMatches {
    fn sorted(mut self) -> Self {
        self.matched
            .sort_by(|a, b| a.before.cmp(&b.before).then_with(|| a.after.cmp(&b.after)));
        self.removed.sort();
        self.added.sort();
        self
    }
}

impl MatchSet {
    /// Assemble a match set from per-kind results, sorting every collection.
    #[must_use]
    pub fn from_parts(
        classes: KindMatches,
        methods: KindMatches,
        fields: KindMatches,
        ambiguities: Vec<Ambiguity>,
    ) -> Self {
        let classes = classes.sorted();
        let methods = methods.sorted();
        let fields = fields.sorted();

        let class_forward = classes
            .matched
            .iter()
            .map(|p| (p.before.clone(), p.after.clone()))
            .collect();
        let class_backward = classes
            .matched
            .iter()
            .map(|p| (p.after.clone(), p.before.clone()))
            .collect();

        Self {
            matched_classes: classes.matched,
            matched_methods: methods.matched,
            matched_fields: fields.matched,
            removed_classes: classes.removed,
            added_classes: classes.added,
            removed_methods: methods.removed,
            added_methods: methods.added,
            removed_fields: fields.removed,
            added_fields: fields.added,
            ambiguities,
            class_forward,
            class_backward,
        }
    }

    /// The after-class paired with a before-class.
    #[must_use]
    pub fn class_after(&self, before: &str) -> Option<&str> {
        self.class_forward.get(before).map(String::as_str)
    }

    /// The before-class paired with an after-class.
    #[must_use]
    pub fn class_before(&self, after: &str) -> Option<&str> {
        self.class_backward.get(after).map(String::as_str)
    }

    /// Whether a member moved between non-corresponding owners.
    #[must_use]
    pub fn owner_changed(&self, before_owner: &str, after_owner: &str) -> bool {
        self.class_after(before_owner) != Some(after_owner)
    }

    /// Total number of matched pairs of all kinds.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched_classes.len() + self.matched_methods.len() + self.matched_fields.len()
    }

    #[must_use]
    pub fn added_count(&self) -> usize {
        self.added_classes.len() + self.added_methods.len() + self.added_fields.len()
    }

    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed_classes.len() + self.removed_methods.len() + self.removed_fields.len()
    }

    /// Whether every pairing is a declaration matched to itself.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.added_count() == 0
            && self.removed_count() == 0
            && self
                .matched_classes
                .iter()
                .chain(&self.matched_methods)
                .chain(&self.matched_fields)
                .all(MatchedPair::is_identity)
    }
}
