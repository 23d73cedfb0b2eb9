//! Diff result types.

use super::match_set::MatchSet;
use super::refactoring::{Refactoring, RefactoringType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of comparing two snapshots.
///
/// Holds the match set the detectors ran on and the de-duplicated
/// refactorings in precedence order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelDiff {
    pub match_set: MatchSet,
    pub refactorings: Vec<Refactoring>,
    pub summary: DiffSummary,
}

impl ModelDiff {
    /// Assemble a diff and compute its summary.
    #[must_use]
    pub fn new(match_set: MatchSet, refactorings: Vec<Refactoring>) -> Self {
        let summary = DiffSummary::compute(&match_set, &refactorings);
        Self {
            match_set,
            refactorings,
            summary,
        }
    }

    /// Check if any refactoring was detected
    #[must_use]
    pub fn has_refactorings(&self) -> bool {
        !self.refactorings.is_empty()
    }

    /// Refactorings of one kind, in report order.
    pub fn of_type(&self, kind: RefactoringType) -> impl Iterator<Item = &Refactoring> {
        self.refactorings
            .iter()
            .filter(move |r| r.refactoring_type == kind)
    }

    /// A copy of this diff keeping only the refactorings `keep` accepts.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&Refactoring) -> bool) -> Self {
        let refactorings = self.refactorings.iter().filter(|r| keep(r)).cloned().collect();
        Self::new(self.match_set.clone(), refactorings)
    }
}

/// Summary statistics for a diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total_refactorings: usize,
    pub by_type: BTreeMap<RefactoringType, usize>,
    pub matched: usize,
    pub added: usize,
    pub removed: usize,
    pub ambiguities: usize,
}

impl DiffSummary {
    fn compute(match_set: &MatchSet, refactorings: &[Refactoring]) -> Self {
        let mut by_type = BTreeMap::new();
        for refactoring in refactorings {
            *by_type.entry(refactoring.refactoring_type).or_insert(0) += 1;
        }
        Self {
            total_refactorings: refactorings.len(),
            by_type,
            matched: match_set.matched_count(),
            added: match_set.added_count(),
            removed: match_set.removed_count(),
            ambiguities: match_set.ambiguities.len(),
        }
    }
}
