//! Trait definitions for refactoring detection.
//!
//! Each detector recognizes one family of refactorings from the match set.
//! Detectors never read each other's output, so they can run in parallel;
//! precedence between overlapping hypotheses is resolved afterwards.

use super::match_set::MatchSet;
use super::refactoring::{CodeLocation, Refactoring};
use crate::matching::MatchingConfig;
use crate::model::{ClassDecl, FieldDecl, MethodDecl, Snapshot, SnapshotIndex};

/// Everything a detector may read. All of it is immutable.
#[derive(Debug)]
pub struct DetectionContext<'a> {
    pub before: &'a SnapshotIndex<'a>,
    pub after: &'a SnapshotIndex<'a>,
    pub matches: &'a MatchSet,
    pub config: &'a MatchingConfig,
}

impl<'a> DetectionContext<'a> {
    #[must_use]
    pub const fn before_snapshot(&self) -> &'a Snapshot {
        self.before.snapshot()
    }

    #[must_use]
    pub const fn after_snapshot(&self) -> &'a Snapshot {
        self.after.snapshot()
    }

    /// Before/after declarations of a matched method pair.
    #[must_use]
    pub fn method_pair(&self, before: &str, after: &str) -> Option<(&'a MethodDecl, &'a MethodDecl)> {
        Some((
            self.before_snapshot().methods.get(before)?,
            self.after_snapshot().methods.get(after)?,
        ))
    }

    #[must_use]
    pub fn field_pair(&self, before: &str, after: &str) -> Option<(&'a FieldDecl, &'a FieldDecl)> {
        Some((
            self.before_snapshot().fields.get(before)?,
            self.after_snapshot().fields.get(after)?,
        ))
    }

    #[must_use]
    pub fn class_pair(&self, before: &str, after: &str) -> Option<(&'a ClassDecl, &'a ClassDecl)> {
        Some((
            self.before_snapshot().classes.get(before)?,
            self.after_snapshot().classes.get(after)?,
        ))
    }

    /// Where a before-side owner lives in the after snapshot: its matched
    /// counterpart, or the same name if it was not matched.
    #[must_use]
    pub fn owner_in_after<'o>(&'o self, before_owner: &'o str) -> &'o str {
        self.matches.class_after(before_owner).unwrap_or(before_owner)
    }

    /// Location of a method declaration on the before side.
    #[must_use]
    pub fn before_method_location(&self, method: &MethodDecl, element: &str) -> CodeLocation {
        method_location(self.before_snapshot(), method, element)
    }

    #[must_use]
    pub fn after_method_location(&self, method: &MethodDecl, element: &str) -> CodeLocation {
        method_location(self.after_snapshot(), method, element)
    }

    #[must_use]
    pub fn before_class_location(&self, class: &str, element: &str) -> CodeLocation {
        class_location(self.before_snapshot(), class, element)
    }

    #[must_use]
    pub fn after_class_location(&self, class: &str, element: &str) -> CodeLocation {
        class_location(self.after_snapshot(), class, element)
    }
}

fn source_file_of(snapshot: &Snapshot, class: &str) -> String {
    snapshot
        .classes
        .get(class)
        .map(|c| c.source_file.clone())
        .unwrap_or_default()
}

fn method_location(snapshot: &Snapshot, method: &MethodDecl, element: &str) -> CodeLocation {
    CodeLocation::new(
        source_file_of(snapshot, &method.owner_class),
        method.source_range.start_line,
        method.source_range.end_line,
        element,
    )
}

fn class_location(snapshot: &Snapshot, class: &str, element: &str) -> CodeLocation {
    CodeLocation::new(source_file_of(snapshot, class), 0, 0, element)
}

/// A refactoring detector.
///
/// Implementors check only the necessary conditions of their refactoring
/// kinds; overlapping hypotheses are settled by detector order.
pub trait RefactoringDetector: Send + Sync {
    /// Detect refactorings, in a deterministic order.
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring>;

    /// Get the name of this detector for logging/debugging.
    fn name(&self) -> &'static str;
}
