//! Refactoring detectors and their fixed precedence order.

mod class_changes;
mod extraction;
mod member_moves;
mod modifiers;
mod signature;

pub use class_changes::{
    ClassRelocationDetector, ExtractClassDetector, MoveSourceFolderDetector, PackageRenameDetector,
    SupertypeExtractionDetector,
};
pub use extraction::{ExtractMethodDetector, InlineMethodDetector};
pub use member_moves::{MemberKind, MemberMoveDetector, MoveRule};
pub use modifiers::{ClassModifierDetector, MethodModifierDetector};
pub use signature::{
    diff_parameters, FieldTypeDetector, ParameterChange, ParameterDetector, ReturnTypeDetector,
};

use super::match_set::MatchedPair;
use super::traits::{DetectionContext, RefactoringDetector};
use crate::model::{FieldDecl, MethodDecl};

/// All detectors in precedence order: hierarchy-aware and more specific
/// detectors come before the generic ones they overlap with.
#[must_use]
pub fn default_detectors() -> Vec<Box<dyn RefactoringDetector>> {
    vec![
        Box::new(SupertypeExtractionDetector),
        Box::new(ExtractClassDetector),
        Box::new(ClassRelocationDetector),
        Box::new(PackageRenameDetector),
        Box::new(MoveSourceFolderDetector),
        Box::new(MemberMoveDetector::new(MemberKind::Method, MoveRule::PullUp)),
        Box::new(MemberMoveDetector::new(MemberKind::Method, MoveRule::PushDown)),
        Box::new(MemberMoveDetector::new(MemberKind::Method, MoveRule::Move)),
        Box::new(MemberMoveDetector::new(MemberKind::Method, MoveRule::Rename)),
        Box::new(MemberMoveDetector::new(MemberKind::Field, MoveRule::PullUp)),
        Box::new(MemberMoveDetector::new(MemberKind::Field, MoveRule::PushDown)),
        Box::new(MemberMoveDetector::new(MemberKind::Field, MoveRule::Move)),
        Box::new(MemberMoveDetector::new(MemberKind::Field, MoveRule::Rename)),
        Box::new(ExtractMethodDetector),
        Box::new(InlineMethodDetector),
        Box::new(ReturnTypeDetector),
        Box::new(ParameterDetector),
        Box::new(FieldTypeDetector),
        Box::new(MethodModifierDetector),
        Box::new(ClassModifierDetector),
    ]
}

/// Matched method pairs that stayed in corresponding owners under the same name.
fn stable_method_pairs<'c>(
    ctx: &'c DetectionContext<'c>,
) -> impl Iterator<Item = (&'c MatchedPair, &'c MethodDecl, &'c MethodDecl)> + 'c {
    ctx.matches.matched_methods.iter().filter_map(move |pair| {
        let (b, a) = ctx.method_pair(&pair.before, &pair.after)?;
        let stable = b.name == a.name && !ctx.matches.owner_changed(&b.owner_class, &a.owner_class);
        stable.then_some((pair, b, a))
    })
}

/// Matched field pairs that stayed in corresponding owners under the same name.
fn stable_field_pairs<'c>(
    ctx: &'c DetectionContext<'c>,
) -> impl Iterator<Item = (&'c MatchedPair, &'c FieldDecl, &'c FieldDecl)> + 'c {
    ctx.matches.matched_fields.iter().filter_map(move |pair| {
        let (b, a) = ctx.field_pair(&pair.before, &pair.after)?;
        let stable = b.name == a.name && !ctx.matches.owner_changed(&b.owner_class, &a.owner_class);
        stable.then_some((pair, b, a))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::RefactoringType;

    #[test]
    fn test_detector_names_are_unique() {
        let detectors = default_detectors();
        let mut names: Vec<_> = detectors.iter().map(|d| d.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), detectors.len());
    }

    #[test]
    fn test_every_kind_has_a_position() {
        assert_eq!(RefactoringType::ALL.len(), 30);
        assert_eq!(RefactoringType::ALL[0], RefactoringType::ExtractInterface);
    }
}
