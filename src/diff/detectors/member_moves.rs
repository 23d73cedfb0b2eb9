//! Member relocation: pull up, push down, move and rename of methods and fields.

use crate::diff::refactoring::{CodeLocation, EntityRef, Refactoring, RefactoringType};
use crate::diff::traits::{DetectionContext, RefactoringDetector};

/// Which member declarations a detector looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Field,
}

/// Relocation hypothesis checked by a [`MemberMoveDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRule {
    /// Moved to a super type of the original owner
    PullUp,
    /// Moved to a subtype of the original owner
    PushDown,
    /// Moved to any other owner, possibly renamed
    Move,
    /// Renamed in place
    Rename,
}

/// Detects one relocation rule for one member kind.
///
/// Pull-up, push-down and move deliberately overlap; the earlier detector
/// in the precedence order wins during de-duplication.
#[derive(Debug, Clone, Copy)]
pub struct MemberMoveDetector {
    member: MemberKind,
    rule: MoveRule,
}

/// The parts of a matched member pair relocation cares about.
struct MemberPair<'a> {
    before_key: &'a str,
    after_key: &'a str,
    score: f64,
    before_name: &'a str,
    after_name: &'a str,
    before_owner: &'a str,
    after_owner: &'a str,
    before_display: String,
    after_display: String,
    left: CodeLocation,
    right: CodeLocation,
}

impl MemberMoveDetector {
    #[must_use]
    pub const fn new(member: MemberKind, rule: MoveRule) -> Self {
        Self { member, rule }
    }

    fn pairs<'a>(&self, ctx: &'a DetectionContext<'a>) -> Vec<MemberPair<'a>> {
        match self.member {
            MemberKind::Method => ctx
                .matches
                .matched_methods
                .iter()
                .filter_map(|pair| {
                    let (b, a) = ctx.method_pair(&pair.before, &pair.after)?;
                    Some(MemberPair {
                        before_key: &pair.before,
                        after_key: &pair.after,
                        score: pair.score,
                        before_name: &b.name,
                        after_name: &a.name,
                        before_owner: &b.owner_class,
                        after_owner: &a.owner_class,
                        before_display: b.display_signature(),
                        after_display: a.display_signature(),
                        left: ctx.before_method_location(b, "original method declaration"),
                        right: ctx.after_method_location(a, "moved method declaration"),
                    })
                })
                .collect(),
            MemberKind::Field => ctx
                .matches
                .matched_fields
                .iter()
                .filter_map(|pair| {
                    let (b, a) = ctx.field_pair(&pair.before, &pair.after)?;
                    Some(MemberPair {
                        before_key: &pair.before,
                        after_key: &pair.after,
                        score: pair.score,
                        before_name: &b.name,
                        after_name: &a.name,
                        before_owner: &b.owner_class,
                        after_owner: &a.owner_class,
                        before_display: b.display_signature(),
                        after_display: a.display_signature(),
                        left: ctx.before_class_location(&b.owner_class, "original field declaration"),
                        right: ctx.after_class_location(&a.owner_class, "moved field declaration"),
                    })
                })
                .collect(),
        }
    }

    fn classify(&self, ctx: &DetectionContext<'_>, pair: &MemberPair<'_>) -> Option<RefactoringType> {
        use MemberKind::{Field, Method};
        use RefactoringType as T;

        let moved = ctx.matches.owner_changed(pair.before_owner, pair.after_owner);
        let same_name = pair.before_name == pair.after_name;
        let origin = ctx.owner_in_after(pair.before_owner);

        match self.rule {
            MoveRule::PullUp if moved && same_name && ctx.after.is_subtype_of(origin, pair.after_owner) => {
                Some(if self.member == Method { T::PullUpMethod } else { T::PullUpField })
            }
            MoveRule::PushDown if moved && same_name && ctx.after.is_subtype_of(pair.after_owner, origin) => {
                Some(if self.member == Method { T::PushDownMethod } else { T::PushDownField })
            }
            MoveRule::Move if moved => Some(match (self.member, same_name) {
                (Method, true) => T::MoveMethod,
                (Method, false) => T::MoveAndRenameMethod,
                (Field, true) => T::MoveField,
                (Field, false) => T::MoveAndRenameField,
            }),
            MoveRule::Rename if !moved && !same_name => {
                Some(if self.member == Method { T::RenameMethod } else { T::RenameField })
            }
            _ => None,
        }
    }

    fn entity(&self, key: &str) -> EntityRef {
        match self.member {
            MemberKind::Method => EntityRef::method(key),
            MemberKind::Field => EntityRef::field(key),
        }
    }
}

fn describe(kind: RefactoringType, pair: &MemberPair<'_>) -> String {
    let (b, a) = (&pair.before_display, &pair.after_display);
    match kind {
        RefactoringType::RenameMethod => {
            format!("{kind} {b} renamed to {a} in class {}", pair.after_owner)
        }
        RefactoringType::RenameField => {
            format!("{kind} {b} to {a} in class {}", pair.after_owner)
        }
        _ => format!(
            "{kind} {b} from class {} to {a} from class {}",
            pair.before_owner, pair.after_owner
        ),
    }
}

impl RefactoringDetector for MemberMoveDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        self.pairs(ctx)
            .into_iter()
            .filter_map(|pair| {
                let kind = self.classify(ctx, &pair)?;
                let mut right = pair.right.clone();
                if self.rule == MoveRule::Rename {
                    right.element = right.element.replace("moved", "renamed");
                }
                Some(
                    Refactoring::new(
                        kind,
                        self.entity(pair.before_key),
                        self.entity(pair.after_key),
                        describe(kind, &pair),
                        pair.score,
                    )
                    .with_left(pair.left.clone())
                    .with_right(right),
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        match (self.member, self.rule) {
            (MemberKind::Method, MoveRule::PullUp) => "pull-up-method",
            (MemberKind::Method, MoveRule::PushDown) => "push-down-method",
            (MemberKind::Method, MoveRule::Move) => "move-method",
            (MemberKind::Method, MoveRule::Rename) => "rename-method",
            (MemberKind::Field, MoveRule::PullUp) => "pull-up-field",
            (MemberKind::Field, MoveRule::PushDown) => "push-down-field",
            (MemberKind::Field, MoveRule::Move) => "move-field",
            (MemberKind::Field, MoveRule::Rename) => "rename-field",
        }
    }
}
