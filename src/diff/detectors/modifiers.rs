//! Modifier changes on methods and classes.

use super::stable_method_pairs;
use crate::diff::refactoring::{EntityKind, EntityRef, Refactoring, RefactoringType};
use crate::diff::traits::{DetectionContext, RefactoringDetector};
use crate::model::{Modifiers, Visibility};

/// A single modifier dimension that changed: `(dimension, old, new)`.
type ModifierChange = (&'static str, String, String);

fn flag(name: &str, on: bool) -> String {
    if on {
        name.to_string()
    } else {
        format!("non-{name}")
    }
}

fn push_flag(changes: &mut Vec<ModifierChange>, name: &'static str, old: bool, new: bool) {
    if old != new {
        changes.push((name, flag(name, old), flag(name, new)));
    }
}

fn push_visibility(changes: &mut Vec<ModifierChange>, old: Visibility, new: Visibility) {
    if old != new {
        changes.push(("visibility", old.to_string(), new.to_string()));
    }
}

fn method_modifier_changes(before: &Modifiers, after: &Modifiers) -> Vec<ModifierChange> {
    let mut changes = Vec::new();
    push_visibility(&mut changes, before.visibility, after.visibility);
    push_flag(&mut changes, "abstract", before.is_abstract, after.is_abstract);
    push_flag(&mut changes, "static", before.is_static, after.is_static);
    push_flag(&mut changes, "open", before.is_open, after.is_open);
    changes
}

fn modifier_ref(owner_key: &str, dimension: &str, value: &str) -> EntityRef {
    EntityRef::new(EntityKind::Modifier, format!("{owner_key}#{dimension}:{value}"))
}

/// Change Method Modifier: one record per changed modifier dimension of a
/// method whose name and signature stayed the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodModifierDetector;

impl RefactoringDetector for MethodModifierDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let kind = RefactoringType::ChangeMethodModifier;
        let mut found = Vec::new();
        for (pair, before, after) in stable_method_pairs(ctx) {
            if before.signature() != after.signature() {
                continue;
            }
            for (dimension, old, new) in method_modifier_changes(&before.modifiers, &after.modifiers) {
                found.push(
                    Refactoring::new(
                        kind,
                        modifier_ref(&pair.before, dimension, &old),
                        modifier_ref(&pair.after, dimension, &new),
                        format!(
                            "{kind} {old} to {new} in method {} from class {}",
                            after.display_signature(),
                            after.owner_class
                        ),
                        pair.score,
                    )
                    .with_left(ctx.before_method_location(before, "original method declaration"))
                    .with_right(ctx.after_method_location(after, "method declaration with changed modifier")),
                );
            }
        }
        found
    }

    fn name(&self) -> &'static str {
        "change-method-modifier"
    }
}

/// Change Class Modifier: visibility or abstractness of a class that kept its name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassModifierDetector;

impl RefactoringDetector for ClassModifierDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let kind = RefactoringType::ChangeClassModifier;
        let mut found = Vec::new();
        for pair in &ctx.matches.matched_classes {
            let Some((before, after)) = ctx.class_pair(&pair.before, &pair.after) else {
                continue;
            };
            if before.name != after.name {
                continue;
            }
            let mut changes = Vec::new();
            push_visibility(&mut changes, before.visibility, after.visibility);
            push_flag(&mut changes, "abstract", before.is_abstract, after.is_abstract);

            for (dimension, old, new) in changes {
                found.push(
                    Refactoring::new(
                        kind,
                        modifier_ref(&pair.before, dimension, &old),
                        modifier_ref(&pair.after, dimension, &new),
                        format!("{kind} {old} to {new} in {} {}", after.kind, pair.after),
                        pair.score,
                    )
                    .with_left(ctx.before_class_location(&pair.before, "original class declaration"))
                    .with_right(ctx.after_class_location(&pair.after, "class declaration with changed modifier")),
                );
            }
        }
        found
    }

    fn name(&self) -> &'static str {
        "change-class-modifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::detectors::tests_support::detect_with;
    use crate::model::{ClassDecl, MethodDecl, Snapshot};

    fn with_modifiers(modifiers: Modifiers) -> Snapshot {
        Snapshot::builder()
            .class(ClassDecl::new("app", "Svc"))
            .method(
                MethodDecl::new("app.Svc", "call")
                    .with_modifiers(modifiers)
                    .with_body(["x", "y"]),
            )
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn test_identical_modifiers_produce_nothing() {
        let snapshot = with_modifiers(Modifiers::public().with_static(true));
        assert!(detect_with(&MethodModifierDetector, &snapshot, &snapshot).is_empty());
    }

    #[test]
    fn test_one_record_per_dimension() {
        let before = with_modifiers(Modifiers::public());
        let after = with_modifiers(
            Modifiers::public()
                .with_visibility(Visibility::Private)
                .with_static(true),
        );
        let found = detect_with(&MethodModifierDetector, &before, &after);
        assert_eq!(found.len(), 2);
        assert!(found[0].description.starts_with("Change Method Modifier public to private"));
        assert!(found[1].description.starts_with("Change Method Modifier non-static to static"));
    }

    #[test]
    fn test_class_abstractness() {
        let build = |is_abstract| {
            Snapshot::builder()
                .class(ClassDecl::new("app", "Base").with_abstract(is_abstract))
                .build()
                .expect("valid snapshot")
        };
        let found = detect_with(&ClassModifierDetector, &build(false), &build(true));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].before, modifier_ref("app.Base", "abstract", "non-abstract"));
    }
}
