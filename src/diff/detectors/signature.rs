//! Signature changes of members that kept their name and owner.

use super::{stable_field_pairs, stable_method_pairs};
use crate::diff::refactoring::{EntityKind, EntityRef, Refactoring, RefactoringType};
use crate::diff::traits::{DetectionContext, RefactoringDetector};
use crate::matching::{align, EditOp};
use crate::model::{MethodDecl, Parameter};
use std::collections::HashSet;

/// One classified difference between two parameter lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterChange {
    /// Same parameter, new type
    ChangeType { name: String, from: String, to: String },
    /// Same position and type, new name
    Rename { from: String, to: String, type_signature: String },
    Add(Parameter),
    Remove(Parameter),
    /// Same parameters in a different order
    Reorder { before: Vec<String>, after: Vec<String> },
}

/// Classify the difference between two parameter lists.
///
/// A pure permutation is a single reorder. Otherwise parameters are aligned
/// by name. A name that left its aligned position but still exists on the
/// other side is a reorder (plus a type change when its type moved too).
/// The remaining unaligned runs of equal length pair up position by
/// position, and the rest become additions and removals.
#[must_use]
pub fn diff_parameters(before: &[Parameter], after: &[Parameter]) -> Vec<ParameterChange> {
    if before == after {
        return Vec::new();
    }
    if is_permutation(before, after) {
        return vec![ParameterChange::Reorder {
            before: before.iter().map(|p| p.name.clone()).collect(),
            after: after.iter().map(|p| p.name.clone()).collect(),
        }];
    }

    let before_names: Vec<&str> = before.iter().map(|p| p.name.as_str()).collect();
    let after_names: Vec<&str> = after.iter().map(|p| p.name.as_str()).collect();
    let ops = align(&before_names, &after_names);

    let unaligned_before: HashSet<&str> = ops
        .iter()
        .filter_map(|op| match op {
            EditOp::Delete(i) => Some(before_names[*i]),
            _ => None,
        })
        .collect();
    let moved: HashSet<&str> = ops
        .iter()
        .filter_map(|op| match op {
            EditOp::Insert(j) if unaligned_before.contains(after_names[*j]) => Some(after_names[*j]),
            _ => None,
        })
        .collect();

    let mut changes = Vec::new();
    if !moved.is_empty() {
        let shared = |names: &[&str], other: &[&str]| -> Vec<String> {
            names
                .iter()
                .filter(|n| other.contains(*n))
                .map(|n| (*n).to_string())
                .collect()
        };
        changes.push(ParameterChange::Reorder {
            before: shared(&before_names, &after_names),
            after: shared(&after_names, &before_names),
        });
    }

    let mut deleted = Vec::new();
    let mut inserted = Vec::new();
    for op in ops {
        match op {
            EditOp::Delete(i) if moved.contains(before_names[i]) => {}
            EditOp::Insert(j) if moved.contains(after_names[j]) => {
                if let Some(old) = before.iter().find(|p| p.name == after[j].name) {
                    push_type_change(old, &after[j], &mut changes);
                }
            }
            EditOp::Delete(i) => deleted.push(&before[i]),
            EditOp::Insert(j) => inserted.push(&after[j]),
            EditOp::Keep(i, j) => {
                flush_run(&mut deleted, &mut inserted, &mut changes);
                push_type_change(&before[i], &after[j], &mut changes);
            }
        }
    }
    flush_run(&mut deleted, &mut inserted, &mut changes);
    changes
}

fn push_type_change(old: &Parameter, new: &Parameter, changes: &mut Vec<ParameterChange>) {
    if old.type_signature != new.type_signature {
        changes.push(ParameterChange::ChangeType {
            name: new.name.clone(),
            from: old.type_signature.clone(),
            to: new.type_signature.clone(),
        });
    }
}

fn is_permutation(before: &[Parameter], after: &[Parameter]) -> bool {
    if before.len() != after.len() {
        return false;
    }
    let key = |p: &Parameter| (p.name.clone(), p.type_signature.clone());
    let mut a: Vec<_> = before.iter().map(key).collect();
    let mut b: Vec<_> = after.iter().map(key).collect();
    a.sort();
    b.sort();
    a == b
}

/// Classify a run of unaligned parameters between two aligned ones.
fn flush_run(deleted: &mut Vec<&Parameter>, inserted: &mut Vec<&Parameter>, changes: &mut Vec<ParameterChange>) {
    if deleted.len() == inserted.len() {
        for (old, new) in deleted.iter().zip(inserted.iter()) {
            changes.push(ParameterChange::Rename {
                from: old.name.clone(),
                to: new.name.clone(),
                type_signature: new.type_signature.clone(),
            });
            push_type_change(old, new, changes);
        }
    } else {
        changes.extend(deleted.iter().map(|p| ParameterChange::Remove((*p).clone())));
        changes.extend(inserted.iter().map(|p| ParameterChange::Add((*p).clone())));
    }
    deleted.clear();
    inserted.clear();
}

fn in_method(after: &MethodDecl) -> String {
    format!("in method {} from class {}", after.display_signature(), after.owner_class)
}

fn parameter_ref(method_key: &str, detail: &str) -> EntityRef {
    EntityRef::new(EntityKind::Parameter, format!("{method_key}#{detail}"))
}

/// Change Return Type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnTypeDetector;

impl RefactoringDetector for ReturnTypeDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        stable_method_pairs(ctx)
            .filter(|(_, before, after)| before.return_type != after.return_type)
            .map(|(pair, before, after)| {
                let old = before.return_type.as_deref().unwrap_or("Unit");
                let new = after.return_type.as_deref().unwrap_or("Unit");
                let kind = RefactoringType::ChangeReturnType;
                Refactoring::new(
                    kind,
                    EntityRef::new(EntityKind::ReturnType, format!("{}:{old}", pair.before)),
                    EntityRef::new(EntityKind::ReturnType, format!("{}:{new}", pair.after)),
                    format!("{kind} {old} to {new} {}", in_method(after)),
                    pair.score,
                )
                .with_left(ctx.before_method_location(before, "original return type"))
                .with_right(ctx.after_method_location(after, "changed return type"))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "change-return-type"
    }
}

/// Add, remove, rename, reorder and change type of parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterDetector;

impl RefactoringDetector for ParameterDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let mut found = Vec::new();
        for (pair, before, after) in stable_method_pairs(ctx) {
            let (bk, ak) = (pair.before.as_str(), pair.after.as_str());
            for change in diff_parameters(&before.parameters, &after.parameters) {
                let (kind, from, to, description) = match change {
                    ParameterChange::ChangeType { name, from, to } => (
                        RefactoringType::ChangeParameterType,
                        parameter_ref(bk, &format!("{name}:{from}")),
                        parameter_ref(ak, &format!("{name}:{to}")),
                        format!("{name}: {from} to {name}: {to}"),
                    ),
                    ParameterChange::Rename { from, to, type_signature } => (
                        RefactoringType::RenameParameter,
                        parameter_ref(bk, &from),
                        parameter_ref(ak, &to),
                        format!("{from}: {type_signature} to {to}: {type_signature}"),
                    ),
                    ParameterChange::Add(param) => (
                        RefactoringType::AddParameter,
                        EntityRef::method(bk),
                        parameter_ref(ak, &param.name),
                        param.to_string(),
                    ),
                    ParameterChange::Remove(param) => (
                        RefactoringType::RemoveParameter,
                        parameter_ref(bk, &param.name),
                        EntityRef::method(ak),
                        param.to_string(),
                    ),
                    ParameterChange::Reorder { before: old, after: new } => (
                        RefactoringType::ReorderParameter,
                        parameter_ref(bk, &format!("({})", old.join(", "))),
                        parameter_ref(ak, &format!("({})", new.join(", "))),
                        format!("({}) to ({})", old.join(", "), new.join(", ")),
                    ),
                };
                found.push(
                    Refactoring::new(kind, from, to, format!("{kind} {description} {}", in_method(after)), pair.score)
                        .with_left(ctx.before_method_location(before, "original method declaration"))
                        .with_right(ctx.after_method_location(after, "method declaration with changed parameters")),
                );
            }
        }
        found
    }

    fn name(&self) -> &'static str {
        "parameter-changes"
    }
}

/// Change Field Type.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldTypeDetector;

impl RefactoringDetector for FieldTypeDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        stable_field_pairs(ctx)
            .filter(|(_, before, after)| before.type_signature != after.type_signature)
            .map(|(pair, before, after)| {
                let kind = RefactoringType::ChangeFieldType;
                Refactoring::new(
                    kind,
                    EntityRef::field(format!("{}:{}", pair.before, before.type_signature)),
                    EntityRef::field(format!("{}:{}", pair.after, after.type_signature)),
                    format!(
                        "{kind} {} to {} in class {}",
                        before.display_signature(),
                        after.display_signature(),
                        after.owner_class
                    ),
                    pair.score,
                )
                .with_left(ctx.before_class_location(&before.owner_class, "original field declaration"))
                .with_right(ctx.after_class_location(&after.owner_class, "changed-type field declaration"))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "change-field-type"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::detectors::tests_support::detect_with;
    use crate::model::{ClassDecl, FieldDecl, Snapshot};

    fn params(list: &[(&str, &str)]) -> Vec<Parameter> {
        list.iter().map(|(n, t)| Parameter::new(*n, *t)).collect()
    }

    fn with_method(method: MethodDecl) -> Snapshot {
        Snapshot::builder()
            .class(ClassDecl::new("app", "Store"))
            .method(method)
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn test_single_added_parameter() {
        let changes = diff_parameters(&params(&[("a", "Int")]), &params(&[("a", "Int"), ("b", "String")]));
        assert_eq!(changes, vec![ParameterChange::Add(Parameter::new("b", "String"))]);
    }

    #[test]
    fn test_type_change_of_kept_parameter() {
        let changes = diff_parameters(&params(&[("a", "Int"), ("b", "Int")]), &params(&[("a", "Long"), ("b", "Int")]));
        assert_eq!(
            changes,
            vec![ParameterChange::ChangeType {
                name: "a".into(),
                from: "Int".into(),
                to: "Long".into()
            }]
        );
    }

    #[test]
    fn test_rename_and_reorder() {
        let renamed = diff_parameters(&params(&[("id", "Int")]), &params(&[("key", "Int")]));
        assert_eq!(
            renamed,
            vec![ParameterChange::Rename {
                from: "id".into(),
                to: "key".into(),
                type_signature: "Int".into()
            }]
        );

        let reordered = diff_parameters(
            &params(&[("a", "Int"), ("b", "String")]),
            &params(&[("b", "String"), ("a", "Int")]),
        );
        assert!(matches!(reordered.as_slice(), [ParameterChange::Reorder { .. }]));
    }

    #[test]
    fn test_reordered_parameter_with_new_type() {
        let changes = diff_parameters(
            &params(&[("a", "Int"), ("b", "Int")]),
            &params(&[("b", "Int"), ("a", "Long")]),
        );
        assert_eq!(
            changes,
            vec![
                ParameterChange::Reorder {
                    before: vec!["a".into(), "b".into()],
                    after: vec!["b".into(), "a".into()],
                },
                ParameterChange::ChangeType {
                    name: "a".into(),
                    from: "Int".into(),
                    to: "Long".into()
                },
            ]
        );
    }

    #[test]
    fn test_reorder_alongside_added_parameter() {
        let changes = diff_parameters(
            &params(&[("a", "Int"), ("b", "String")]),
            &params(&[("b", "String"), ("a", "Int"), ("c", "Boolean")]),
        );
        assert_eq!(changes.len(), 2);
        assert!(matches!(&changes[0], ParameterChange::Reorder { .. }));
        assert_eq!(changes[1], ParameterChange::Add(Parameter::new("c", "Boolean")));
    }

    #[test]
    fn test_removed_parameter_detected_on_matched_method() {
        let body = ["x", "y", "z"];
        let before = with_method(
            MethodDecl::new("app.Store", "save")
                .with_parameter("a", "Int")
                .with_parameter("b", "String")
                .with_body(body),
        );
        let after = with_method(MethodDecl::new("app.Store", "save").with_parameter("a", "Int").with_body(body));
        let found = detect_with(&ParameterDetector, &before, &after);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].refactoring_type, RefactoringType::RemoveParameter);
        assert_eq!(found[0].after, EntityRef::method("app.Store.save(Int)"));
    }

    #[test]
    fn test_return_type_change() {
        let before = with_method(MethodDecl::new("app.Store", "size").with_return_type("Int").with_body(["n"]));
        let after = with_method(MethodDecl::new("app.Store", "size").with_return_type("Long").with_body(["n"]));
        let found = detect_with(&ReturnTypeDetector, &before, &after);
        assert_eq!(found.len(), 1);
        assert!(found[0].description.starts_with("Change Return Type Int to Long"));
    }

    #[test]
    fn test_field_type_change() {
        let build = |ty: &str| {
            Snapshot::builder()
                .class(ClassDecl::new("app", "Store"))
                .field(FieldDecl::new("app.Store", "size", ty))
                .build()
                .expect("valid snapshot")
        };
        let found = detect_with(&FieldTypeDetector, &build("Int"), &build("Long"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].refactoring_type, RefactoringType::ChangeFieldType);
    }
}
