//! Class-level refactorings: supertype and class extraction, class
//! relocation, package renames and source folder moves.

use crate::diff::match_set::MatchedPair;
use crate::diff::refactoring::{EntityRef, Refactoring, RefactoringType};
use crate::diff::traits::{DetectionContext, RefactoringDetector};
use crate::model::{simple_name, ClassDecl, ClassKind, SnapshotIndex};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};

/// Extract Interface / Extract Superclass.
///
/// An added class qualifies when matched classes now inherit from it and
/// most of its member names already existed on their before side. Abstract
/// members of the new type carry no body, so only names are compared. All
/// qualifying subclasses are reported in one record.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupertypeExtractionDetector;

impl RefactoringDetector for SupertypeExtractionDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let threshold = ctx.config.thresholds.extract_overlap;
        let mut found = Vec::new();

        for added in &ctx.matches.added_classes {
            let Some(extracted) = ctx.after_snapshot().classes.get(added) else {
                continue;
            };
            let members = ctx.after.member_names(added);
            if members.is_empty() {
                continue;
            }
            let kind = if extracted.kind == ClassKind::Interface {
                RefactoringType::ExtractInterface
            } else {
                RefactoringType::ExtractSuperclass
            };

            let implementors: Vec<(&str, f64)> = ctx
                .matches
                .matched_classes
                .iter()
                .filter(|pair| ctx.after.is_subtype_of(&pair.after, added))
                .filter_map(|pair| {
                    let origin = ctx.before.member_names(&pair.before);
                    let overlap = members.intersection(&origin).count() as f64 / members.len() as f64;
                    (overlap >= threshold).then_some((pair.before.as_str(), overlap))
                })
                .collect();
            let Some(&(first, _)) = implementors.first() else {
                continue;
            };

            let names: Vec<&str> = implementors.iter().map(|(name, _)| *name).collect();
            let confidence = implementors.iter().map(|(_, overlap)| overlap).sum::<f64>() / implementors.len() as f64;
            let mut refactoring = Refactoring::new(
                kind,
                EntityRef::class(first),
                EntityRef::class(added),
                format!("{kind} {added} from classes [{}]", names.join(", ")),
                confidence,
            );
            for name in &names {
                refactoring = refactoring.with_left(ctx.before_class_location(name, "original type declaration"));
            }
            found.push(refactoring.with_right(ctx.after_class_location(added, "extracted type declaration")));
        }
        found
    }

    fn name(&self) -> &'static str {
        "extract-supertype"
    }
}

/// Extract Class.
///
/// An added class (not an interface) qualifies when members that left a
/// matched class reappear in it under the same name: more than one of them,
/// or at least one when the matched class now holds a field of the new
/// type. Without such a field, a new class that shares a supertype with
/// the matched class or became its supertype is not an extracted class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractClassDetector;

impl RefactoringDetector for ExtractClassDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let mut found = Vec::new();
        for added in &ctx.matches.added_classes {
            let Some(extracted) = ctx.after_snapshot().classes.get(added) else {
                continue;
            };
            if extracted.kind == ClassKind::Interface {
                continue;
            }

            let mut best: Option<(&MatchedPair, usize)> = None;
            for pair in &ctx.matches.matched_classes {
                let Some(common) = extracted_members(ctx, pair, extracted, added) else {
                    continue;
                };
                if best.map_or(true, |(_, top)| common > top) {
                    best = Some((pair, common));
                }
            }
            let Some((pair, common)) = best else {
                continue;
            };

            let size = ctx.after.methods_of(added).len() + ctx.after.fields_of(added).len();
            let kind = RefactoringType::ExtractClass;
            found.push(
                Refactoring::new(
                    kind,
                    EntityRef::class(&pair.before),
                    EntityRef::class(added),
                    format!("{kind} {added} from class {}", pair.before),
                    common as f64 / size.max(1) as f64,
                )
                .with_left(ctx.before_class_location(&pair.before, "original type declaration"))
                .with_right(ctx.after_class_location(added, "extracted type declaration")),
            );
        }
        found
    }

    fn name(&self) -> &'static str {
        "extract-class"
    }
}

/// Number of members that left `pair` for the added class, when enough did.
fn extracted_members(
    ctx: &DetectionContext<'_>,
    pair: &MatchedPair,
    extracted: &ClassDecl,
    added: &str,
) -> Option<usize> {
    let holds_extracted = ctx
        .after
        .fields_of(&pair.after)
        .iter()
        .filter_map(|key| ctx.after_snapshot().fields.get(*key))
        .any(|field| simple_name(&field.type_signature) == extracted.name);
    let shares_super = !ctx
        .after
        .super_simple_names(added)
        .is_disjoint(&ctx.after.super_simple_names(&pair.after));
    if !holds_extracted && (shares_super || ctx.after.is_subtype_of(&pair.after, added)) {
        return None;
    }

    let kept_methods = method_shapes(ctx.after, &pair.after);
    let new_methods = method_shapes(ctx.after, added);
    let common_methods = method_shapes(ctx.before, &pair.before)
        .iter()
        .filter(|shape| !kept_methods.contains(*shape) && new_methods.contains(*shape))
        .count();

    let kept_fields = field_names(ctx.after, &pair.after);
    let new_fields = field_names(ctx.after, added);
    let common_fields = field_names(ctx.before, &pair.before)
        .iter()
        .filter(|name| !kept_fields.contains(*name) && new_fields.contains(*name))
        .count();

    let threshold = usize::from(!holds_extracted);
    (common_methods > threshold || common_fields > threshold).then_some(common_methods + common_fields)
}

/// `(name, arity)` of the methods of `class`, ignoring parameter types.
fn method_shapes<'a>(index: &SnapshotIndex<'a>, class: &str) -> BTreeSet<(&'a str, usize)> {
    index
        .methods_of(class)
        .iter()
        .filter_map(|key| index.snapshot().methods.get(*key))
        .map(|m| (m.name.as_str(), m.parameters.len()))
        .collect()
}

fn field_names<'a>(index: &SnapshotIndex<'a>, class: &str) -> BTreeSet<&'a str> {
    index
        .fields_of(class)
        .iter()
        .filter_map(|key| index.snapshot().fields.get(*key))
        .map(|f| f.name.as_str())
        .collect()
}

/// Rename Class, Move Class and Move And Rename Class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassRelocationDetector;

impl RefactoringDetector for ClassRelocationDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        ctx.matches
            .matched_classes
            .iter()
            .filter(|pair| !pair.is_identity())
            .filter_map(|pair| {
                let (before, after) = ctx.class_pair(&pair.before, &pair.after)?;
                let same_package = before.package_path == after.package_path;
                let same_name = before.name == after.name;
                let (kind, verb) = match (same_package, same_name) {
                    (true, false) => (RefactoringType::RenameClass, "renamed to"),
                    (false, true) => (RefactoringType::MoveClass, "moved to"),
                    (false, false) => (RefactoringType::MoveAndRenameClass, "moved and renamed to"),
                    (true, true) => return None,
                };
                Some(
                    Refactoring::new(
                        kind,
                        EntityRef::class(&pair.before),
                        EntityRef::class(&pair.after),
                        format!("{kind} {} {verb} {}", pair.before, pair.after),
                        pair.score,
                    )
                    .with_left(ctx.before_class_location(&pair.before, "original type declaration"))
                    .with_right(ctx.after_class_location(&pair.after, "moved type declaration")),
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "class-relocation"
    }
}

/// Rename Package: a vanished package whose classes, at least two of them,
/// all went to one other package. A lone moved class is only a Move Class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageRenameDetector;

impl RefactoringDetector for PackageRenameDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let after = ctx.after_snapshot();
        let destinations: HashMap<&str, (&str, f64)> = ctx
            .matches
            .matched_classes
            .iter()
            .filter_map(|pair| {
                let class = after.classes.get(&pair.after)?;
                Some((pair.before.as_str(), (class.package_path.as_str(), pair.score)))
            })
            .collect();

        let mut found = Vec::new();
        for (package, classes) in &ctx.before_snapshot().packages {
            if classes.len() < 2 || after.packages.contains_key(package) {
                continue;
            }

            let mut target: Option<&str> = None;
            let mut total = 0.0;
            let consistent = classes.iter().all(|class| match destinations.get(class.as_str()) {
                Some(&(dest, score)) if target.map_or(true, |t| t == dest) => {
                    target = Some(dest);
                    total += score;
                    true
                }
                _ => false,
            });
            let Some(target) = target.filter(|t| consistent && *t != package.as_str()) else {
                continue;
            };

            let confidence = total / classes.len() as f64;
            let mut refactoring = Refactoring::new(
                RefactoringType::RenamePackage,
                EntityRef::package(package),
                EntityRef::package(target),
                format!("{} {package} to {target}", RefactoringType::RenamePackage),
                confidence,
            );
            for class in classes {
                refactoring = refactoring.with_left(ctx.before_class_location(class, "original package"));
                if let Some(moved) = ctx.matches.class_after(class) {
                    refactoring = refactoring.with_right(ctx.after_class_location(moved, "renamed package"));
                }
            }
            found.push(refactoring);
        }
        found
    }

    fn name(&self) -> &'static str {
        "rename-package"
    }
}

/// Move Source Folder: classes that kept their qualified name but now live
/// under another source directory. Classes that share the same directory
/// rename are reported together.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveSourceFolderDetector;

impl RefactoringDetector for MoveSourceFolderDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let mut groups: IndexMap<(String, String), Vec<&MatchedPair>> = IndexMap::new();
        for pair in ctx.matches.matched_classes.iter().filter(|p| p.before == p.after) {
            let Some((before, after)) = ctx.class_pair(&pair.before, &pair.after) else {
                continue;
            };
            if before.source_file.is_empty() || after.source_file.is_empty() {
                continue;
            }
            let (from, to) = (parent_dir(&before.source_file), parent_dir(&after.source_file));
            if from != to {
                groups.entry(folder_rename(from, to)).or_default().push(pair);
            }
        }

        let kind = RefactoringType::MoveSourceFolder;
        groups
            .into_iter()
            .map(|((from, to), pairs)| {
                let confidence = pairs.iter().map(|p| p.score).sum::<f64>() / pairs.len() as f64;
                let mut refactoring = Refactoring::new(
                    kind,
                    EntityRef::source_folder(&from),
                    EntityRef::source_folder(&to),
                    format!("{kind} {from} to {to}"),
                    confidence,
                );
                for pair in pairs {
                    refactoring = refactoring
                        .with_left(ctx.before_class_location(&pair.before, "original type declaration"))
                        .with_right(ctx.after_class_location(&pair.after, "moved type declaration"));
                }
                refactoring
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "move-source-folder"
    }
}

fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |slash| &path[..slash])
}

/// Drop the trailing directories both paths share, so `src/main/app` to
/// `lib/main/app` becomes `src` to `lib`.
fn folder_rename(from: &str, to: &str) -> (String, String) {
    let a: Vec<&str> = from.split('/').collect();
    let b: Vec<&str> = to.split('/').collect();
    let shared = a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count();
    if shared == 0 || shared == a.len() || shared == b.len() {
        return (from.to_string(), to.to_string());
    }
    (a[..a.len() - shared].join("/"), b[..b.len() - shared].join("/"))
}
