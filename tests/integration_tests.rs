//! Integration tests for refminer
//!
//! Exercise the whole engine on small hand-built snapshots.

use refminer::diff::{EngineConfig, MatchOrigin, ModelDiff, RefactoringType};
use refminer::model::{ClassDecl, FieldDecl, MethodDecl, Modifiers, RenameHints, Snapshot, Visibility};
use refminer::{DiffEngine, MatchingConfig};
use std::collections::HashSet;

fn diff(before: &Snapshot, after: &Snapshot) -> ModelDiff {
    refminer::diff(before, after, &RenameHints::new()).expect("diff should succeed")
}

fn types(result: &ModelDiff) -> Vec<RefactoringType> {
    result.refactorings.iter().map(|r| r.refactoring_type).collect()
}

/// Every declaration lands in exactly one of matched / removed (before side)
/// and matched / added (after side).
fn assert_total(before: &Snapshot, after: &Snapshot, result: &ModelDiff) {
    let set = &result.match_set;
    let sides = [
        (
            before.classes.keys().collect::<Vec<_>>(),
            after.classes.keys().collect::<Vec<_>>(),
            &set.matched_classes,
            &set.removed_classes,
            &set.added_classes,
        ),
        (
            before.methods.keys().collect(),
            after.methods.keys().collect(),
            &set.matched_methods,
            &set.removed_methods,
            &set.added_methods,
        ),
        (
            before.fields.keys().collect(),
            after.fields.keys().collect(),
            &set.matched_fields,
            &set.removed_fields,
            &set.added_fields,
        ),
    ];
    for (befores, afters, matched, removed, added) in sides {
        for key in befores {
            let hits = matched.iter().filter(|p| &p.before == key).count() + removed.iter().filter(|k| *k == key).count();
            assert_eq!(hits, 1, "{key} must be matched or removed exactly once");
        }
        for key in afters {
            let hits = matched.iter().filter(|p| &p.after == key).count() + added.iter().filter(|k| *k == key).count();
            assert_eq!(hits, 1, "{key} must be matched or added exactly once");
        }
    }
}

// ============================================================================
// Identity and totality
// ============================================================================

mod identity {
    use super::*;

    fn service() -> Snapshot {
        Snapshot::builder()
            .class(ClassDecl::new("app", "Base").with_abstract(true))
            .class(ClassDecl::new("app", "Service").with_super_type("Base"))
            .method(
                MethodDecl::new("app.Service", "handle")
                    .with_parameter("request", "Request")
                    .with_return_type("Response")
                    .with_body(["validate(request)", "dispatch(request)", "return"]),
            )
            .method(MethodDecl::new("app.Service", "close").with_modifiers(Modifiers::public().with_open(true)))
            .field(FieldDecl::new("app.Service", "retries", "Int").with_initializer(["3"]))
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn test_identical_snapshots_report_nothing() {
        let snapshot = service();
        let result = diff(&snapshot, &snapshot);

        assert!(result.refactorings.is_empty());
        assert!(result.match_set.is_identity());
        assert_eq!(result.summary.matched, snapshot.declaration_count());
        assert!(result
            .match_set
            .matched_methods
            .iter()
            .all(|p| p.score == 1.0 && p.origin == MatchOrigin::Identity));
        assert_total(&snapshot, &snapshot, &result);
    }

    #[test]
    fn test_empty_snapshots() {
        let result = diff(&Snapshot::default(), &Snapshot::default());
        assert!(!result.has_refactorings());
        assert_eq!(result.summary.matched, 0);
    }

    #[test]
    fn test_everything_added() {
        let after = service();
        let result = diff(&Snapshot::default(), &after);
        assert_eq!(result.match_set.added_count(), after.declaration_count());
        assert_eq!(result.match_set.matched_count(), 0);
        assert_total(&Snapshot::default(), &after, &result);
    }

    #[test]
    fn test_unchanged_modifiers_are_not_reported() {
        let before = service();
        let mut after = service();
        after.classes.get_mut("app.Service").expect("declared").source_file = "src/Service.kt".into();

        let result = diff(&before, &after);
        assert!(result.of_type(RefactoringType::ChangeMethodModifier).next().is_none());
        assert!(result.of_type(RefactoringType::ChangeClassModifier).next().is_none());
    }
}

// ============================================================================
// Classes
// ============================================================================

mod classes {
    use super::*;

    fn worker(package: &str, class: &str) -> Snapshot {
        let owner = format!("{package}.{class}");
        Snapshot::builder()
            .class(ClassDecl::new(package, class))
            .method(MethodDecl::new(&owner, "run").with_body(["load", "check", "store"]))
            .field(FieldDecl::new(&owner, "attempts", "Int"))
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn test_rename_class_is_reported_once() {
        let before = worker("app", "Job");
        let after = worker("app", "Task");
        let result = diff(&before, &after);

        assert_eq!(types(&result), vec![RefactoringType::RenameClass]);
        assert_eq!(result.refactorings[0].description, "Rename Class app.Job renamed to app.Task");
        assert_total(&before, &after, &result);
    }

    #[test]
    fn test_rename_then_rename_back_is_symmetric() {
        let forward = diff(&worker("app", "Job"), &worker("app", "Task"));
        let backward = diff(&worker("app", "Task"), &worker("app", "Job"));
        assert_eq!(types(&forward), types(&backward));
        assert_eq!(backward.refactorings[0].before.name, "app.Task");
    }

    #[test]
    fn test_move_class_between_packages() {
        let result = diff(&worker("app", "Job"), &worker("jobs", "Job"));
        assert_eq!(types(&result), vec![RefactoringType::MoveClass]);
    }

    #[test]
    fn test_move_and_rename_class() {
        let result = diff(&worker("app", "Job"), &worker("jobs", "Task"));
        assert_eq!(types(&result), vec![RefactoringType::MoveAndRenameClass]);
        assert_eq!(
            result.refactorings[0].description,
            "Move And Rename Class app.Job moved and renamed to jobs.Task"
        );
    }

    #[test]
    fn test_package_rename_needs_every_class_moved_together() {
        let build = |package: &str| {
            Snapshot::builder()
                .class(ClassDecl::new(package, "Job"))
                .class(ClassDecl::new(package, "Queue"))
                .method(MethodDecl::new(format!("{package}.Job"), "run").with_body(["load", "check", "store"]))
                .method(MethodDecl::new(format!("{package}.Queue"), "push").with_body(["lock", "append", "unlock"]))
                .build()
                .expect("valid snapshot")
        };
        let result = diff(&build("app"), &build("jobs"));
        let renames: Vec<_> = result.of_type(RefactoringType::RenamePackage).collect();
        assert_eq!(renames.len(), 1);
        assert_eq!(renames[0].description, "Rename Package app to jobs");
        assert_eq!(result.of_type(RefactoringType::MoveClass).count(), 2);
    }

    #[test]
    fn test_moved_source_folder() {
        let build = |root: &str| {
            Snapshot::builder()
                .class(ClassDecl::new("app", "Job").with_source_file(format!("{root}/app/Job.kt")))
                .class(ClassDecl::new("app", "Queue").with_source_file(format!("{root}/app/Queue.kt")))
                .build()
                .expect("valid snapshot")
        };
        let result = diff(&build("src/main/kotlin"), &build("jobs/src/main/kotlin"));
        assert_eq!(types(&result), vec![RefactoringType::MoveSourceFolder]);
        assert_eq!(
            result.refactorings[0].description,
            "Move Source Folder src/main/kotlin/app to jobs/src/main/kotlin/app"
        );
        assert_eq!(result.refactorings[0].right_locations.len(), 2);
    }

    #[test]
    fn test_extract_superclass_from_two_classes() {
        let before = Snapshot::builder()
            .class(ClassDecl::new("app", "Car"))
            .class(ClassDecl::new("app", "Bike"))
            .method(MethodDecl::new("app.Car", "move").with_body(["wheels", "engine"]))
            .method(MethodDecl::new("app.Bike", "move").with_body(["wheels", "pedals"]))
            .build()
            .expect("valid snapshot");
        let after = Snapshot::builder()
            .class(ClassDecl::new("app", "Car").with_super_type("Vehicle"))
            .class(ClassDecl::new("app", "Bike").with_super_type("Vehicle"))
            .class(ClassDecl::new("app", "Vehicle").with_abstract(true))
            .method(MethodDecl::new("app.Car", "move").with_body(["wheels", "engine"]))
            .method(MethodDecl::new("app.Bike", "move").with_body(["wheels", "pedals"]))
            .method(MethodDecl::new("app.Vehicle", "move"))
            .build()
            .expect("valid snapshot");
        let result = diff(&before, &after);

        let extracted: Vec<_> = result.of_type(RefactoringType::ExtractSuperclass).collect();
        assert_eq!(extracted.len(), 1);
        assert_eq!(
            extracted[0].description,
            "Extract Superclass app.Vehicle from classes [app.Bike, app.Car]"
        );
        assert!(result.of_type(RefactoringType::ExtractClass).next().is_none());
        assert_total(&before, &after, &result);
    }

    #[test]
    fn test_extract_class_with_moved_fields() {
        let before = Snapshot::builder()
            .class(ClassDecl::new("app", "Order"))
            .method(MethodDecl::new("app.Order", "total").with_body(["sum", "items"]))
            .field(FieldDecl::new("app.Order", "street", "String"))
            .field(FieldDecl::new("app.Order", "city", "String"))
            .build()
            .expect("valid snapshot");
        let after = Snapshot::builder()
            .class(ClassDecl::new("app", "Order"))
            .class(ClassDecl::new("app", "Address"))
            .method(MethodDecl::new("app.Order", "total").with_body(["sum", "items"]))
            .field(FieldDecl::new("app.Order", "address", "Address"))
            .field(FieldDecl::new("app.Address", "street", "String"))
            .field(FieldDecl::new("app.Address", "city", "String"))
            .build()
            .expect("valid snapshot");
        let result = diff(&before, &after);

        let extracted: Vec<_> = result.of_type(RefactoringType::ExtractClass).collect();
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].description, "Extract Class app.Address from class app.Order");
        assert_eq!(result.of_type(RefactoringType::MoveField).count(), 2);
    }

    #[test]
    fn test_rename_hint_pairs_dissimilar_classes() {
        let before = Snapshot::builder()
            .class(ClassDecl::new("app", "Alpha"))
            .build()
            .expect("valid snapshot");
        let after = Snapshot::builder()
            .class(ClassDecl::new("app", "Omega"))
            .build()
            .expect("valid snapshot");

        assert!(diff(&before, &after).refactorings.is_empty());

        let hints = RenameHints::from([("app.Alpha".to_string(), "app.Omega".to_string())]);
        let hinted = refminer::diff(&before, &after, &hints).expect("diff should succeed");
        assert_eq!(types(&hinted), vec![RefactoringType::RenameClass]);
        assert_eq!(hinted.refactorings[0].confidence, 1.0);
    }
}

// ============================================================================
// Members
// ============================================================================

mod members {
    use super::*;

    /// `Parent` and `Child` (a subtype), plus an unrelated `Other`.
    fn family(method_owner: &str) -> Snapshot {
        Snapshot::builder()
            .class(ClassDecl::new("app", "Parent"))
            .class(ClassDecl::new("app", "Child").with_super_type("Parent"))
            .class(ClassDecl::new("app", "Other"))
            .method(MethodDecl::new(method_owner, "save").with_body(["open", "write", "flush", "close"]))
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn test_pull_up_wins_over_move() {
        let result = diff(&family("app.Child"), &family("app.Parent"));
        assert_eq!(types(&result), vec![RefactoringType::PullUpMethod]);
        assert_eq!(
            result.refactorings[0].description,
            "Pull Up Method public save() from class app.Child to public save() from class app.Parent"
        );
    }

    #[test]
    fn test_push_down_into_subtype() {
        let result = diff(&family("app.Parent"), &family("app.Child"));
        assert_eq!(types(&result), vec![RefactoringType::PushDownMethod]);
    }

    #[test]
    fn test_unrelated_target_is_plain_move() {
        let result = diff(&family("app.Child"), &family("app.Other"));
        assert_eq!(types(&result), vec![RefactoringType::MoveMethod]);
    }

    #[test]
    fn test_move_and_rename_method() {
        let before = family("app.Child");
        let after = Snapshot::builder()
            .class(ClassDecl::new("app", "Parent"))
            .class(ClassDecl::new("app", "Child").with_super_type("Parent"))
            .class(ClassDecl::new("app", "Other"))
            .method(MethodDecl::new("app.Other", "persist").with_body(["open", "write", "flush", "close"]))
            .build()
            .expect("valid snapshot");
        let result = diff(&before, &after);
        assert_eq!(types(&result), vec![RefactoringType::MoveAndRenameMethod]);
        assert_eq!(result.refactorings[0].after.name, "app.Other.persist()");
    }

    /// The `family` classes with one field, `name` on `owner`.
    fn field_family(owner: &str, name: &str) -> Snapshot {
        Snapshot::builder()
            .class(ClassDecl::new("app", "Parent"))
            .class(ClassDecl::new("app", "Child").with_super_type("Parent"))
            .class(ClassDecl::new("app", "Other"))
            .field(FieldDecl::new(owner, name, "Long").with_initializer(["30"]))
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn test_pull_up_field_wins_over_move_field() {
        let result = diff(&field_family("app.Child", "timeout"), &field_family("app.Parent", "timeout"));
        assert_eq!(types(&result), vec![RefactoringType::PullUpField]);
        assert!(result.of_type(RefactoringType::MoveField).next().is_none());
        assert_eq!(result.refactorings[0].before.name, "app.Child.timeout");
        assert_eq!(result.refactorings[0].after.name, "app.Parent.timeout");
    }

    #[test]
    fn test_push_down_field() {
        let result = diff(&field_family("app.Parent", "timeout"), &field_family("app.Child", "timeout"));
        assert_eq!(types(&result), vec![RefactoringType::PushDownField]);
    }

    #[test]
    fn test_move_field_to_unrelated_class() {
        let result = diff(&field_family("app.Child", "timeout"), &field_family("app.Other", "timeout"));
        assert_eq!(types(&result), vec![RefactoringType::MoveField]);
    }

    #[test]
    fn test_move_and_rename_field() {
        let result = diff(&field_family("app.Child", "timeout"), &field_family("app.Other", "timeoutMs"));
        assert_eq!(types(&result), vec![RefactoringType::MoveAndRenameField]);
        assert_eq!(result.refactorings[0].after.name, "app.Other.timeoutMs");
    }

    fn store(save: MethodDecl) -> Snapshot {
        Snapshot::builder()
            .class(ClassDecl::new("app", "Store"))
            .method(save)
            .build()
            .expect("valid snapshot")
    }

    #[test]
    fn test_added_parameter() {
        let body = ["open", "write(count)", "close"];
        let before = store(MethodDecl::new("app.Store", "save").with_parameter("count", "Int").with_body(body));
        let after = store(
            MethodDecl::new("app.Store", "save")
                .with_parameter("count", "Int")
                .with_parameter("flush", "Boolean")
                .with_body(body),
        );
        let result = diff(&before, &after);
        assert_eq!(types(&result), vec![RefactoringType::AddParameter]);
        assert_eq!(
            result.refactorings[0].description,
            "Add Parameter flush: Boolean in method public save(count: Int, flush: Boolean) from class app.Store"
        );
        assert_eq!(result.match_set.matched_methods[0].after, "app.Store.save(Int, Boolean)");
    }

    #[test]
    fn test_reordered_parameter_with_new_type() {
        let body = ["put(a)", "put(b)"];
        let before = store(
            MethodDecl::new("app.Store", "save")
                .with_parameter("a", "Int")
                .with_parameter("b", "Int")
                .with_body(body),
        );
        let after = store(
            MethodDecl::new("app.Store", "save")
                .with_parameter("b", "Int")
                .with_parameter("a", "Long")
                .with_body(body),
        );
        let result = diff(&before, &after);
        assert_eq!(
            types(&result),
            vec![RefactoringType::ReorderParameter, RefactoringType::ChangeParameterType]
        );
        assert!(result.of_type(RefactoringType::AddParameter).next().is_none());
        assert!(result.of_type(RefactoringType::RemoveParameter).next().is_none());
    }

    #[test]
    fn test_rename_method_keeps_body() {
        let build = |name: &str| {
            Snapshot::builder()
                .class(ClassDecl::new("app", "Job"))
                .method(MethodDecl::new("app.Job", name).with_body(["load", "check", "store"]))
                .build()
                .expect("valid snapshot")
        };
        let result = diff(&build("run"), &build("execute"));
        assert_eq!(types(&result), vec![RefactoringType::RenameMethod]);
        assert_eq!(result.refactorings[0].after.name, "app.Job.execute()");
    }

    #[test]
    fn test_parameter_type_change() {
        let build = |ty: &str| {
            Snapshot::builder()
                .class(ClassDecl::new("app", "Store"))
                .method(
                    MethodDecl::new("app.Store", "save")
                        .with_parameter("count", ty)
                        .with_body(["open", "write(count)", "close"]),
                )
                .build()
                .expect("valid snapshot")
        };
        let result = diff(&build("Int"), &build("Long"));
        assert_eq!(types(&result), vec![RefactoringType::ChangeParameterType]);
        assert_eq!(
            result.refactorings[0].description,
            "Change Parameter Type count: Int to count: Long in method public save(count: Long) from class app.Store"
        );
    }

    #[test]
    fn test_visibility_change_is_reported_once() {
        let build = |visibility| {
            Snapshot::builder()
                .class(ClassDecl::new("app", "Svc"))
                .method(
                    MethodDecl::new("app.Svc", "call")
                        .with_modifiers(Modifiers::public().with_visibility(visibility))
                        .with_body(["x", "y"]),
                )
                .build()
                .expect("valid snapshot")
        };
        let result = diff(&build(Visibility::Public), &build(Visibility::Internal));
        assert_eq!(types(&result), vec![RefactoringType::ChangeMethodModifier]);
    }
}

// ============================================================================
// Extraction
// ============================================================================

mod extraction {
    use super::*;

    fn job(methods: Vec<MethodDecl>) -> Snapshot {
        let mut builder = Snapshot::builder().class(ClassDecl::new("app", "Job"));
        for method in methods {
            builder = builder.method(method);
        }
        builder.build().expect("valid snapshot")
    }

    #[test]
    fn test_extract_method_is_reported_once() {
        let before = job(vec![MethodDecl::new("app.Job", "run").with_body(["a", "b", "c", "d"])]);
        let after = job(vec![
            MethodDecl::new("app.Job", "run").with_body(["call(helper)"]),
            MethodDecl::new("app.Job", "helper").with_body(["a", "b", "c", "d"]),
        ]);
        let result = diff(&before, &after);

        assert_eq!(types(&result), vec![RefactoringType::ExtractMethod]);
        assert_eq!(result.refactorings[0].before.name, "app.Job.run()");
        assert_eq!(result.refactorings[0].after.name, "app.Job.helper()");
        assert_eq!(result.match_set.added_methods, vec!["app.Job.helper()".to_string()]);
        assert_total(&before, &after, &result);
    }

    #[test]
    fn test_extract_method_alongside_new_parameter() {
        let before = job(vec![MethodDecl::new("app.Job", "run").with_body(["a", "b", "c", "d"])]);
        let after = job(vec![
            MethodDecl::new("app.Job", "run")
                .with_parameter("force", "Boolean")
                .with_body(["call(helper)"]),
            MethodDecl::new("app.Job", "helper").with_body(["a", "b", "c", "d"]),
        ]);
        let result = diff(&before, &after);
        let found: HashSet<RefactoringType> = types(&result).into_iter().collect();

        assert!(found.contains(&RefactoringType::ExtractMethod));
        assert!(found.contains(&RefactoringType::AddParameter));
        assert!(!found.contains(&RefactoringType::RenameMethod));
        assert_eq!(result.match_set.matched_methods[0].after, "app.Job.run(Boolean)");
        assert_eq!(result.match_set.added_methods, vec!["app.Job.helper()".to_string()]);
        assert_total(&before, &after, &result);
    }

    #[test]
    fn test_inline_is_the_reverse_of_extract() {
        let extracted = job(vec![
            MethodDecl::new("app.Job", "run").with_body(["call(helper)"]),
            MethodDecl::new("app.Job", "helper").with_body(["a", "b", "c", "d"]),
        ]);
        let inlined = job(vec![MethodDecl::new("app.Job", "run").with_body(["a", "b", "c", "d"])]);
        let result = diff(&extracted, &inlined);
        assert_eq!(types(&result), vec![RefactoringType::InlineMethod]);
    }
}

// ============================================================================
// Engine behavior
// ============================================================================

mod engine {
    use super::*;

    fn mixed() -> (Snapshot, Snapshot) {
        let before = Snapshot::builder()
            .class(ClassDecl::new("app", "Job"))
            .class(ClassDecl::new("app", "Util"))
            .class(ClassDecl::new("app", "Parent"))
            .class(ClassDecl::new("app", "Child").with_super_type("Parent"))
            .method(MethodDecl::new("app.Job", "run").with_body(["a", "b", "c", "d"]))
            .method(MethodDecl::new("app.Util", "format").with_body(["trim", "pad"]))
            .method(MethodDecl::new("app.Child", "save").with_body(["open", "write", "close"]))
            .field(FieldDecl::new("app.Job", "count", "Int").with_initializer(["0"]))
            .build()
            .expect("valid snapshot");
        let after = Snapshot::builder()
            .class(ClassDecl::new("app", "Job"))
            .class(ClassDecl::new("app", "Helpers"))
            .class(ClassDecl::new("app", "Parent"))
            .class(ClassDecl::new("app", "Child").with_super_type("Parent"))
            .method(MethodDecl::new("app.Job", "run").with_body(["call(helper)"]))
            .method(MethodDecl::new("app.Job", "helper").with_body(["a", "b", "c", "d"]))
            .method(MethodDecl::new("app.Helpers", "format").with_body(["trim", "pad"]))
            .method(MethodDecl::new("app.Parent", "save").with_body(["open", "write", "close"]))
            .field(FieldDecl::new("app.Job", "counter", "Int").with_initializer(["0"]))
            .build()
            .expect("valid snapshot");
        (before, after)
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let (before, after) = mixed();
        let first = diff(&before, &after);
        for _ in 0..5 {
            assert_eq!(diff(&before, &after), first);
        }
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let (before, after) = mixed();
        let sequential = DiffEngine::new()
            .with_engine_config(EngineConfig::sequential())
            .diff(&before, &after, &RenameHints::new())
            .expect("diff should succeed");
        assert_eq!(sequential, diff(&before, &after));
    }

    #[test]
    fn test_mixed_changes_are_all_explained() {
        let (before, after) = mixed();
        let result = diff(&before, &after);
        let found: HashSet<RefactoringType> = types(&result).into_iter().collect();

        for expected in [
            RefactoringType::RenameClass,
            RefactoringType::ExtractMethod,
            RefactoringType::PullUpMethod,
            RefactoringType::RenameField,
        ] {
            assert!(found.contains(&expected), "missing {expected}");
        }
        assert!(!found.contains(&RefactoringType::MoveMethod));
        assert_total(&before, &after, &result);
    }

    #[test]
    fn test_no_two_records_share_an_entity_pair() {
        let (before, after) = mixed();
        let result = diff(&before, &after);
        let keys: HashSet<_> = result.refactorings.iter().map(|r| r.entity_key()).collect();
        assert_eq!(keys.len(), result.refactorings.len());
    }

    #[test]
    fn test_strict_preset_matches_less() {
        let before = Snapshot::builder()
            .class(ClassDecl::new("app", "Job"))
            .method(MethodDecl::new("app.Job", "run").with_body(["a", "b", "c", "d"]))
            .build()
            .expect("valid snapshot");
        let after = Snapshot::builder()
            .class(ClassDecl::new("app", "Job"))
            .method(MethodDecl::new("app.Job", "go").with_body(["a", "b", "x", "y"]))
            .build()
            .expect("valid snapshot");

        let strict = MatchingConfig::from_preset("strict").expect("known preset");
        let loose = MatchingConfig::from_preset("permissive").expect("known preset");
        let with = |config: MatchingConfig| {
            DiffEngine::new()
                .with_config(config)
                .diff(&before, &after, &RenameHints::new())
                .expect("diff should succeed")
        };
        assert!(with(strict).match_set.matched_methods.len() <= with(loose).match_set.matched_methods.len());
    }

    #[test]
    fn test_dangling_owner_is_rejected() {
        let mut broken = Snapshot::builder()
            .class(ClassDecl::new("app", "Job"))
            .method(MethodDecl::new("app.Job", "run"))
            .build()
            .expect("valid snapshot");
        broken.classes.clear();

        let err = refminer::diff(&broken, &Snapshot::default(), &RenameHints::new()).expect_err("must fail");
        assert!(err.is_malformed_snapshot());
    }
}
