//! Benchmarks for the diff engine.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use refminer::model::{ClassDecl, FieldDecl, MethodDecl, RenameHints, Snapshot};
use refminer::{DiffEngine, EngineConfig};
use std::hint::black_box;

/// `classes` classes with a handful of members each. `revision` shifts a
/// few names so the second snapshot carries renames and moves.
fn synthetic(classes: usize, revision: usize) -> Snapshot {
    let mut builder = Snapshot::builder();
    for c in 0..classes {
        let name = if revision > 0 && c % 10 == 0 {
            format!("Renamed{c}")
        } else {
            format!("Class{c}")
        };
        let package = format!("pkg{}", c % 8);
        let owner = format!("{package}.{name}");
        builder = builder.class(ClassDecl::new(&package, &name));
        for m in 0..6 {
            let method_name = if revision > 0 && (c + m) % 7 == 0 {
                format!("handle{m}V2")
            } else {
                format!("handle{m}")
            };
            let body: Vec<String> = (0..12).map(|t| format!("stmt_{c}_{m}_{t}")).collect();
            builder = builder.method(
                MethodDecl::new(&owner, method_name)
                    .with_parameter("input", "String")
                    .with_return_type("Int")
                    .with_body(body),
            );
        }
        for f in 0..3 {
            builder = builder.field(FieldDecl::new(&owner, format!("field{f}"), "Int").with_initializer(["0"]));
        }
    }
    builder.build().unwrap_or_default()
}

fn benchmark_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    let hints = RenameHints::new();

    for size in [10, 100, 400] {
        let before = synthetic(size, 0);
        let after = synthetic(size, 1);

        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            let engine = DiffEngine::new();
            b.iter(|| black_box(engine.diff(&before, &after, &hints)));
        });
        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            let engine = DiffEngine::new().with_engine_config(EngineConfig::sequential());
            b.iter(|| black_box(engine.diff(&before, &after, &hints)));
        });
    }
    group.finish();
}

fn benchmark_identity(c: &mut Criterion) {
    let snapshot = synthetic(200, 0);
    let hints = RenameHints::new();
    let engine = DiffEngine::new();
    c.bench_function("diff_identity_200", |b| {
        b.iter(|| black_box(engine.diff(&snapshot, &snapshot, &hints)));
    });
}

criterion_group!(benches, benchmark_diff, benchmark_identity);
criterion_main!(benches);
