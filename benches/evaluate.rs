use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use wayline::{Condition, InputKind, Node, PathRule, Schema, SchemaBuilder, Session};

/// Build a linear schema of `n` number nodes, each with a branch rule and a
/// catch-all routing to the next node.
fn build_schema(n: usize) -> Arc<Schema> {
    let mut builder = SchemaBuilder::new();
    for i in 0..n {
        let id = format!("q{i}");
        let next = format!("q{}", i + 1);
        builder = if i + 1 < n {
            builder.node(&id, "Next?", InputKind::Number, |b| {
                b.path("answer < 0", "finish").path("default", &next)
            })
        } else {
            builder.node(&id, "Last.", InputKind::Number, |b| b)
        };
    }
    Arc::new(builder.compile().unwrap())
}

/// Raw nodes for the compile benchmark.
fn build_nodes(n: usize) -> Vec<Node> {
    (0..n)
        .map(|i| {
            let mut node = Node::new(format!("q{i}"), "Next?", InputKind::Number);
            if i + 1 < n {
                node.paths = vec![
                    PathRule::new("answer < 0", "finish"),
                    PathRule::new("default", format!("q{}", i + 1)),
                ];
            }
            node
        })
        .collect()
}

fn walk(schema: &Arc<Schema>, n: usize) {
    let mut session = Session::new(Arc::clone(schema));
    session.start().unwrap();
    for i in 0..n {
        let _ = black_box(session.submit_answer(i as f64).unwrap());
    }
    assert!(session.is_complete());
}

fn bench_condition_matches(c: &mut Criterion) {
    let cond = Condition::parse("answer >= 18").unwrap();
    let answer = wayline::Answer::Number(21.0);
    c.bench_function("condition_matches", |b| {
        b.iter(|| black_box(cond.matches(black_box(&answer))));
    });
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    for n in [10, 100] {
        let schema = build_schema(n);
        group.bench_function(format!("{n}_nodes"), |b| {
            b.iter(|| walk(&schema, n));
        });
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for n in [10, 100] {
        let nodes = build_nodes(n);
        group.bench_function(format!("{n}_nodes"), |b| {
            b.iter(|| Schema::compile(black_box(nodes.clone())).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_condition_matches, bench_walk, bench_compile);
criterion_main!(benches);
