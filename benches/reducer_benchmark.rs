use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_simplify::graph::{AttributeName, Node};
use graph_simplify::reducer::bucket_nodes;

/// Benchmark bucketing of mutually dissimilar nodes
fn bench_bucket_dissimilar(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_dissimilar");

    for size in [100, 1000, 5000].iter() {
        let nodes: Vec<Node> = (0..*size)
            .map(|i| Node::new(format!("n{}", i)).attr("idx", i as i64))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| bucket_nodes(Some(&nodes), Some(&[]), 20, &[]).unwrap());
        });
    }
    group.finish();
}

/// Benchmark bucketing with a priority list over clustered attributes
fn bench_bucket_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_priority");
    let priority: Vec<AttributeName> = vec!["age".into(), "type".into()];

    for size in [100, 1000, 5000].iter() {
        let nodes: Vec<Node> = (0..*size)
            .map(|i| {
                Node::new(format!("n{}", i))
                    .attr("age", (i % 7) as i64)
                    .attr("type", if i % 2 == 0 { "person" } else { "robot" })
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| bucket_nodes(Some(&nodes), Some(&[]), 20, &priority).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bucket_dissimilar, bench_bucket_priority);
criterion_main!(benches);
