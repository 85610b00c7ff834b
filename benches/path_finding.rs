//! 路径查找基准测试
//!
//! 在固定种子的随机图上比较 BFS 和反向 Dijkstra

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pathgraph::generator::{GeneratorConfig, RandomGraphGenerator};
use pathgraph::{Graph, PathFinder, VertexId};

fn seeded_graph(vertices: u64, edges: u64) -> Graph {
    RandomGraphGenerator::new(GeneratorConfig {
        seed: Some(42),
        ..GeneratorConfig::default()
    })
    .generate(vertices, edges)
    .expect("生成基准图失败")
}

fn bench_path_finding(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_finding");

    for &vertices in &[100u64, 1_000, 5_000] {
        let graph = seeded_graph(vertices, vertices * 8);
        let start = VertexId::new(0);
        let end = VertexId::new(vertices - 1);

        group.bench_with_input(BenchmarkId::new("bfs", vertices), &graph, |b, graph| {
            b.iter(|| PathFinder::new(graph).shortest_path(black_box(start), black_box(end)))
        });

        group.bench_with_input(BenchmarkId::new("dijkstra", vertices), &graph, |b, graph| {
            b.iter(|| PathFinder::new(graph).lowest_cost_path(black_box(start), black_box(end)))
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_1000x8000", |b| {
        b.iter(|| seeded_graph(black_box(1_000), black_box(8_000)))
    });
}

criterion_group!(benches, bench_path_finding, bench_generate);
criterion_main!(benches);
