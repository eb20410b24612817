//! Quadtree benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quadtree::{QuadTree, Rect};
use std::hint::black_box;

fn grid_tree(size: u32) -> QuadTree<f64, u32> {
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    for i in 0..size {
        let x = f64::from(i % 100);
        let y = f64::from(i / 100);
        tree.insert_with_bounds(i, Rect::new(x, y, x + 1.0, y + 1.0));
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("QuadTree Insert");

    for size in [100u32, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(grid_tree(size).len()));
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("QuadTree Search");

    let tree = grid_tree(10_000);
    group.bench_function("search_10k", |b| {
        b.iter(|| {
            let query = Rect::new(25.0, 25.0, 75.0, 75.0);
            black_box(tree.search(&query))
        });
    });
    group.bench_function("has_match_10k", |b| {
        b.iter(|| {
            let query = Rect::new(25.0, 25.0, 75.0, 75.0);
            black_box(tree.has_match(&query))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_search);
criterion_main!(benches);
