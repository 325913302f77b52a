//! Criterion benchmarks for validation + fan triangulation.
//! Sizes: N in {10, 100, 1000}, uniform random points in [-1000, 1000]^2.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use triangulator::{triangulate, validate, Point};

fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0)))
        .collect()
}

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("validate", n), &n, |b, &n| {
            b.iter_batched(
                || random_points(n, 42),
                |points| {
                    let _ = validate(&points);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("fan", n), &n, |b, &n| {
            b.iter_batched(
                || random_points(n, 42),
                |points| {
                    let _ = triangulate(&points);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_triangulate);
criterion_main!(benches);
