//! Criterion benchmarks for exact simplex-to-simplex squared distance.
//! Pairs of random simplices in R³ with k+1 vertices each, k in {0, 1, 2, 3}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use realizer::distance::simplex_square_distance;
use realizer::exact::from_f64_truncated;
use realizer::lcp::LcpCfg;
use realizer::Rational;

fn random_simplex(rng: &mut StdRng, vertices: usize, shift: f64) -> Vec<Vec<Rational>> {
    (0..vertices)
        .map(|_| {
            (0..3)
                .map(|_| from_f64_truncated(rng.gen::<f64>() + shift, 4).unwrap())
                .collect()
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplex_distance");
    let cfg = LcpCfg::default();
    for &k in &[0usize, 1, 2, 3] {
        group.bench_with_input(BenchmarkId::new("disjoint", k), &k, |b, &k| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter_batched(
                || (random_simplex(&mut rng, k + 1, 0.0), random_simplex(&mut rng, k + 1, 2.0)),
                |(s1, s2)| {
                    let _d = simplex_square_distance(&s1, &s2, &cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distance);
criterion_main!(benches);
