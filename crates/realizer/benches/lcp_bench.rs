//! Criterion benchmarks for Lemke's method on positive-definite LCPs.
//! Sizes: n in {2, 4, 8, 12}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use num_bigint::BigInt;
use rand::{rngs::StdRng, Rng, SeedableRng};
use realizer::lcp::{solve_lcp, LcpCfg};
use realizer::linalg::Matrix;
use realizer::Rational;

fn int(n: i64) -> Rational {
    Rational::from_integer(BigInt::from(n))
}

/// `M = BᵀB + I` with small integer `B`, and `q` of mixed sign.
fn random_instance(n: usize, seed: u64) -> (Vec<Rational>, Matrix<Rational>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let b = Matrix::from_fn(n, n, |_, _| int(rng.gen_range(-3..=3)));
    let m = &b.gram() + &Matrix::identity(n);
    let q = (0..n).map(|_| int(rng.gen_range(-5..=5))).collect();
    (q, m)
}

fn bench_lcp(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcp");
    let cfg = LcpCfg::default();
    for &n in &[2usize, 4, 8, 12] {
        group.bench_with_input(BenchmarkId::new("lemke_pd", n), &n, |b, &n| {
            b.iter_batched(
                || random_instance(n, 42),
                |(q, m)| {
                    let _sol = solve_lcp(&q, &m, &cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lcp);
criterion_main!(benches);
