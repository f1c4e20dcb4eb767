//! Embed and prove the fixture complexes, printing timings and verdicts.
//!
//! Usage:
//!   cargo run -p realizer --release --example platonic
//!   cargo run -p realizer --release --example platonic -- verbose

use std::time::Instant;

use num_bigint::BigInt;
use num_traits::One;
use realizer::prelude::*;

fn main() {
    let verbose = std::env::args().nth(1).as_deref() == Some("verbose");
    let unit = TargetLengths::uniform(Rational::one()).unwrap();
    let mut pythagorean = TargetLengths::new();
    for (u, v, l) in [("a", "b", 9), ("b", "c", 16), ("c", "a", 25)] {
        pythagorean
            .insert(u, v, Rational::from_integer(BigInt::from(l)))
            .unwrap();
    }
    let scenarios = [
        ("tetrahedron", special::tetrahedron(), 3, &unit, 5),
        ("octahedron", special::octahedron(), 3, &unit, 5),
        ("icosahedron", special::icosahedron(), 3, &unit, 9),
        ("3-4-5 triangle", special::triangle_boundary(), 2, &pythagorean, 8),
    ];
    for (name, complex, d, targets, round_digits) in scenarios {
        let embed_cfg = EmbedCfg {
            round_digits,
            ..EmbedCfg::default()
        };
        let t0 = Instant::now();
        let Some(r) = heuristic_embed(&complex, d, targets, &embed_cfg) else {
            println!("{name}: embedding failed after {:.2?}", t0.elapsed());
            continue;
        };
        let t1 = Instant::now();
        let cfg = ProveCfg {
            verbose,
            ..ProveCfg::default()
        };
        let verdict = prove_existence(&r, targets, &cfg);
        println!(
            "{name}: embed {:.2?}, prove {:.2?}, {}",
            t1 - t0,
            t1.elapsed(),
            verdict.reason()
        );
        if let Some(trace) = verdict.trace {
            print!("{trace}");
        }
    }
}
