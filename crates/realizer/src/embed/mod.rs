//! Heuristic spring embedder producing exact starting realizations.
//!
//! Purpose
//! - Find coordinates whose squared edge lengths are close to the targets and
//!   whose faces stay apart, then round them to rationals for the prover.
//!
//! Why this design (short)
//! - Springs plus a short repulsion phase untangle a random start; annealed
//!   spring-only phases settle the lengths. A few Gauss–Newton steps then
//!   drive the length residual to float precision, so the remaining error is
//!   dominated by the final decimal rounding.
//! - Every attempt draws from its own replay token `(seed, attempt)`, so a
//!   failing attempt can be reproduced in isolation.
//! - The acceptance test is exact: the rounded realization must have
//!   collision distance² above `accept_sq_distance`.
//!
//! Code cross-refs: `crate::complex::RealizedComplex`, `crate::prove`.

pub(crate) mod cfg;
mod polish;
mod springs;

use std::collections::BTreeMap;

use nalgebra::DVector;
use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::complex::{AbstractComplex, Label, RealizedComplex, TargetLengths};
use crate::exact::{to_f64, Rational};
use crate::lcp::LcpCfg;
use springs::Spring;

/// One integration phase: spring and repulsion coefficients for `duration`
/// time units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringPhase {
    pub spring: f64,
    pub repel: f64,
    pub duration: f64,
}

impl SpringPhase {
    pub const fn new(spring: f64, repel: f64, duration: f64) -> Self {
        Self {
            spring,
            repel,
            duration,
        }
    }
}

/// Embedder knobs.
#[derive(Clone, Debug)]
pub struct EmbedCfg {
    pub num_tries: usize,
    /// Decimal places kept when rounding to rationals.
    pub round_digits: u32,
    pub seed: u64,
    pub dt: f64,
    pub phases: Vec<SpringPhase>,
    pub polish_steps: usize,
    /// Exact acceptance threshold on the collision distance².
    pub accept_sq_distance: Rational,
    pub lcp: LcpCfg,
}

impl Default for EmbedCfg {
    fn default() -> Self {
        let mut phases = vec![SpringPhase::new(1.0, 0.5, 3.0)];
        phases.extend([2.0, 1.0, 0.5, 0.25, 0.125].map(|k| SpringPhase::new(k, 0.0, 80.0)));
        Self {
            num_tries: 10,
            round_digits: 5,
            seed: cfg::DEFAULT_SEED,
            dt: 0.1,
            phases,
            polish_steps: 25,
            accept_sq_distance: Rational::new(BigInt::from(1), BigInt::from(100)),
            lcp: LcpCfg::default(),
        }
    }
}

/// Replay token to make attempts reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e37_79b9_7f4a_7c15))))
    }
}

/// Float coordinates after relaxation and polish, keyed by vertex.
pub(crate) fn relax<V: Label>(
    vertices: &[V],
    springs: &[Spring],
    d: usize,
    cfg: &EmbedCfg,
    tok: ReplayToken,
) -> (BTreeMap<V, Vec<f64>>, f64) {
    let mut rng = tok.to_std_rng();
    let mut points: Vec<DVector<f64>> = vertices
        .iter()
        .map(|_| DVector::from_fn(d, |_, _| rng.gen::<f64>()))
        .collect();
    for &phase in &cfg.phases {
        springs::run_phase(&mut points, springs, phase, cfg.dt);
    }
    let residual = polish::polish(&mut points, springs, cfg.polish_steps);
    debug!(
        index = tok.index,
        mean_length_error = springs::mean_length_error(&points, springs),
        residual,
        "relaxed"
    );
    let coords = vertices
        .iter()
        .cloned()
        .zip(points.iter().map(|p| p.iter().copied().collect()))
        .collect();
    (coords, residual)
}

/// Look for a non-self-intersecting realization in `ℝᵈ` with squared edge
/// lengths near `targets`.
///
/// Returns `None` when an edge has no target or every attempt fails.
pub fn heuristic_embed<V: Label>(
    complex: &AbstractComplex<V>,
    d: usize,
    targets: &TargetLengths<V>,
    cfg: &EmbedCfg,
) -> Option<RealizedComplex<V>> {
    let vertices: Vec<V> = complex.vertices().cloned().collect();
    let index: BTreeMap<&V, usize> = vertices.iter().enumerate().map(|(i, v)| (v, i)).collect();
    let mut spring_list = Vec::with_capacity(complex.num_edges());
    for e in complex.edges() {
        match targets.get(&e[0], &e[1]) {
            Ok(sq_len) => spring_list.push(Spring {
                i: index[&e[0]],
                j: index[&e[1]],
                length: to_f64(sq_len).sqrt(),
            }),
            Err(err) => {
                warn!(%err, "cannot embed");
                return None;
            }
        }
    }

    for attempt in 0..cfg.num_tries {
        let tok = ReplayToken {
            seed: cfg.seed,
            index: attempt as u64,
        };
        let (coords, residual) = relax(&vertices, &spring_list, d, cfg, tok);
        let realized = match RealizedComplex::from_f64(complex.clone(), &coords, cfg.round_digits) {
            Ok(r) => r,
            Err(err) => {
                debug!(attempt, %err, "rounding failed");
                continue;
            }
        };
        match realized.collision_distance_squared(&cfg.lcp) {
            Ok(None) => {
                debug!(attempt, residual, "accepted: no collision pairs");
                return Some(realized);
            }
            Ok(Some(cd)) if cd > cfg.accept_sq_distance => {
                debug!(attempt, residual, sq_distance = %cd, "accepted");
                return Some(realized);
            }
            Ok(Some(cd)) => debug!(attempt, residual, sq_distance = %cd, "self-intersecting, retrying"),
            Err(err) => debug!(attempt, %err, "collision distance failed, retrying"),
        }
    }
    warn!(tries = cfg.num_tries, "heuristic embedding failed");
    None
}
