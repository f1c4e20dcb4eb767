//! Lemke's complementary pivoting method.

use num_bigint::BigUint;
use num_traits::{Signed, ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::tableau::{Tableau, Var};
use super::types::{LcpCfg, LcpError, LcpSolution, TieBreak};
use crate::exact::{check_bits, NumericError, Rational};
use crate::linalg::Matrix;

/// `C(2n, n+1)`, saturating at `u64::MAX`.
pub(crate) fn cycle_bound(n: usize) -> u64 {
    let c: BigUint = num_integer::binomial(BigUint::from(2 * n), BigUint::from(n + 1));
    c.to_u64().unwrap_or(u64::MAX)
}

fn pick(rows: &[usize], rng: &mut Option<StdRng>) -> usize {
    match rng {
        Some(rng) if rows.len() > 1 => rows[rng.gen_range(0..rows.len())],
        _ => rows[0],
    }
}

fn check_tableau_bits(t: &Tableau, limit: Option<u64>) -> Result<(), LcpError> {
    let Some(limit) = limit else {
        return Ok(());
    };
    for row in 0..t.len() {
        check_bits(t.constant(row), limit).map_err(|e| match e {
            NumericError::NumericOverflow { bits, limit } => LcpError::NumericOverflow { bits, limit },
            _ => LcpError::NumericOverflow { bits: 0, limit },
        })?;
    }
    Ok(())
}

fn finish(t: &Tableau, pivots: u64) -> LcpSolution {
    let (w, z) = t.solution();
    trace!(pivots, "lcp solved");
    LcpSolution { w, z, pivots }
}

/// Solve `w = q + Mz`, `w, z ≥ 0`, `wᵀz = 0` over exact rationals.
///
/// Returns `w = q, z = 0` without pivoting when `q ≥ 0`. Otherwise runs
/// Lemke's method with covering vector `1`; see [`LcpCfg`] for tie-breaking,
/// degenerate termination and ceilings.
pub fn solve_lcp(
    q: &[Rational],
    m: &Matrix<Rational>,
    cfg: &LcpCfg,
) -> Result<LcpSolution, LcpError> {
    let n = q.len();
    if m.nrows() != n || m.ncols() != n {
        return Err(LcpError::DimensionMismatch {
            q: n,
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    if q.iter().all(|x| !x.is_negative()) {
        let z = vec![Rational::zero(); n];
        return Ok(LcpSolution {
            w: q.to_vec(),
            z,
            pivots: 0,
        });
    }

    let mut rng = match cfg.tie_break {
        TieBreak::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        TieBreak::FirstRow => None,
    };
    let ceiling = cfg.max_pivots.unwrap_or_else(|| cycle_bound(n));
    let mut t = Tableau::new(q, m);

    // Initial pivot: the cover replaces the row with the most negative constant.
    let min_const = (0..n).map(|r| t.constant(r)).min().cloned();
    let candidates: Vec<usize> = (0..n)
        .filter(|&r| Some(t.constant(r)) == min_const.as_ref())
        .collect();
    let row = pick(&candidates, &mut rng);
    let leaving = t.pivot(row, Var::Cover);
    trace!(entering = %Var::Cover, %leaving, "initial pivot");
    check_tableau_bits(&t, cfg.max_bits)?;
    let mut pivots: u64 = 1;
    let mut entering = leaving.complement();

    while let Some(y) = entering {
        // Ratio test over rows where `y` has a negative coefficient.
        let mut best: Option<Rational> = None;
        let mut ties: Vec<usize> = Vec::new();
        for r in 0..t.len() {
            let coeff = t.coeff(r, y);
            if !coeff.is_negative() {
                continue;
            }
            let ratio = -(t.constant(r) / coeff);
            if best.as_ref().map_or(true, |b| ratio < *b) {
                best = Some(ratio);
                ties = vec![r];
            } else if best.as_ref() == Some(&ratio) {
                ties.push(r);
            }
        }

        if ties.is_empty() {
            // Ray. Still a solution when the cover already sits at zero.
            let degenerate = t
                .row_of(Var::Cover)
                .is_some_and(|r| t.constant(r).is_zero());
            if degenerate && cfg.accept_degenerate {
                trace!(pivots, "degenerate termination accepted");
                return Ok(finish(&t, pivots));
            }
            return Err(LcpError::Infeasible);
        }

        let row = pick(&ties, &mut rng);
        let leaving = t.pivot(row, y);
        pivots += 1;
        trace!(entering = %y, %leaving, pivots, "pivot");
        check_tableau_bits(&t, cfg.max_bits)?;
        if leaving == Var::Cover {
            return Ok(finish(&t, pivots));
        }
        if pivots - 1 > ceiling {
            return Err(LcpError::Cycling { pivots });
        }
        entering = leaving.complement();
    }
    Ok(finish(&t, pivots))
}

