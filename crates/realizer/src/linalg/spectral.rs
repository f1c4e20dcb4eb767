//! Certified spectral bounds for symmetric rational matrices.
//!
//! A lower bound `t` on `λ_min(M)` is certified by showing that `M − tI` is
//! positive definite with exact symmetric elimination. Floating-point eigen
//! solves only propose `t`; they never decide anything.

use nalgebra::SymmetricEigen;
use num_traits::{One, Signed, Zero};
use tracing::trace;

use super::Matrix;
use crate::exact::{from_f64_truncated, sqrt_interval, to_f64, Interval, NumericError, Rational};

/// Budget for the smallest-eigenvalue search.
#[derive(Clone, Copy, Debug)]
pub struct SpectralCfg {
    /// Candidates `λ̃·(1 − 10⁻ᵏ)` are tried for `k = max_shrink_exponent, …, 1`.
    pub max_shrink_exponent: u32,
    /// Decimal places kept when a float candidate is rationalized.
    pub candidate_digits: u32,
    /// Halvings of the exact bisection fallback.
    pub bisection_steps: u32,
}

impl Default for SpectralCfg {
    fn default() -> Self {
        Self {
            max_shrink_exponent: 8,
            candidate_digits: 12,
            bisection_steps: 48,
        }
    }
}

/// How the lower end of an [`EigenBound`] was certified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundMethod {
    /// Shrunk floating-point eigenvalue, certified by exact elimination.
    Proposal,
    /// Gershgorin discs.
    Gershgorin,
    /// Exact bisection with the positive-definiteness test.
    Bisection,
    /// Nothing positive could be certified; `lower` is zero.
    None,
}

/// `lower ≤ λ_min(M) ≤ upper`, both exact.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenBound {
    pub lower: Rational,
    pub upper: Rational,
    pub method: BoundMethod,
}

/// Exact positive-definiteness test by symmetric Gaussian elimination.
///
/// For a symmetric matrix, elimination without pivoting succeeds with all
/// pivots strictly positive iff the matrix is positive definite (the pivots
/// are ratios of consecutive leading principal minors).
pub fn is_positive_definite(m: &Matrix<Rational>) -> bool {
    assert!(m.is_square(), "positive-definiteness needs a square matrix");
    let n = m.nrows();
    let mut a: Vec<Vec<Rational>> = (0..n).map(|i| m.row(i).to_vec()).collect();
    for k in 0..n {
        if !a[k][k].is_positive() {
            return false;
        }
        let pivot = a[k][k].clone();
        for i in k + 1..n {
            if a[i][k].is_zero() {
                continue;
            }
            let factor = &a[i][k] / &pivot;
            for j in k + 1..n {
                let delta = &factor * &a[k][j];
                a[i][j] -= delta;
            }
        }
    }
    true
}

/// Gershgorin lower bound `min_i (a_ii − Σ_{j≠i} |a_ij|)`; may be negative.
pub fn gershgorin_lower_bound(m: &Matrix<Rational>) -> Rational {
    assert!(m.is_square(), "Gershgorin bound needs a square matrix");
    (0..m.nrows())
        .map(|i| {
            let radius = m
                .row(i)
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Rational::zero(), |acc, (_, x)| acc + x.abs());
            m.get(i, i) - radius
        })
        .min()
        .unwrap_or_else(Rational::zero)
}

fn shifted(m: &Matrix<Rational>, t: &Rational) -> Matrix<Rational> {
    Matrix::from_fn(m.nrows(), m.ncols(), |i, j| {
        if i == j {
            m.get(i, j) - t
        } else {
            m.get(i, j).clone()
        }
    })
}

fn certifies(m: &Matrix<Rational>, t: &Rational) -> bool {
    t.is_positive() && is_positive_definite(&shifted(m, t))
}

fn rayleigh_quotient(m: &Matrix<Rational>, v: &[Rational]) -> Option<Rational> {
    let norm: Rational = v.iter().fold(Rational::zero(), |acc, x| acc + x * x);
    if norm.is_zero() {
        return None;
    }
    let mv = m.mul_vec(v);
    let num = mv
        .iter()
        .zip(v)
        .fold(Rational::zero(), |acc, (a, b)| acc + a * b);
    Some(num / norm)
}

/// Certified enclosure of the smallest eigenvalue of a symmetric PSD matrix.
pub fn bound_smallest_eigenvalue(m: &Matrix<Rational>, cfg: &SpectralCfg) -> EigenBound {
    assert!(m.is_square(), "eigenvalue bound needs a square matrix");
    let n = m.nrows();
    let min_diag = m
        .diagonal()
        .into_iter()
        .min()
        .unwrap_or_else(Rational::zero);
    if n == 0 {
        return EigenBound {
            lower: Rational::zero(),
            upper: Rational::zero(),
            method: BoundMethod::None,
        };
    }

    // Numerical proposal: smallest eigenpair of the float copy.
    let mf = m.to_f64();
    let proposal = if mf.iter().all(|x| x.is_finite()) {
        let eig = SymmetricEigen::new(mf);
        eig.eigenvalues
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, &lambda)| (lambda, eig.eigenvectors.column(idx).iter().copied().collect::<Vec<f64>>()))
    } else {
        None
    };

    let upper = proposal
        .as_ref()
        .and_then(|(_, vec)| {
            let v: Vec<Rational> = vec
                .iter()
                .map(|&x| from_f64_truncated(x, cfg.candidate_digits))
                .collect::<Result<_, NumericError>>()
                .ok()?;
            rayleigh_quotient(m, &v)
        })
        .map_or_else(|| min_diag.clone(), |rq| rq.min(min_diag.clone()));

    if let Some((lambda, _)) = &proposal {
        if *lambda > 0.0 {
            for k in (1..=cfg.max_shrink_exponent).rev() {
                let t_f = lambda * (1.0 - 10f64.powi(-(k as i32)));
                let Ok(t) = from_f64_truncated(t_f, cfg.candidate_digits) else {
                    break;
                };
                if certifies(m, &t) {
                    trace!(k, lower = %t, "eigenvalue lower bound from proposal");
                    return EigenBound {
                        lower: t,
                        upper,
                        method: BoundMethod::Proposal,
                    };
                }
            }
        }
    }

    let gersh = gershgorin_lower_bound(m);
    if gersh.is_positive() {
        return EigenBound {
            lower: gersh,
            upper,
            method: BoundMethod::Gershgorin,
        };
    }

    // Bisection on [0, upper]; `lo` is always certified (or zero).
    let two = Rational::one() + Rational::one();
    let mut lo = Rational::zero();
    let mut hi = upper.clone();
    for _ in 0..cfg.bisection_steps {
        if !hi.is_positive() {
            break;
        }
        let mid = (&lo + &hi) / &two;
        if certifies(m, &mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let method = if lo.is_positive() {
        BoundMethod::Bisection
    } else {
        BoundMethod::None
    };
    trace!(?method, lower = %lo, "eigenvalue lower bound from fallback");
    EigenBound {
        lower: lo,
        upper,
        method,
    }
}

/// Certified enclosure of `σ_min(J)` at `digits` decimal places.
///
/// Works on the tall orientation of `J`, so for a wide Jacobian the relevant
/// Gram matrix is `J Jᵀ`. A lower end of zero means no positive bound was
/// certified.
pub fn bound_smallest_singular_value(
    j: &Matrix<Rational>,
    cfg: &SpectralCfg,
    digits: u32,
) -> Result<(Interval, EigenBound), NumericError> {
    let gram = if j.nrows() < j.ncols() {
        j.transpose().gram()
    } else {
        j.gram()
    };
    let bound = bound_smallest_eigenvalue(&gram, cfg);
    let lo = sqrt_interval(&bound.lower, digits)?;
    let hi = sqrt_interval(&bound.upper, digits)?;
    trace!(
        lower = to_f64(lo.lo()),
        upper = to_f64(hi.hi()),
        "smallest singular value"
    );
    Ok((Interval::new(lo.lo().clone(), hi.hi().clone()), bound))
}
