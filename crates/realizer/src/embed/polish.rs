//! Gauss–Newton refinement of squared edge lengths.
//!
//! Residual `r_e = ‖x_u − x_v‖² − L_e`. The system is underdetermined
//! (`E ≤ dV`), so each step takes the minimum-norm update
//! `δ = −Jᵀ (J Jᵀ)⁻¹ r`. Steps that fail to shrink `‖r‖` are rejected and end
//! the refinement; a singular `J Jᵀ` ends it silently.

use nalgebra::{DMatrix, DVector};

use super::cfg::POLISH_TOL;
use super::springs::Spring;

fn residual(points: &[DVector<f64>], springs: &[Spring]) -> DVector<f64> {
    DVector::from_iterator(
        springs.len(),
        springs
            .iter()
            .map(|s| (&points[s.i] - &points[s.j]).norm_squared() - s.length * s.length),
    )
}

fn jacobian(points: &[DVector<f64>], springs: &[Spring], d: usize) -> DMatrix<f64> {
    let mut j = DMatrix::zeros(springs.len(), d * points.len());
    for (row, s) in springs.iter().enumerate() {
        let diff = &points[s.i] - &points[s.j];
        for k in 0..d {
            j[(row, d * s.i + k)] = 2.0 * diff[k];
            j[(row, d * s.j + k)] = -2.0 * diff[k];
        }
    }
    j
}

/// Run up to `steps` Gauss–Newton steps in place; returns the final `‖r‖`.
pub(crate) fn polish(points: &mut [DVector<f64>], springs: &[Spring], steps: usize) -> f64 {
    let d = points.first().map_or(0, |p| p.len());
    let mut r = residual(points, springs);
    let mut norm = r.norm();
    for _ in 0..steps {
        if norm < POLISH_TOL || !norm.is_finite() {
            break;
        }
        let j = jacobian(points, springs, d);
        let Some(chol) = (&j * j.transpose()).cholesky() else {
            break;
        };
        let delta = -(j.transpose() * chol.solve(&r));
        let backup: Vec<DVector<f64>> = points.to_vec();
        for (i, p) in points.iter_mut().enumerate() {
            for k in 0..d {
                p[k] += delta[d * i + k];
            }
        }
        let r_new = residual(points, springs);
        let norm_new = r_new.norm();
        if !(norm_new < norm) {
            points.clone_from_slice(&backup);
            break;
        }
        r = r_new;
        norm = norm_new;
    }
    norm
}
