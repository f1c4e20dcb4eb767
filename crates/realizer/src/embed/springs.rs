//! Force-directed relaxation in floating point.

use nalgebra::DVector;

use super::cfg::{CONVERGED_MEAN_ERROR, REPEL_SOFTENING, STALL_RATIO};
use super::SpringPhase;

/// Edge `(i, j)` with target (unsquared) length.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Spring {
    pub i: usize,
    pub j: usize,
    pub length: f64,
}

/// Mean absolute edge-length error.
pub(crate) fn mean_length_error(points: &[DVector<f64>], springs: &[Spring]) -> f64 {
    if springs.is_empty() {
        return 0.0;
    }
    let total: f64 = springs
        .iter()
        .map(|s| ((&points[s.i] - &points[s.j]).norm() - s.length).abs())
        .sum();
    total / springs.len() as f64
}

/// Integrate one phase with explicit Euler steps of size `dt`.
///
/// Springs move both endpoints by `spring·(dist − L)·diff·dt` toward the
/// target length; repulsion pushes every vertex pair apart. A spring-only
/// phase returns early when the length error converges or stalls.
pub(crate) fn run_phase(points: &mut [DVector<f64>], springs: &[Spring], phase: SpringPhase, dt: f64) {
    let mut t = 0.0;
    let mut last_error: Option<f64> = None;
    while t < phase.duration {
        if phase.spring != 0.0 && !springs.is_empty() {
            let mut total = 0.0;
            for s in springs {
                let diff = &points[s.i] - &points[s.j];
                let dist = diff.norm();
                total += (dist - s.length).abs();
                let step = diff * (phase.spring * (dist - s.length) * dt);
                points[s.i] -= &step;
                points[s.j] += &step;
            }
            let error = total / springs.len() as f64;
            let settled = error < CONVERGED_MEAN_ERROR
                || last_error.is_some_and(|prev| error / prev > STALL_RATIO);
            if settled && phase.repel == 0.0 {
                return;
            }
            last_error = Some(error);
        }
        if phase.repel != 0.0 {
            for i in 0..points.len() {
                for j in i + 1..points.len() {
                    let diff = &points[i] - &points[j];
                    let scale = phase.repel / (diff.norm_squared() + REPEL_SOFTENING) * dt;
                    let step = diff * scale;
                    points[i] += &step;
                    points[j] -= &step;
                }
            }
        }
        t += dt;
    }
}
