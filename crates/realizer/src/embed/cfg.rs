//! Embedder constants (internal).
//!
//! Policy
//! - Spring-only phases stop early once the mean edge-length error is below
//!   `CONVERGED_MEAN_ERROR` or one step improves it by less than a factor
//!   `STALL_RATIO`.
//! - Repulsion uses `repel / (dist² + REPEL_SOFTENING)` so coincident points
//!   stay finite.

pub(crate) const CONVERGED_MEAN_ERROR: f64 = 1e-20;
pub(crate) const STALL_RATIO: f64 = 0.999_999;
pub(crate) const REPEL_SOFTENING: f64 = 0.01;
/// Gauss–Newton stops once the residual norm drops below this.
pub(crate) const POLISH_TOL: f64 = 1e-15;
pub(crate) const DEFAULT_SEED: u64 = 0x5eed;
