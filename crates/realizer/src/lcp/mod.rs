//! Linear complementarity problems over exact rationals.
//!
//! Purpose
//! - Solve `w = q + Mz`, `w, z ≥ 0`, `wᵀz = 0` exactly; this is the engine
//!   behind the convex QP front end and hence every simplex distance.
//!
//! Why this design (short)
//! - A dictionary tableau with typed variables (`w_i`, `z_i`, `z*`) keeps the
//!   pivot rule readable and makes the tableau printable for debugging.
//! - Tie-breaking is explicit and seeded, so runs are reproducible.
//! - Termination with the cover basic at value zero is accepted by default:
//!   the current basis is then a complementary solution. Callers feeding
//!   PSD-derived problems (which always have a solution) rely on this.
//!
//! Code cross-refs: `crate::cqp::solve_cqp`.

mod lemke;
mod tableau;
mod types;

pub use lemke::solve_lcp;
pub use tableau::Var;
pub use types::{LcpCfg, LcpError, LcpSolution, TieBreak};

#[cfg(test)]
mod tests;
