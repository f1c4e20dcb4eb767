//! Curated API surface.
//!
//! Re-exports the types and entry points callers need; module paths stay
//! available for everything else.

// Exact arithmetic
pub use crate::exact::{
    from_f64_truncated, sqrt_interval, to_f64, Interval, NumericError, Rational, Truth,
};
// Linear algebra
pub use crate::linalg::{bound_smallest_singular_value, EigenBound, Matrix, SpectralCfg};
// Solvers
pub use crate::cqp::{solve_cqp, Cqp, CqpSolution};
pub use crate::distance::{simplex_square_distance, SimplexDistance};
pub use crate::lcp::{solve_lcp, LcpCfg, LcpError, LcpSolution, TieBreak};
// Complexes
pub use crate::complex::{
    special, AbstractComplex, ComplexError, Label, RealizedComplex, Simplex, TargetLengths,
};
// Embedding and proof
pub use crate::embed::{heuristic_embed, EmbedCfg, ReplayToken, SpringPhase};
pub use crate::prove::{
    prove_existence, CertificateTrace, Check, FailureReason, Outcome, ProveCfg, TraceEntry, Verdict,
};
