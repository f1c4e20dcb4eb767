//! Certified existence of simplicial-complex realizations with prescribed
//! squared edge lengths.
//!
//! Pipeline: [`embed::heuristic_embed`] proposes a rational realization,
//! [`prove::prove_existence`] certifies (or fails to certify) that an exact,
//! non-self-intersecting realization exists nearby. Everything the certificate
//! depends on is decided in exact rational arithmetic (`exact`); floating point
//! only proposes candidates.
//!
//! API Policy
//! - Prefer the curated surface in [`api`] or the [`prelude`].
//! - Breaking changes are fine when they improve clarity.

pub mod api;
pub mod complex;
pub mod cqp;
pub mod distance;
pub mod embed;
pub mod exact;
pub mod lcp;
pub mod linalg;
pub mod prove;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use exact::Rational;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::complex::{special, AbstractComplex, RealizedComplex, TargetLengths};
    pub use crate::embed::{heuristic_embed, EmbedCfg};
    pub use crate::exact::{Interval, Rational, Truth};
    pub use crate::prove::{prove_existence, Check, ProveCfg, Verdict};
}
