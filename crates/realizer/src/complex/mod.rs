//! Abstract and realized simplicial complexes.
//!
//! Purpose
//! - Describe the combinatorics (which vertex sets span faces) independently
//!   of any coordinates, then attach exact coordinates for the prover.
//!
//! Why this design (short)
//! - Two storage modes: a list of maximal simplices (every subset is a face)
//!   or cyclic neighbour lists of a closed 2-manifold. Face lists are derived
//!   once and cached per complex.
//! - Collision candidates are the componentwise-maximal disjoint face pairs;
//!   the full list of non-adjacent pairs stays available for cross-checks.
//! - Labels are generic (`Label`); fixtures use `&'static str`, the CLI uses
//!   `String`.
//!
//! Code cross-refs: `crate::distance`, `crate::embed`, `crate::prove`.

mod faces;
mod lengths;
mod realized;
pub mod special;
mod types;

pub use lengths::TargetLengths;
pub use realized::RealizedComplex;
pub use types::{AbstractComplex, CollisionPair, ComplexError, Label, Simplex, Storage};

#[cfg(test)]
mod tests;
