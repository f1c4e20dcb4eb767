//! Exact arithmetic: rationals, rational intervals, and rigorous square roots.
//!
//! Purpose
//! - Every inequality of an existence certificate is decided here, so nothing
//!   in this module touches floating point except the explicit conversions in
//!   `convert`.
//! - Square roots are never forced to rationals; they come back as intervals
//!   whose endpoints lie on a decimal grid chosen by the caller.
//!
//! Conventions
//! - `Rational` is `num_rational::BigRational` (always gcd-reduced, positive
//!   denominator), re-exported under the name used throughout the crate.
//! - `Interval` endpoints satisfy `lo <= hi`; comparisons between intervals are
//!   three-valued (`Truth`), and callers treat `Unknown` as failure.
//! - Raising the decimal precision of `sqrt_interval` yields nested intervals,
//!   so anything proven at a coarse precision stays proven at a finer one.
//!
//! Code cross-refs: `linalg::bound_smallest_singular_value`, `prove`.

pub(crate) mod cfg;
mod convert;
mod interval;
mod sqrt;

pub use convert::{check_bits, from_f64_truncated, powi, to_f64};
pub use interval::{Interval, Truth};
pub use num_rational::BigRational as Rational;
pub use sqrt::{exact_sqrt, sqrt_interval};

use std::fmt;

/// Failures of exact arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumericError {
    /// An interval containing zero reached a divisor position.
    DivisionByZeroInterval,
    /// A quantity that should be non-negative evaluated below zero.
    SquareRootOfNegative,
    /// A numerator or denominator outgrew the configured bit ceiling.
    NumericOverflow { bits: u64, limit: u64 },
    /// NaN or infinity handed to a float → rational conversion.
    NonFinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZeroInterval => write!(f, "division by an interval containing 0"),
            Self::SquareRootOfNegative => write!(f, "square root of a negative quantity"),
            Self::NumericOverflow { bits, limit } => {
                write!(f, "numeric overflow: {bits} bits exceeds the {limit}-bit ceiling")
            }
            Self::NonFinite => write!(f, "non-finite float cannot be rationalized"),
        }
    }
}

impl std::error::Error for NumericError {}
