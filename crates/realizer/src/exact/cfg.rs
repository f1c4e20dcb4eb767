//! Precision defaults for exact arithmetic (internal).
//!
//! Policy
//! - Square-root precision is counted in decimal digits after the point.
//!   The prover starts at `SQRT_DIGITS` and doubles on inconclusive
//!   comparisons until `MAX_SQRT_DIGITS`.

/// Starting decimal precision for interval square roots.
pub(crate) const SQRT_DIGITS: u32 = 8;
/// Ceiling for lazy precision doubling.
pub(crate) const MAX_SQRT_DIGITS: u32 = 64;
/// Decimal places shown in the float approximation of `Interval`'s `Display`.
pub(crate) const DISPLAY_DECIMALS: usize = 6;
