//! Rigorous square roots of rationals.
//!
//! `sqrt_interval(r, d)` returns the tightest enclosure of `√r` on the
//! `10⁻ᵈ` grid: `[⌊√r·10ᵈ⌋/10ᵈ, ⌈√r·10ᵈ⌉/10ᵈ]`. The floor is an integer square
//! root (Newton iteration inside `num-bigint`) of `⌊r·10²ᵈ⌋`, which is exact
//! because `⌊√⌊x⌋⌋ = ⌊√x⌋` for `x ≥ 0`.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::convert::pow10;
use super::{Interval, NumericError, Rational};

/// Enclose `√r` with endpoints on the `10^-digits` grid.
///
/// Perfect squares of rationals collapse to a point interval regardless of
/// `digits`.
pub fn sqrt_interval(r: &Rational, digits: u32) -> Result<Interval, NumericError> {
    if r.is_negative() {
        return Err(NumericError::SquareRootOfNegative);
    }
    if let Some(root) = exact_sqrt(r) {
        return Ok(Interval::point(root));
    }
    let scale = pow10(digits);
    let scaled = (r * Rational::from_integer(&scale * &scale))
        .floor()
        .to_integer();
    let lo = scaled.sqrt();
    let hi = &lo + BigInt::from(1u32);
    Ok(Interval::new(
        Rational::new(lo, scale.clone()),
        Rational::new(hi, scale),
    ))
}

/// `Some(√r)` when `r` is the square of a rational.
pub fn exact_sqrt(r: &Rational) -> Option<Rational> {
    if r.is_negative() {
        return None;
    }
    if r.is_zero() {
        return Some(Rational::zero());
    }
    // In lowest terms, √(n/d) is rational iff n and d are both perfect squares.
    let n = r.numer().sqrt();
    if &n * &n != *r.numer() {
        return None;
    }
    let d = r.denom().sqrt();
    if &d * &d != *r.denom() {
        return None;
    }
    Some(Rational::new(n, d))
}
