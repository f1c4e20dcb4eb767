//! Conversions between floats and rationals, plus size checks.

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{NumericError, Rational};

/// Rational whose decimal expansion is `x` truncated after `digits` places.
///
/// `x` is read through its shortest round-trip decimal representation, so
/// `0.3` becomes `3/10` rather than the binary value just below it. Truncation
/// is toward zero; everything after the cut is exact.
pub fn from_f64_truncated(x: f64, digits: u32) -> Result<Rational, NumericError> {
    if !x.is_finite() {
        return Err(NumericError::NonFinite);
    }
    // `{:e}` prints the shortest mantissa that round-trips, e.g. `-1.25e-3`.
    let repr = format!("{x:e}");
    let (mantissa, exponent) = repr.split_once('e').ok_or(NumericError::NonFinite)?;
    let exponent: i64 = exponent.parse().map_err(|_| NumericError::NonFinite)?;
    let negative = mantissa.starts_with('-');
    let mantissa = mantissa.trim_start_matches('-');
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = format!("{int_part}{frac_part}");
    let m = BigInt::parse_bytes(all_digits.as_bytes(), 10).ok_or(NumericError::NonFinite)?;

    // |x| = m · 10^(exponent − frac_len); we want ⌊|x| · 10^digits⌋.
    let shift = exponent - frac_part.len() as i64 + i64::from(digits);
    let scaled = if shift >= 0 {
        m * pow10(shift as u32)
    } else {
        m / pow10(shift.unsigned_abs() as u32)
    };
    let out = Rational::new(scaled, pow10(digits));
    Ok(if negative { -out } else { out })
}

/// Nearest `f64` (saturating to ±inf for huge values).
pub fn to_f64(r: &Rational) -> f64 {
    r.to_f64().unwrap_or_else(|| {
        if r.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

/// Integer power, negative exponents through the reciprocal.
pub fn powi(r: &Rational, n: i32) -> Result<Rational, NumericError> {
    if n < 0 && r.is_zero() {
        return Err(NumericError::DivisionByZeroInterval);
    }
    let mut base = if n < 0 { r.recip() } else { r.clone() };
    let mut e = n.unsigned_abs();
    let mut acc = Rational::one();
    while e > 0 {
        if e & 1 == 1 {
            acc *= &base;
        }
        base = &base * &base;
        e >>= 1;
    }
    Ok(acc)
}

/// Fail with `NumericOverflow` once numerator or denominator exceeds `limit` bits.
pub fn check_bits(r: &Rational, limit: u64) -> Result<(), NumericError> {
    let bits = r.numer().bits().max(r.denom().bits());
    if bits > limit {
        Err(NumericError::NumericOverflow { bits, limit })
    } else {
        Ok(())
    }
}

pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10u32).pow(n)
}
