//! Closed rational intervals with outward-exact arithmetic.
//!
//! Invariants
//! - `lo <= hi` always; constructors assert it.
//! - Arithmetic is exact on endpoints, so results are the true interval
//!   extensions of `+ − ×`; no outward rounding is needed.
//! - Comparisons return `Truth`: `True` only when the relation holds for every
//!   pair of points, `False` only when it fails for every pair.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Signed, Zero};

use super::cfg::DISPLAY_DECIMALS;
use super::convert::to_f64;
use super::sqrt::sqrt_interval;
use super::{NumericError, Rational};

/// Three-valued outcome of an interval comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    #[inline]
    pub fn is_true(self) -> bool {
        self == Truth::True
    }

    /// Kleene conjunction.
    pub fn and(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::False, _) | (_, Truth::False) => Truth::False,
            (Truth::True, Truth::True) => Truth::True,
            _ => Truth::Unknown,
        }
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Truth::True => "holds",
            Truth::False => "fails",
            Truth::Unknown => "inconclusive",
        };
        f.write_str(s)
    }
}

/// Closed interval `[lo, hi]` of rationals.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    lo: Rational,
    hi: Rational,
}

impl Interval {
    /// Panics if `lo > hi`.
    pub fn new(lo: Rational, hi: Rational) -> Self {
        assert!(lo <= hi, "interval endpoints out of order: [{lo}, {hi}]");
        Self { lo, hi }
    }

    #[inline]
    pub fn point(x: Rational) -> Self {
        Self {
            lo: x.clone(),
            hi: x,
        }
    }

    #[inline]
    pub fn from_integer(n: i64) -> Self {
        Self::point(Rational::from_integer(n.into()))
    }

    #[inline]
    pub fn lo(&self) -> &Rational {
        &self.lo
    }

    #[inline]
    pub fn hi(&self) -> &Rational {
        &self.hi
    }

    #[inline]
    pub fn width(&self) -> Rational {
        &self.hi - &self.lo
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    #[inline]
    pub fn contains(&self, x: &Rational) -> bool {
        &self.lo <= x && x <= &self.hi
    }

    #[inline]
    pub fn contains_zero(&self) -> bool {
        !self.lo.is_positive() && !self.hi.is_negative()
    }

    /// Largest absolute value attained, `max(|lo|, |hi|)`.
    pub fn mag(&self) -> Rational {
        let a = self.lo.abs();
        let b = self.hi.abs();
        if a > b {
            a
        } else {
            b
        }
    }

    /// `[1/hi, 1/lo]`; fails when the interval touches zero.
    pub fn recip(&self) -> Result<Interval, NumericError> {
        if self.contains_zero() {
            return Err(NumericError::DivisionByZeroInterval);
        }
        Ok(Interval::new(self.hi.recip(), self.lo.recip()))
    }

    pub fn checked_div(&self, rhs: &Interval) -> Result<Interval, NumericError> {
        Ok(self * &rhs.recip()?)
    }

    /// Non-negative integer power. Even powers of an interval straddling zero
    /// start at zero.
    pub fn powi(&self, n: u32) -> Interval {
        if n == 0 {
            return Interval::point(Rational::one());
        }
        let p_lo = pow_u32(&self.lo, n);
        let p_hi = pow_u32(&self.hi, n);
        if n % 2 == 1 || !self.lo.is_negative() {
            Interval::new(p_lo, p_hi)
        } else if !self.hi.is_positive() {
            Interval::new(p_hi, p_lo)
        } else {
            let top = if p_lo > p_hi { p_lo } else { p_hi };
            Interval::new(Rational::zero(), top)
        }
    }

    /// Monotone square root at `digits` decimal places.
    pub fn sqrt(&self, digits: u32) -> Result<Interval, NumericError> {
        if self.lo.is_negative() {
            return Err(NumericError::SquareRootOfNegative);
        }
        let lo = sqrt_interval(&self.lo, digits)?;
        let hi = sqrt_interval(&self.hi, digits)?;
        Ok(Interval::new(lo.lo, hi.hi))
    }

    /// `self < rhs`.
    pub fn lt(&self, rhs: &Interval) -> Truth {
        if self.hi < rhs.lo {
            Truth::True
        } else if self.lo >= rhs.hi {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    /// `self > rhs`.
    #[inline]
    pub fn gt(&self, rhs: &Interval) -> Truth {
        rhs.lt(self)
    }

    /// `self <= rhs`.
    pub fn le(&self, rhs: &Interval) -> Truth {
        if self.hi <= rhs.lo {
            Truth::True
        } else if self.lo > rhs.hi {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    /// `self >= rhs`.
    #[inline]
    pub fn ge(&self, rhs: &Interval) -> Truth {
        rhs.le(self)
    }

    /// Three-valued equality of the enclosed quantities.
    pub fn same_as(&self, rhs: &Interval) -> Truth {
        if self.is_point() && self == rhs {
            Truth::True
        } else if self.hi < rhs.lo || rhs.hi < self.lo {
            Truth::False
        } else {
            Truth::Unknown
        }
    }
}

fn pow_u32(r: &Rational, n: u32) -> Rational {
    let mut acc = Rational::one();
    for _ in 0..n {
        acc *= r;
    }
    acc
}

impl From<Rational> for Interval {
    fn from(x: Rational) -> Self {
        Interval::point(x)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] ~ [{:.prec$}, {:.prec$}]",
            self.lo,
            self.hi,
            to_f64(&self.lo),
            to_f64(&self.hi),
            prec = DISPLAY_DECIMALS
        )
    }
}

impl Add for &Interval {
    type Output = Interval;
    fn add(self, rhs: &Interval) -> Interval {
        Interval {
            lo: &self.lo + &rhs.lo,
            hi: &self.hi + &rhs.hi,
        }
    }
}

impl Add for Interval {
    type Output = Interval;
    #[inline]
    fn add(self, rhs: Interval) -> Interval {
        &self + &rhs
    }
}

impl Sub for &Interval {
    type Output = Interval;
    fn sub(self, rhs: &Interval) -> Interval {
        Interval {
            lo: &self.lo - &rhs.hi,
            hi: &self.hi - &rhs.lo,
        }
    }
}

impl Sub for Interval {
    type Output = Interval;
    #[inline]
    fn sub(self, rhs: Interval) -> Interval {
        &self - &rhs
    }
}

impl Mul for &Interval {
    type Output = Interval;
    fn mul(self, rhs: &Interval) -> Interval {
        let products = [
            &self.lo * &rhs.lo,
            &self.lo * &rhs.hi,
            &self.hi * &rhs.lo,
            &self.hi * &rhs.hi,
        ];
        let mut lo = products[0].clone();
        let mut hi = products[0].clone();
        for p in &products[1..] {
            if *p < lo {
                lo = p.clone();
            }
            if *p > hi {
                hi = p.clone();
            }
        }
        Interval { lo, hi }
    }
}

impl Mul for Interval {
    type Output = Interval;
    #[inline]
    fn mul(self, rhs: Interval) -> Interval {
        &self * &rhs
    }
}

impl Neg for &Interval {
    type Output = Interval;
    fn neg(self) -> Interval {
        Interval {
            lo: -&self.hi,
            hi: -&self.lo,
        }
    }
}

impl Neg for Interval {
    type Output = Interval;
    #[inline]
    fn neg(self) -> Interval {
        -&self
    }
}

impl Zero for Interval {
    fn zero() -> Self {
        Interval::point(Rational::zero())
    }

    fn is_zero(&self) -> bool {
        self.lo.is_zero() && self.hi.is_zero()
    }
}
