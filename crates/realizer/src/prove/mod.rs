//! Existence prover: five sufficient inequalities decided in exact arithmetic.
//!
//! Purpose
//! - Given a rational realization `R` of a complex in `ℝᵈ` and target squared
//!   edge lengths `L`, decide whether the quantitative inverse-function
//!   argument certifies a nearby non-self-intersecting realization with
//!   exactly the lengths `L`.
//!
//! Checks (all must be definitely true, in order)
//! 1. `d·V ≥ E`
//! 2. `CD² > 0`
//! 3. `σ_min > 0`
//! 4. `ρ < σ_min² / (16√E)`
//! 5. `(σ_min − √(σ_min² − 16ρ√E)) / (8√E) < CD / √V`
//!
//! Why this design (short)
//! - Square roots stay intervals. An `Unknown` comparison doubles the decimal
//!   precision (up to `max_sqrt_digits`) and re-evaluates; the precision never
//!   drops between checks, so earlier verdicts stay valid.
//! - Checks 4 and 5 are monotone in `σ_min`, so they are evaluated at
//!   `σ = √λ_lower` with `σ² = λ_lower` exact; rounding of the remaining
//!   roots shows up as `Unknown` and raises the precision.
//! - Check 3 stops at once when no positive eigenvalue bound was certified.
//! - A complex without disjoint faces passes checks 2 and 5 vacuously; one
//!   without edges needs only checks 1 and 2.
//! - Failures are data: the prover never returns `Err`.
//!
//! Code cross-refs: `crate::complex::RealizedComplex`,
//! `crate::linalg::bound_smallest_singular_value`, `crate::exact::Interval`.

mod certificate;

pub use certificate::{CertificateTrace, Check, TraceEntry};

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::{debug, info};

use crate::complex::{ComplexError, Label, RealizedComplex, TargetLengths};
use crate::exact::cfg::{MAX_SQRT_DIGITS, SQRT_DIGITS};
use crate::exact::{check_bits, sqrt_interval, Interval, NumericError, Rational, Truth};
use crate::lcp::{LcpCfg, LcpError};
use crate::linalg::{bound_smallest_singular_value, BoundMethod, SpectralCfg};

/// Prover knobs.
#[derive(Clone, Copy, Debug)]
pub struct ProveCfg {
    /// Keep the certificate transcript in the verdict.
    pub verbose: bool,
    /// Starting decimal precision of interval square roots.
    pub sqrt_digits: u32,
    pub max_sqrt_digits: u32,
    pub lcp: LcpCfg,
    pub spectral: SpectralCfg,
    /// Bit ceiling on `CD²`, `ρ²` and the eigenvalue bound.
    pub max_bits: Option<u64>,
}

impl Default for ProveCfg {
    fn default() -> Self {
        Self {
            verbose: false,
            sqrt_digits: SQRT_DIGITS,
            max_sqrt_digits: MAX_SQRT_DIGITS,
            lcp: LcpCfg::default(),
            spectral: SpectralCfg::default(),
            max_bits: None,
        }
    }
}

/// Why a check did not come out definitely true.
#[derive(Clone, Debug, PartialEq)]
pub enum FailureReason {
    /// The inequality is definitely false.
    Fails,
    /// Still undecided at the precision ceiling.
    Unresolved { digits: u32 },
    NumericOverflow { bits: u64, limit: u64 },
    /// A divisor interval straddled zero.
    DivisionByZero,
    /// An LCP behind the collision distance did not terminate normally.
    SimplexDistance(LcpError),
    MissingTargetLength(ComplexError),
    Numeric(NumericError),
    /// No positive lower bound on `λ_min(JᵀJ)` could be certified.
    NotProvablyPositive,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fails => write!(f, "inequality fails"),
            Self::Unresolved { digits } => write!(f, "undecided at {digits} digits"),
            Self::NumericOverflow { bits, limit } => {
                write!(f, "numeric overflow ({bits} bits > {limit})")
            }
            Self::DivisionByZero => write!(f, "division by an interval containing 0"),
            Self::SimplexDistance(e) => write!(f, "simplex distance unresolved ({e})"),
            Self::MissingTargetLength(e) => write!(f, "missing target length ({e})"),
            Self::Numeric(e) => write!(f, "numeric failure ({e})"),
            Self::NotProvablyPositive => write!(f, "smallest singular value not provably positive"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Proven,
    Inconclusive { check: Check, reason: FailureReason },
}

/// Result of [`prove_existence`].
#[derive(Clone, Debug)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Present iff `ProveCfg::verbose`; covers every step up to the failing one.
    pub trace: Option<CertificateTrace>,
}

impl Verdict {
    pub fn is_proven(&self) -> bool {
        self.outcome == Outcome::Proven
    }

    pub fn failed_check(&self) -> Option<Check> {
        match &self.outcome {
            Outcome::Proven => None,
            Outcome::Inconclusive { check, .. } => Some(*check),
        }
    }

    /// One-line summary.
    pub fn reason(&self) -> String {
        match &self.outcome {
            Outcome::Proven => "proven: all inequalities hold".to_string(),
            Outcome::Inconclusive { check, reason } => {
                format!("inconclusive: {check}: {reason} [{}]", check.inequality())
            }
        }
    }
}

type Failure = (Check, FailureReason);

#[derive(Clone, Copy)]
enum Rel {
    Lt,
    Gt,
    Ge,
}

impl Rel {
    fn symbol(self) -> &'static str {
        match self {
            Rel::Lt => "<",
            Rel::Gt => ">",
            Rel::Ge => "≥",
        }
    }

    fn eval(self, lhs: &Interval, rhs: &Interval) -> Truth {
        match self {
            Rel::Lt => lhs.lt(rhs),
            Rel::Gt => lhs.gt(rhs),
            Rel::Ge => lhs.ge(rhs),
        }
    }
}

fn numeric_reason(err: NumericError) -> FailureReason {
    match err {
        NumericError::NumericOverflow { bits, limit } => FailureReason::NumericOverflow { bits, limit },
        NumericError::DivisionByZeroInterval => FailureReason::DivisionByZero,
        other => FailureReason::Numeric(other),
    }
}

fn lcp_reason(err: LcpError) -> FailureReason {
    match err {
        LcpError::NumericOverflow { bits, limit } => FailureReason::NumericOverflow { bits, limit },
        other => FailureReason::SimplexDistance(other),
    }
}

fn int(n: usize) -> Rational {
    Rational::from_integer(BigInt::from(n))
}

struct Prover<'a> {
    cfg: &'a ProveCfg,
    digits: u32,
    trace: CertificateTrace,
}

impl Prover<'_> {
    fn bits(&self, check: Check, r: &Rational) -> Result<(), Failure> {
        match self.cfg.max_bits {
            Some(limit) => check_bits(r, limit).map_err(|e| (check, numeric_reason(e))),
            None => Ok(()),
        }
    }

    /// Evaluate `lhs rel rhs`, doubling the precision while `Unknown`.
    fn decide(
        &mut self,
        check: Check,
        rel: Rel,
        eval: impl Fn(u32) -> Result<(Interval, Interval), NumericError>,
    ) -> Result<(), Failure> {
        let max = self.cfg.max_sqrt_digits.max(self.digits);
        loop {
            let (lhs, rhs) = match eval(self.digits) {
                Ok(sides) => sides,
                // The radicand of check 5 is negative only when check 4 is violated.
                Err(NumericError::SquareRootOfNegative) if check == Check::CollisionPreservation => {
                    return Err((Check::LengthError, FailureReason::Fails));
                }
                Err(e) => return Err((check, numeric_reason(e))),
            };
            let outcome = rel.eval(&lhs, &rhs);
            debug!(check = check.number(), digits = self.digits, %outcome, "prover check");
            if outcome != Truth::Unknown || self.digits >= max {
                self.trace.entries.push(TraceEntry {
                    check,
                    lhs,
                    relation: rel.symbol(),
                    rhs,
                    outcome,
                    digits: self.digits,
                });
            }
            match outcome {
                Truth::True => return Ok(()),
                Truth::False => return Err((check, FailureReason::Fails)),
                Truth::Unknown if self.digits >= max => {
                    return Err((check, FailureReason::Unresolved { digits: self.digits }));
                }
                Truth::Unknown => self.digits = self.digits.saturating_mul(2).min(max),
            }
        }
    }

    fn run<V: Label>(&mut self, r: &RealizedComplex<V>, targets: &TargetLengths<V>) -> Result<(), Failure> {
        let d = r.ambient_dim();
        let n_v = r.complex().num_vertices();
        let n_e = r.complex().num_edges();
        self.trace.note("d", d);
        self.trace.note("V", n_v);
        self.trace.note("E", n_e);

        let dv = Interval::point(int(d * n_v));
        let e_count = Interval::point(int(n_e));
        self.decide(Check::Dimension, Rel::Ge, |_| Ok((dv.clone(), e_count.clone())))?;

        let cd2 = r
            .collision_distance_squared(&self.cfg.lcp)
            .map_err(|e| (Check::NonSelfIntersection, lcp_reason(e)))?;
        match &cd2 {
            Some(cd2) => {
                self.bits(Check::NonSelfIntersection, cd2)?;
                self.trace.note("CD²", cd2);
                self.decide(Check::NonSelfIntersection, Rel::Gt, |_| {
                    Ok((Interval::point(cd2.clone()), Interval::zero()))
                })?;
            }
            None => self.trace.note("CD²", "none (no disjoint faces)"),
        }
        if n_e == 0 {
            self.trace.note("σ_min", "not needed (no edges)");
            return Ok(());
        }

        let jac = r.length_jacobian();
        let (_, bound) = bound_smallest_singular_value(&jac, &self.cfg.spectral, self.digits)
            .map_err(|e| (Check::Nondegeneracy, numeric_reason(e)))?;
        self.bits(Check::Nondegeneracy, &bound.lower)?;
        self.trace.note("λ_min lower", &bound.lower);
        self.trace.note("λ_min upper", &bound.upper);
        self.trace.note("λ_min method", format!("{:?}", bound.method));
        if bound.method == BoundMethod::None {
            let hi = sqrt_interval(&bound.upper, self.digits)
                .map_err(|e| (Check::Nondegeneracy, numeric_reason(e)))?;
            self.trace.entries.push(TraceEntry {
                check: Check::Nondegeneracy,
                lhs: Interval::new(Rational::zero(), hi.hi().clone()),
                relation: Rel::Gt.symbol(),
                rhs: Interval::zero(),
                outcome: Truth::Unknown,
                digits: self.digits,
            });
            return Err((Check::Nondegeneracy, FailureReason::NotProvablyPositive));
        }
        self.decide(Check::Nondegeneracy, Rel::Gt, |p| {
            let lo = sqrt_interval(&bound.lower, p)?;
            let hi = sqrt_interval(&bound.upper, p)?;
            Ok((Interval::new(lo.lo().clone(), hi.hi().clone()), Interval::zero()))
        })?;

        // Checks 4 and 5 only get easier as σ grows, so they are evaluated at
        // σ = √λ_lower, where σ² is exact.
        let lambda = Interval::point(bound.lower.clone());
        let rho2 = r
            .rho_squared(targets)
            .map_err(|e| (Check::LengthError, FailureReason::MissingTargetLength(e)))?;
        self.bits(Check::LengthError, &rho2)?;
        self.trace.note("ρ²", &rho2);
        let e_q = int(n_e);
        let sixteen = Interval::from_integer(16);
        self.decide(Check::LengthError, Rel::Lt, |p| {
            let denom = &sixteen * &sqrt_interval(&e_q, p)?;
            Ok((sqrt_interval(&rho2, p)?, lambda.checked_div(&denom)?))
        })?;

        let Some(cd2) = cd2 else {
            return Ok(());
        };
        let v_q = int(n_v);
        let eight = Interval::from_integer(8);
        self.decide(Check::CollisionPreservation, Rel::Lt, |p| {
            let s = sqrt_interval(&bound.lower, p)?;
            let sqrt_e = sqrt_interval(&e_q, p)?;
            let rho = sqrt_interval(&rho2, p)?;
            let radicand = &lambda - &(&(&sixteen * &rho) * &sqrt_e);
            // Check 4 proved the radicand positive; only rounding can push its
            // enclosure below zero.
            if radicand.hi().is_negative() {
                return Err(NumericError::SquareRootOfNegative);
            }
            let radicand = Interval::new(radicand.lo().clone().max(Rational::zero()), radicand.hi().clone());
            let lhs = (s - radicand.sqrt(p)?).checked_div(&(&eight * &sqrt_e))?;
            let rhs = sqrt_interval(&cd2, p)?.checked_div(&sqrt_interval(&v_q, p)?)?;
            Ok((lhs, rhs))
        })
    }
}

/// Try to certify that a realization with exactly the `targets` lengths and
/// no self-intersections exists near `r`.
pub fn prove_existence<V: Label>(
    r: &RealizedComplex<V>,
    targets: &TargetLengths<V>,
    cfg: &ProveCfg,
) -> Verdict {
    let mut prover = Prover {
        cfg,
        digits: cfg.sqrt_digits.max(1),
        trace: CertificateTrace::default(),
    };
    let outcome = match prover.run(r, targets) {
        Ok(()) => Outcome::Proven,
        Err((check, reason)) => Outcome::Inconclusive { check, reason },
    };
    let verdict = Verdict {
        outcome,
        trace: cfg.verbose.then_some(prover.trace),
    };
    info!(proven = verdict.is_proven(), reason = %verdict.reason(), "existence verdict");
    verdict
}
