//! LCP configuration, results, and errors.

use std::fmt;

use num_traits::{Signed, Zero};

use crate::exact::Rational;
use crate::linalg::Matrix;

/// Rule for choosing among tied leaving rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// Uniform choice among minima, drawn from a `StdRng` seeded per solve.
    Seeded(u64),
    /// Lowest row index among minima.
    FirstRow,
}

/// Lemke solver knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcpCfg {
    pub tie_break: TieBreak,
    /// Treat "no leaving row while the cover sits at zero" as success.
    pub accept_degenerate: bool,
    /// Pivot ceiling; `None` uses `C(2n, n+1)`.
    pub max_pivots: Option<u64>,
    /// Bit ceiling on tableau constants; `None` disables the check.
    pub max_bits: Option<u64>,
}

impl Default for LcpCfg {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Seeded(0x5eed),
            accept_degenerate: true,
            max_pivots: None,
            max_bits: None,
        }
    }
}

/// Failures of Lemke's method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LcpError {
    /// Secondary ray: the LCP has no solution reachable by Lemke.
    Infeasible,
    /// Pivot ceiling reached.
    Cycling { pivots: u64 },
    /// `q` and `M` disagree in size, or `M` is not square.
    DimensionMismatch { q: usize, rows: usize, cols: usize },
    /// A tableau constant outgrew the configured bit ceiling.
    NumericOverflow { bits: u64, limit: u64 },
}

impl fmt::Display for LcpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible => write!(f, "the LCP has no solution"),
            Self::Cycling { pivots } => write!(f, "cycling: gave up after {pivots} pivots"),
            Self::DimensionMismatch { q, rows, cols } => {
                write!(f, "dimension mismatch: q has {q} entries, M is {rows}x{cols}")
            }
            Self::NumericOverflow { bits, limit } => {
                write!(f, "numeric overflow: {bits} bits exceeds the {limit}-bit ceiling")
            }
        }
    }
}

impl std::error::Error for LcpError {}

/// Complementary solution `w = q + Mz`, `w, z ≥ 0`, `wᵀz = 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LcpSolution {
    pub w: Vec<Rational>,
    pub z: Vec<Rational>,
    /// Pivots performed, counting the initial cover pivot.
    pub pivots: u64,
}

impl LcpSolution {
    /// Check the three LCP conditions exactly.
    pub fn verify(&self, q: &[Rational], m: &Matrix<Rational>) -> bool {
        if self.w.len() != q.len() || self.z.len() != q.len() {
            return false;
        }
        let nonneg = self
            .w
            .iter()
            .chain(&self.z)
            .all(|x| !x.is_negative());
        let complementary = self
            .w
            .iter()
            .zip(&self.z)
            .fold(Rational::zero(), |acc, (a, b)| acc + a * b)
            .is_zero();
        let mz = m.mul_vec(&self.z);
        let affine = self
            .w
            .iter()
            .zip(q.iter().zip(&mz))
            .all(|(w, (qi, mzi))| *w == qi + mzi);
        nonneg && complementary && affine
    }
}
