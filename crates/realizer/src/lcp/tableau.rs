//! Dictionary tableau for complementary pivoting.
//!
//! Each row reads `basic = constant + Σ coeff[v] · v` over every variable;
//! coefficients of basic variables are kept at zero. Columns are laid out as
//! `w_0..w_{n-1}, z_0..z_{n-1}, z*`.

use std::fmt;

use num_traits::{One, Signed, Zero};

use crate::exact::Rational;
use crate::linalg::Matrix;

/// Tableau variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Var {
    W(usize),
    Z(usize),
    /// Covering variable `z*` of Lemke's method.
    Cover,
}

impl Var {
    /// Complementary partner; the cover has none.
    pub fn complement(self) -> Option<Var> {
        match self {
            Var::W(i) => Some(Var::Z(i)),
            Var::Z(i) => Some(Var::W(i)),
            Var::Cover => None,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::W(i) => write!(f, "w_{i}"),
            Var::Z(i) => write!(f, "z_{i}"),
            Var::Cover => write!(f, "z*"),
        }
    }
}

#[derive(Clone, Debug)]
struct Row {
    basic: Var,
    constant: Rational,
    coeffs: Vec<Rational>,
}

#[derive(Clone, Debug)]
pub(crate) struct Tableau {
    n: usize,
    rows: Vec<Row>,
}

impl Tableau {
    /// `w_i = q_i + Σ_j M_ij z_j + z*`.
    pub(crate) fn new(q: &[Rational], m: &Matrix<Rational>) -> Self {
        let n = q.len();
        let rows = (0..n)
            .map(|i| {
                let mut coeffs = vec![Rational::zero(); 2 * n + 1];
                for j in 0..n {
                    coeffs[n + j] = m.get(i, j).clone();
                }
                coeffs[2 * n] = Rational::one();
                Row {
                    basic: Var::W(i),
                    constant: q[i].clone(),
                    coeffs,
                }
            })
            .collect();
        Self { n, rows }
    }

    #[inline]
    fn col(&self, v: Var) -> usize {
        match v {
            Var::W(i) => i,
            Var::Z(i) => self.n + i,
            Var::Cover => 2 * self.n,
        }
    }

    fn var_at(&self, col: usize) -> Var {
        if col < self.n {
            Var::W(col)
        } else if col < 2 * self.n {
            Var::Z(col - self.n)
        } else {
            Var::Cover
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub(crate) fn constant(&self, row: usize) -> &Rational {
        &self.rows[row].constant
    }

    #[inline]
    pub(crate) fn coeff(&self, row: usize, v: Var) -> &Rational {
        &self.rows[row].coeffs[self.col(v)]
    }

    /// Row holding `v` as its basic variable, if any.
    pub(crate) fn row_of(&self, v: Var) -> Option<usize> {
        self.rows.iter().position(|r| r.basic == v)
    }

    /// Exchange `entering` into the basis at `row`; returns the leaving variable.
    ///
    /// Panics if the pivot coefficient is zero.
    pub(crate) fn pivot(&mut self, row: usize, entering: Var) -> Var {
        let ce = self.col(entering);
        let pivot_row = &self.rows[row];
        let a = pivot_row.coeffs[ce].clone();
        assert!(!a.is_zero(), "pivot on a zero coefficient");
        let leaving = pivot_row.basic;
        let cl = self.col(leaving);

        // Solve `leaving = c + a·entering + Σ rest` for `entering`.
        let inv = a.recip();
        let neg_inv = -&inv;
        let mut coeffs: Vec<Rational> = pivot_row.coeffs.iter().map(|x| x * &neg_inv).collect();
        coeffs[ce] = Rational::zero();
        coeffs[cl] = inv;
        let solved = Row {
            basic: entering,
            constant: &pivot_row.constant * &neg_inv,
            coeffs,
        };

        for (i, r) in self.rows.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let b = std::mem::replace(&mut r.coeffs[ce], Rational::zero());
            if b.is_zero() {
                continue;
            }
            r.constant += &b * &solved.constant;
            for (c, s) in r.coeffs.iter_mut().zip(&solved.coeffs) {
                if !s.is_zero() {
                    *c += &b * s;
                }
            }
        }
        self.rows[row] = solved;
        leaving
    }

    /// Basic values with every nonbasic variable at zero.
    pub(crate) fn solution(&self) -> (Vec<Rational>, Vec<Rational>) {
        let mut w = vec![Rational::zero(); self.n];
        let mut z = vec![Rational::zero(); self.n];
        for r in &self.rows {
            match r.basic {
                Var::W(i) => w[i] = r.constant.clone(),
                Var::Z(i) => z[i] = r.constant.clone(),
                Var::Cover => {}
            }
        }
        (w, z)
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.rows {
            write!(f, "{} = {}", r.basic, r.constant)?;
            for (col, c) in r.coeffs.iter().enumerate() {
                if c.is_zero() {
                    continue;
                }
                let sign = if c.is_negative() { '-' } else { '+' };
                write!(f, " {sign} {}{}", c.abs(), self.var_at(col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
