//! Convex quadratic programs via their KKT complementarity system.
//!
//! Problem
//! - minimize `½ xᵀAx + bᵀx + c` subject to `x ≥ 0` and `Dx ≥ e`, with `A`
//!   symmetric positive semidefinite.
//!
//! Reduction
//! - `q = (b, −e)`, `M = [[A, −Dᵀ], [D, 0]]`; the first `n` entries of the
//!   LCP's `z` are the primal optimum, the remaining `m` are the multipliers.
//! - `M` is PSD-plus-skew, so a feasible program always yields a solution;
//!   Lemke's degenerate termination is accepted for that reason.

use num_traits::{Signed, Zero};
use tracing::trace;

use crate::exact::Rational;
use crate::lcp::{solve_lcp, LcpCfg, LcpError};
use crate::linalg::Matrix;

/// Convex QP data. `d` has one row per inequality and `n` columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cqp {
    pub a: Matrix<Rational>,
    pub b: Vec<Rational>,
    pub c: Rational,
    pub d: Matrix<Rational>,
    pub e: Vec<Rational>,
}

/// Optimal value together with the primal minimizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CqpSolution {
    pub value: Rational,
    pub x: Vec<Rational>,
}

impl Cqp {
    /// Program without inequality rows besides `x ≥ 0`.
    pub fn unconstrained(a: Matrix<Rational>, b: Vec<Rational>, c: Rational) -> Self {
        let n = b.len();
        Self {
            a,
            b,
            c,
            d: Matrix::zeros(0, n),
            e: Vec::new(),
        }
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.b.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.e.len()
    }

    /// `½ xᵀAx + bᵀx + c`, exactly.
    pub fn objective(&self, x: &[Rational]) -> Rational {
        let ax = self.a.mul_vec(x);
        let quad = x
            .iter()
            .zip(&ax)
            .fold(Rational::zero(), |acc, (xi, axi)| acc + xi * axi);
        let lin = x
            .iter()
            .zip(&self.b)
            .fold(Rational::zero(), |acc, (xi, bi)| acc + xi * bi);
        let two = Rational::from_integer(2.into());
        quad / two + lin + &self.c
    }

    /// `x ≥ 0` and `Dx ≥ e`.
    pub fn is_feasible(&self, x: &[Rational]) -> bool {
        x.len() == self.num_vars()
            && x.iter().all(|xi| !xi.is_negative())
            && self
                .d
                .mul_vec(x)
                .iter()
                .zip(&self.e)
                .all(|(dx, ei)| dx >= ei)
    }

    fn lcp_data(&self) -> (Vec<Rational>, Matrix<Rational>) {
        let n = self.num_vars();
        let m = self.num_constraints();
        let q: Vec<Rational> = self
            .b
            .iter()
            .cloned()
            .chain(self.e.iter().map(|x| -x))
            .collect();
        let big = Matrix::from_fn(n + m, n + m, |i, j| match (i < n, j < n) {
            (true, true) => self.a.get(i, j).clone(),
            (true, false) => -self.d.get(j - n, i),
            (false, true) => self.d.get(i - n, j).clone(),
            (false, false) => Rational::zero(),
        });
        (q, big)
    }
}

/// Solve a convex QP exactly through Lemke's method.
///
/// Shapes are checked with `assert!`: `A` is `n × n`, `D` is `m × n`, `e` has
/// `m` entries.
pub fn solve_cqp(p: &Cqp, cfg: &LcpCfg) -> Result<CqpSolution, LcpError> {
    let n = p.num_vars();
    if n == 0 {
        return Ok(CqpSolution {
            value: p.c.clone(),
            x: Vec::new(),
        });
    }
    assert!(
        p.a.nrows() == n && p.a.ncols() == n,
        "A must be {n}x{n}"
    );
    assert!(
        p.d.nrows() == p.num_constraints() && (p.d.nrows() == 0 || p.d.ncols() == n),
        "D must have one row per entry of e and {n} columns"
    );
    let (q, m) = p.lcp_data();
    let sol = solve_lcp(&q, &m, cfg)?;
    let x = sol.z[..n].to_vec();
    let value = p.objective(&x);
    trace!(n, m = p.num_constraints(), pivots = sol.pivots, %value, "cqp solved");
    Ok(CqpSolution { value, x })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use proptest::prelude::*;

    fn q(n: i64) -> Rational {
        Rational::from_integer(BigInt::from(n))
    }

    fn vecq(xs: &[i64]) -> Vec<Rational> {
        xs.iter().map(|&x| q(x)).collect()
    }

    #[test]
    fn linear_program_on_a_strip() {
        let p = Cqp {
            a: Matrix::zeros(2, 2),
            b: vecq(&[2, -1]),
            c: q(0),
            d: Matrix::from_rows(vec![vecq(&[-1, -1]), vecq(&[1, 2])]),
            e: vecq(&[-3, 2]),
        };
        let sol = solve_cqp(&p, &LcpCfg::default()).unwrap();
        assert_eq!(sol.x, vecq(&[0, 3]));
        assert_eq!(sol.value, q(-3));
        assert!(p.is_feasible(&sol.x));
    }

    #[test]
    fn quadratic_minimum_inside_the_orthant() {
        // ½·2(x−3)² − 9 + c, minimum at x = 3.
        let p = Cqp::unconstrained(Matrix::from_rows(vec![vecq(&[2])]), vecq(&[-6]), q(1));
        let sol = solve_cqp(&p, &LcpCfg::default()).unwrap();
        assert_eq!(sol.x, vecq(&[3]));
        assert_eq!(sol.value, q(-8));
    }

    #[test]
    fn no_variables_returns_constant() {
        let p = Cqp::unconstrained(Matrix::zeros(0, 0), Vec::new(), q(7));
        let sol = solve_cqp(&p, &LcpCfg::default()).unwrap();
        assert_eq!(sol.value, q(7));
        assert!(sol.x.is_empty());
    }

    #[test]
    fn infeasible_constraints_surface_as_lcp_errors() {
        // x ≥ 0 with −x ≥ 1.
        let p = Cqp {
            a: Matrix::zeros(1, 1),
            b: vecq(&[1]),
            c: q(0),
            d: Matrix::from_rows(vec![vecq(&[-1])]),
            e: vecq(&[1]),
        };
        assert_eq!(solve_cqp(&p, &LcpCfg::default()), Err(LcpError::Infeasible));
    }

    proptest! {
        // Diagonal PSD objectives over a box-shaped simplex constraint.
        #[test]
        fn solutions_are_feasible_and_no_worse_than_vertices(
            diag in prop::collection::vec(0i64..5, 3),
            lin in prop::collection::vec(-5i64..5, 3),
        ) {
            let a = Matrix::from_fn(3, 3, |i, j| if i == j { q(diag[i]) } else { q(0) });
            let p = Cqp {
                a,
                b: vecq(&lin),
                c: q(0),
                d: Matrix::from_rows(vec![vecq(&[1, 1, 1]), vecq(&[-1, -1, -1])]),
                e: vecq(&[1, -1]),
            };
            let sol = solve_cqp(&p, &LcpCfg::default()).unwrap();
            prop_assert!(p.is_feasible(&sol.x));
            prop_assert_eq!(p.objective(&sol.x), sol.value.clone());
            for k in 0..3 {
                let mut vertex = vecq(&[0, 0, 0]);
                vertex[k] = q(1);
                prop_assert!(sol.value <= p.objective(&vertex));
            }
        }
    }
}
