//! Exact linear algebra and certified singular-value bounds.
//!
//! Purpose
//! - Hold the length Jacobian and Gram matrices of the prover exactly.
//! - Certify a positive lower bound on `σ_min` of a rational matrix.
//!
//! Why this design (short)
//! - Gershgorin discs on `JᵀJ` are too weak for symmetric shapes (the regular
//!   tetrahedron already gives a negative disc bound), so the bound is proposed
//!   numerically and then certified by an exact positive-definiteness test.
//!   Gershgorin and bisection remain as fallbacks.
//!
//! Code cross-refs: `crate::exact::sqrt_interval`, `crate::prove`.

mod matrix;
mod spectral;

pub use matrix::Matrix;
pub use spectral::{
    bound_smallest_eigenvalue, bound_smallest_singular_value, gershgorin_lower_bound,
    is_positive_definite, BoundMethod, EigenBound, SpectralCfg,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::{Interval, Rational};
    use num_bigint::BigInt;
    use num_traits::{Signed, Zero};

    fn q(n: i64) -> Rational {
        Rational::from_integer(BigInt::from(n))
    }

    fn mat(rows: &[&[i64]]) -> Matrix<Rational> {
        Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| q(x)).collect()).collect())
    }

    #[test]
    fn products_and_gram() {
        let a = mat(&[&[1, 2], &[3, 4], &[5, 6]]);
        assert_eq!(a.transpose(), mat(&[&[1, 3, 5], &[2, 4, 6]]));
        assert_eq!(a.gram(), mat(&[&[35, 44], &[44, 56]]));
        assert_eq!(&a.transpose() * &a, a.gram());
        assert_eq!(a.mul_vec(&[q(1), q(-1)]), vec![q(-1), q(-1), q(-1)]);
        assert_eq!(&Matrix::<Rational>::identity(2) * &a.transpose(), a.transpose());
    }

    #[test]
    fn interval_matrices_multiply() {
        let m = Matrix::from_rows(vec![vec![
            Interval::new(q(-1), q(1)),
            Interval::from_integer(2),
        ]]);
        let p = &m * &m.transpose();
        // [-1, 1]² is evaluated as a product of independent factors.
        assert_eq!(p.get(0, 0), &Interval::new(q(3), q(5)));
    }

    #[test]
    #[should_panic]
    fn ragged_rows_panic() {
        let _ = mat(&[&[1, 2], &[3]]);
    }

    #[test]
    fn positive_definiteness() {
        assert!(is_positive_definite(&mat(&[&[2, 1], &[1, 2]])));
        assert!(!is_positive_definite(&mat(&[&[1, 2], &[2, 1]])));
        assert!(!is_positive_definite(&mat(&[&[1, 0], &[0, 0]])));
        assert!(is_positive_definite(&mat(&[&[4, 2, 0], &[2, 5, 1], &[0, 1, 3]])));
    }

    #[test]
    fn gershgorin_discs() {
        assert_eq!(gershgorin_lower_bound(&mat(&[&[4, 1], &[1, 3]])), q(2));
        assert!(gershgorin_lower_bound(&mat(&[&[2, 2], &[2, 2]])).is_negative());
    }

    #[test]
    fn eigenvalue_bound_brackets_diagonal() {
        let m = mat(&[&[2, 0], &[0, 5]]);
        let b = bound_smallest_eigenvalue(&m, &SpectralCfg::default());
        assert!(b.lower.is_positive());
        assert!(b.lower <= q(2) && q(2) <= b.upper);
        assert_eq!(b.method, BoundMethod::Proposal);
    }

    #[test]
    fn eigenvalue_bound_beats_gershgorin() {
        // Eigenvalues 7, 1, 1; the discs reach below zero.
        let m = mat(&[&[3, 2, 2], &[2, 3, 2], &[2, 2, 3]]);
        assert!(!gershgorin_lower_bound(&m).is_positive());
        let b = bound_smallest_eigenvalue(&m, &SpectralCfg::default());
        assert!(b.lower.is_positive());
        assert!(b.lower <= q(1) && q(1) <= b.upper);
    }

    #[test]
    fn singular_matrices_certify_nothing() {
        let j = mat(&[&[1, 1], &[1, 1]]);
        let (sigma, bound) = bound_smallest_singular_value(&j, &SpectralCfg::default(), 8).unwrap();
        assert!(sigma.lo().is_zero());
        assert_eq!(bound.method, BoundMethod::None);
    }

    #[test]
    fn singular_value_of_wide_and_tall_agree() {
        // Length Jacobian shape of a right triangle (0,0), (3,0), (0,4).
        let j = mat(&[
            &[-6, 0, 6, 0, 0, 0],
            &[0, 0, 6, -8, -6, 8],
            &[0, -8, 0, 0, 0, 8],
        ]);
        let cfg = SpectralCfg::default();
        let (wide, _) = bound_smallest_singular_value(&j, &cfg, 8).unwrap();
        let (tall, _) = bound_smallest_singular_value(&j.transpose(), &cfg, 8).unwrap();
        assert_eq!(wide, tall);
        assert!(wide.lo().is_positive());
        assert!(wide.lo() <= wide.hi());
    }
}
