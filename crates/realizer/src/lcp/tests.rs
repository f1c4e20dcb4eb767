use super::lemke::cycle_bound;
use super::tableau::Tableau;
use super::*;
use crate::exact::Rational;
use crate::linalg::Matrix;
use num_bigint::BigInt;
use proptest::prelude::*;

fn q(n: i64) -> Rational {
    Rational::from_integer(BigInt::from(n))
}

fn vecq(xs: &[i64]) -> Vec<Rational> {
    xs.iter().map(|&x| q(x)).collect()
}

fn mat(rows: &[&[i64]]) -> Matrix<Rational> {
    Matrix::from_rows(rows.iter().map(|r| vecq(r)).collect())
}

fn kkt_example() -> (Vec<Rational>, Matrix<Rational>) {
    (
        vecq(&[2, -1, 3, -2]),
        mat(&[&[0, 0, 1, -1], &[0, 0, 1, -2], &[-1, -1, 0, 0], &[1, 2, 0, 0]]),
    )
}

#[test]
fn solves_kkt_system_with_first_row_rule() {
    let (qv, m) = kkt_example();
    let cfg = LcpCfg {
        tie_break: TieBreak::FirstRow,
        ..LcpCfg::default()
    };
    let sol = solve_lcp(&qv, &m, &cfg).unwrap();
    assert!(sol.verify(&qv, &m));
    assert_eq!(sol.w, vecq(&[3, 0, 0, 4]));
    assert_eq!(sol.z, vecq(&[0, 3, 1, 0]));
    assert_eq!(sol.pivots, 5);
}

#[test]
fn seeded_rule_is_reproducible() {
    let (qv, m) = kkt_example();
    let cfg = LcpCfg::default();
    let a = solve_lcp(&qv, &m, &cfg).unwrap();
    let b = solve_lcp(&qv, &m, &cfg).unwrap();
    assert!(a.verify(&qv, &m));
    assert_eq!(a, b);
}

#[test]
fn nonnegative_q_needs_no_pivots() {
    let qv = vecq(&[0, 2]);
    let m = mat(&[&[1, 5], &[-3, 1]]);
    let sol = solve_lcp(&qv, &m, &LcpCfg::default()).unwrap();
    assert_eq!(sol.pivots, 0);
    assert_eq!(sol.w, qv);
    assert!(sol.verify(&qv, &m));
}

#[test]
fn ray_termination_reports_infeasible() {
    let err = solve_lcp(&vecq(&[-1]), &mat(&[&[0]]), &LcpCfg::default()).unwrap_err();
    assert_eq!(err, LcpError::Infeasible);
}

#[test]
fn single_variable_solution() {
    let sol = solve_lcp(&vecq(&[-1]), &mat(&[&[1]]), &LcpCfg::default()).unwrap();
    assert_eq!(sol.z, vecq(&[1]));
    assert_eq!(sol.w, vecq(&[0]));
    assert_eq!(sol.pivots, 2);
}

#[test]
fn shape_errors_are_reported() {
    let err = solve_lcp(&vecq(&[-1, 2]), &mat(&[&[1]]), &LcpCfg::default()).unwrap_err();
    assert_eq!(
        err,
        LcpError::DimensionMismatch {
            q: 2,
            rows: 1,
            cols: 1
        }
    );
}

#[test]
fn ceilings_abort_the_search() {
    let (qv, m) = kkt_example();
    let cfg = LcpCfg {
        tie_break: TieBreak::FirstRow,
        max_pivots: Some(1),
        ..LcpCfg::default()
    };
    assert!(matches!(
        solve_lcp(&qv, &m, &cfg),
        Err(LcpError::Cycling { pivots: 3 })
    ));

    let cfg = LcpCfg {
        max_bits: Some(1),
        ..LcpCfg::default()
    };
    assert!(matches!(
        solve_lcp(&qv, &m, &cfg),
        Err(LcpError::NumericOverflow { limit: 1, .. })
    ));
}

#[test]
fn cycle_bound_is_binomial() {
    assert_eq!(cycle_bound(1), 1);
    assert_eq!(cycle_bound(2), 4);
    assert_eq!(cycle_bound(4), 56);
    assert_eq!(cycle_bound(200), u64::MAX);
}

#[test]
fn tableau_prints_dictionary() {
    let t = Tableau::new(&vecq(&[-1, 2]), &mat(&[&[1, 0], &[0, -3]]));
    assert_eq!(
        t.to_string(),
        "w_0 = -1 + 1z_0 + 1z*\nw_1 = 2 - 3z_1 + 1z*\n"
    );
}

fn pd_instance() -> impl Strategy<Value = (Vec<Rational>, Matrix<Rational>)> {
    (1usize..5).prop_flat_map(|n| {
        (
            prop::collection::vec(-6i64..6, n),
            prop::collection::vec(-3i64..4, n * n),
        )
            .prop_map(move |(qs, bs)| {
                // M = BᵀB + I is positive definite, so the LCP has a unique solution.
                let b = Matrix::from_fn(n, n, |i, j| q(bs[i * n + j]));
                let g = b.gram();
                let m = Matrix::from_fn(n, n, |i, j| {
                    if i == j {
                        g.get(i, j) + q(1)
                    } else {
                        g.get(i, j).clone()
                    }
                });
                (vecq(&qs), m)
            })
    })
}

proptest! {
    #[test]
    fn positive_definite_problems_are_solved((qv, m) in pd_instance()) {
        let sol = solve_lcp(&qv, &m, &LcpCfg::default()).unwrap();
        prop_assert!(sol.verify(&qv, &m));
    }
}
