//! Squared distance between two simplices given by their vertex lists.
//!
//! Points of `conv(S₁)` and `conv(S₂)` are written as `Σ αᵢ pᵢ` and `Σ βⱼ qⱼ`
//! with barycentric weights. The squared distance is the quadratic form
//! `½ (α, β)ᵀ A (α, β)` with
//!
//! ```text
//!     A = [  2⟨pᵢ,pⱼ⟩   −2⟨pᵢ,qⱼ⟩ ]
//!         [ −2⟨qᵢ,pⱼ⟩    2⟨qᵢ,qⱼ⟩ ]
//! ```
//!
//! and the two "weights sum to one" equalities become four inequality rows
//! over all `|S₁| + |S₂|` weights, right-hand side `(1, −1, 1, −1)`.

use num_traits::{One, Zero};

use crate::cqp::{solve_cqp, Cqp};
use crate::exact::Rational;
use crate::lcp::{LcpCfg, LcpError};
use crate::linalg::Matrix;

/// Squared distance between two convex hulls plus a pair of closest points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplexDistance {
    pub sq_dist: Rational,
    pub closest: (Vec<Rational>, Vec<Rational>),
}

fn dot(a: &[Rational], b: &[Rational]) -> Rational {
    a.iter()
        .zip(b)
        .fold(Rational::zero(), |acc, (x, y)| acc + x * y)
}

fn combine(points: &[Vec<Rational>], weights: &[Rational], dim: usize) -> Vec<Rational> {
    let mut out = vec![Rational::zero(); dim];
    for (p, w) in points.iter().zip(weights) {
        if w.is_zero() {
            continue;
        }
        for (o, x) in out.iter_mut().zip(p) {
            *o += w * x;
        }
    }
    out
}

/// Build the barycentric QP for `conv(s1)` vs `conv(s2)`.
pub fn simplex_distance_qp(s1: &[Vec<Rational>], s2: &[Vec<Rational>]) -> Cqp {
    let (a, b) = (s1.len(), s2.len());
    let n = a + b;
    let point = |i: usize| if i < a { &s1[i] } else { &s2[i - a] };
    let two = Rational::from_integer(2.into());
    let quad = Matrix::from_fn(n, n, |i, j| {
        let g = &two * dot(point(i), point(j));
        if (i < a) == (j < a) {
            g
        } else {
            -g
        }
    });
    let one = Rational::one();
    let d = Matrix::from_fn(4, n, |r, j| {
        let in_block = if r < 2 { j < a } else { j >= a };
        match (in_block, r % 2 == 0) {
            (false, _) => Rational::zero(),
            (true, true) => one.clone(),
            (true, false) => -&one,
        }
    });
    let e = vec![one.clone(), -&one, one.clone(), -&one];
    Cqp {
        a: quad,
        b: vec![Rational::zero(); n],
        c: Rational::zero(),
        d,
        e,
    }
}

/// Squared distance between `conv(s1)` and `conv(s2)` with closest points.
///
/// Panics when either list is empty or the points disagree in dimension.
pub fn simplex_square_distance(
    s1: &[Vec<Rational>],
    s2: &[Vec<Rational>],
    cfg: &LcpCfg,
) -> Result<SimplexDistance, LcpError> {
    assert!(!s1.is_empty() && !s2.is_empty(), "simplices need at least one vertex");
    let dim = s1[0].len();
    assert!(
        s1.iter().chain(s2).all(|p| p.len() == dim),
        "all points must live in R^{dim}"
    );
    let sol = solve_cqp(&simplex_distance_qp(s1, s2), cfg)?;
    let (alpha, beta) = sol.x.split_at(s1.len());
    let p = combine(s1, alpha, dim);
    let q = combine(s2, beta, dim);
    let diff: Vec<Rational> = p.iter().zip(&q).map(|(x, y)| x - y).collect();
    Ok(SimplexDistance {
        sq_dist: dot(&diff, &diff),
        closest: (p, q),
    })
}
