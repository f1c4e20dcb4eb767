use std::collections::BTreeMap;

use super::faces::combinations;
use super::*;
use crate::exact::Rational;
use crate::lcp::{LcpCfg, LcpError};
use num_bigint::BigInt;

fn q(n: i64, d: i64) -> Rational {
    Rational::new(BigInt::from(n), BigInt::from(d))
}

fn counts<V: Label>(c: &AbstractComplex<V>) -> Vec<usize> {
    (0..=c.dimension()).map(|k| c.k_simplices(k).len()).collect()
}

fn right_triangle() -> RealizedComplex<&'static str> {
    let coords: BTreeMap<_, _> = [
        ("a", vec![q(0, 1), q(0, 1)]),
        ("b", vec![q(3, 1), q(0, 1)]),
        ("c", vec![q(0, 1), q(4, 1)]),
    ]
    .into_iter()
    .collect();
    RealizedComplex::new(special::triangle_boundary(), coords).unwrap()
}

#[test]
fn combinations_in_lexicographic_order() {
    let c = combinations(&[1, 2, 3, 4], 2);
    assert_eq!(c.len(), 6);
    assert_eq!(c.first(), Some(&vec![1, 2]));
    assert_eq!(c.last(), Some(&vec![3, 4]));
    assert_eq!(combinations(&[1, 2, 3], 3), vec![vec![1, 2, 3]]);
    assert!(combinations(&[1, 2], 3).is_empty());
}

#[test]
fn face_counts_of_fixtures() {
    assert_eq!(counts(&special::tetrahedron()), vec![4, 6, 4, 1]);
    assert_eq!(counts(&special::tetrahedron_surface()), vec![4, 6, 4]);
    assert_eq!(counts(&special::octahedron()), vec![6, 12, 8]);
    assert_eq!(counts(&special::octahedron_polyhedron()), vec![6, 12, 8]);
    assert_eq!(counts(&special::icosahedron()), vec![12, 30, 20]);
    assert_eq!(counts(&special::triangle_boundary()), vec![3, 3]);
}

#[test]
fn storage_modes_agree_on_the_octahedron() {
    let a = special::octahedron();
    let b = special::octahedron_polyhedron();
    for k in 0..3 {
        assert_eq!(a.k_simplices(k), b.k_simplices(k));
    }
    assert!(b.contains_face(&["2", "t", "1"]));
    assert!(!b.contains_face(&["t", "b"]));
    assert!(!b.contains_face(&["t", "1", "2", "3"]));
}

#[test]
fn polyhedron_validation() {
    let build = |data: &[(&'static str, &[&'static str])]| {
        let map: BTreeMap<_, _> = data.iter().map(|(v, ns)| (*v, ns.to_vec())).collect();
        AbstractComplex::polyhedron(map)
    };
    assert!(matches!(
        build(&[("a", &["b", "c"])]),
        Err(ComplexError::TooFewNeighbors { count: 2, .. })
    ));
    assert!(matches!(
        build(&[("a", &["a", "b", "c"])]),
        Err(ComplexError::SelfLoop { .. })
    ));
    assert!(matches!(
        build(&[("a", &["b", "b", "c"])]),
        Err(ComplexError::DuplicateNeighbor { .. })
    ));
    assert!(matches!(
        build(&[
            ("a", &["b", "c", "d"]),
            ("b", &["c", "d", "e"]),
            ("c", &["a", "b", "d"]),
            ("d", &["a", "c", "b"]),
        ]),
        Err(ComplexError::AsymmetricNeighbors { .. })
    ));
    assert_eq!(
        AbstractComplex::<String>::polyhedron(BTreeMap::new()).unwrap_err(),
        ComplexError::Empty
    );
    assert_eq!(
        AbstractComplex::<String>::maximal_simplices(vec![vec![]]).unwrap_err(),
        ComplexError::Empty
    );
}

#[test]
fn collision_pairs_of_small_complexes() {
    // Vertex vs opposite triangle, and opposite edges.
    assert_eq!(special::tetrahedron().collision_simplex_pairs().len(), 7);
    // Vertex vs opposite edge.
    let tri = special::triangle_boundary();
    let pairs = tri.collision_simplex_pairs();
    assert_eq!(pairs.len(), 3);
    assert!(pairs.iter().all(|(a, b)| a.len() + b.len() == 3));
    assert_eq!(tri.non_adjacent_pairs().len(), 6);
}

#[test]
fn collision_pairs_cover_all_non_adjacent_pairs() {
    let contains = |big: &[&str], small: &[&str]| small.iter().all(|v| big.contains(v));
    for c in [
        special::tetrahedron(),
        special::octahedron(),
        special::icosahedron(),
        special::tetrahedron_surface(),
    ] {
        let cover = c.collision_simplex_pairs();
        assert!(cover.len() <= c.non_adjacent_pairs().len());
        for (s, t) in c.non_adjacent_pairs() {
            let covered = cover.iter().any(|(a, b)| {
                (contains(a, &s) && contains(b, &t)) || (contains(a, &t) && contains(b, &s))
            });
            assert!(covered, "pair {s:?} / {t:?} not covered");
        }
    }
}

#[test]
fn target_lengths_lookup() {
    let mut t = TargetLengths::new().with_default(q(1, 1)).unwrap();
    t.insert("b", "a", q(9, 1)).unwrap();
    assert_eq!(t.get(&"a", &"b").unwrap(), &q(9, 1));
    assert_eq!(t.get(&"b", &"a").unwrap(), &q(9, 1));
    assert_eq!(t.get(&"a", &"c").unwrap(), &q(1, 1));
    assert!(t.insert("a", "c", q(0, 1)).is_err());

    let bare: TargetLengths<&str> = TargetLengths::new();
    assert!(matches!(
        bare.get(&"a", &"b"),
        Err(ComplexError::MissingLength { .. })
    ));
    assert!(TargetLengths::<&str>::uniform(q(-1, 1)).is_err());
}

#[test]
fn realization_checks_coordinates() {
    let mut coords: BTreeMap<_, _> = [("a", vec![q(0, 1)]), ("b", vec![q(1, 1)])]
        .into_iter()
        .collect();
    assert!(matches!(
        RealizedComplex::new(special::triangle_boundary(), coords.clone()),
        Err(ComplexError::MissingCoordinates { vertex }) if vertex == "c"
    ));
    coords.insert("c", vec![q(0, 1), q(1, 1)]);
    assert!(matches!(
        RealizedComplex::new(special::triangle_boundary(), coords),
        Err(ComplexError::DimensionMismatch {
            expected: 1,
            found: 2,
            ..
        })
    ));

    let floats: BTreeMap<_, _> = [
        ("a", vec![0.3, 0.0]),
        ("b", vec![1.23456, 0.0]),
        ("c", vec![f64::NAN, 1.0]),
    ]
    .into_iter()
    .collect();
    assert!(matches!(
        RealizedComplex::from_f64(special::triangle_boundary(), &floats, 3),
        Err(ComplexError::NonFiniteCoordinate { .. })
    ));
}

#[test]
fn right_triangle_quantities() {
    let r = right_triangle();
    assert_eq!(r.ambient_dim(), 2);
    assert_eq!(r.squared_distance(&"b", &"c"), q(25, 1));

    let mut exact = TargetLengths::new();
    exact.insert("a", "b", q(9, 1)).unwrap();
    exact.insert("a", "c", q(16, 1)).unwrap();
    exact.insert("b", "c", q(25, 1)).unwrap();
    assert_eq!(r.rho_squared(&exact).unwrap(), q(0, 1));
    let unit = TargetLengths::uniform(q(1, 1)).unwrap();
    assert_eq!(r.rho_squared(&unit).unwrap(), q(865, 1));
    assert!(r.rho_squared(&TargetLengths::new()).is_err());

    let j = r.length_jacobian();
    let row = |xs: [i64; 6]| xs.iter().map(|&x| q(x, 1)).collect::<Vec<_>>();
    assert_eq!(j.row(0), row([-6, 0, 6, 0, 0, 0]).as_slice());
    assert_eq!(j.row(1), row([0, -8, 0, 0, 0, 8]).as_slice());
    assert_eq!(j.row(2), row([0, 0, 6, -8, -6, 8]).as_slice());
}

#[test]
fn right_triangle_collision_distance() {
    let r = right_triangle();
    let cfg = LcpCfg::default();
    // Vertex a to the hypotenuse: (12/5)².
    assert_eq!(r.collision_distance_squared(&cfg).unwrap(), Some(q(144, 25)));
    // Cached value is returned on the second call.
    assert_eq!(r.collision_distance_squared(&cfg).unwrap(), Some(q(144, 25)));
}

#[test]
fn collision_cache_respects_solver_settings() {
    let r = right_triangle();
    assert!(r.collision_distance_squared(&LcpCfg::default()).unwrap().is_some());
    let tight = LcpCfg {
        max_bits: Some(1),
        ..LcpCfg::default()
    };
    assert!(matches!(
        r.collision_distance_squared(&tight),
        Err(LcpError::NumericOverflow { limit: 1, .. })
    ));
    // The first result stays cached for its own settings.
    assert_eq!(r.collision_distance_squared(&LcpCfg::default()).unwrap(), Some(q(144, 25)));
}

#[test]
fn lone_vertex_has_no_collision_pairs() {
    let c = AbstractComplex::maximal_simplices(vec![vec!["u"]]).unwrap();
    let coords: BTreeMap<_, _> = [("u", vec![q(0, 1)])].into_iter().collect();
    let r = RealizedComplex::new(c, coords).unwrap();
    assert_eq!(r.collision_distance_squared(&LcpCfg::default()).unwrap(), None);
}

#[test]
fn display_mentions_storage_and_coordinates() {
    let text = right_triangle().to_string();
    assert!(text.starts_with("maximal simplices:"));
    assert!(text.contains("b : [3, 0]"));
    let poly = special::tetrahedron_surface().to_string();
    assert!(poly.starts_with("polyhedron:"));
}
