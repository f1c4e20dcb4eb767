//! Special complexes used as fixtures and demos.
//!
//! All constructors are infallible for these fixed inputs; the `expect`s
//! only guard the literal data below.

use std::collections::BTreeMap;

use super::types::AbstractComplex;

fn maximal(data: &[&[&'static str]]) -> AbstractComplex<&'static str> {
    AbstractComplex::maximal_simplices(data.iter().map(|s| s.to_vec()).collect())
        .expect("fixture simplices are non-empty")
}

fn polyhedron(data: &[(&'static str, &[&'static str])]) -> AbstractComplex<&'static str> {
    let map: BTreeMap<_, _> = data.iter().map(|(v, ns)| (*v, ns.to_vec())).collect();
    AbstractComplex::polyhedron(map).expect("fixture neighbour lists are consistent")
}

/// Solid tetrahedron `abcd`: one 3-simplex.
pub fn tetrahedron() -> AbstractComplex<&'static str> {
    maximal(&[&["a", "b", "c", "d"]])
}

/// Boundary of the tetrahedron as a polyhedron.
pub fn tetrahedron_surface() -> AbstractComplex<&'static str> {
    polyhedron(&[
        ("a", &["b", "c", "d"]),
        ("b", &["d", "c", "a"]),
        ("c", &["a", "b", "d"]),
        ("d", &["a", "c", "b"]),
    ])
}

/// Octahedron surface: apexes `t`, `b` over the square `1 2 3 4`.
pub fn octahedron() -> AbstractComplex<&'static str> {
    maximal(&[
        &["t", "1", "2"],
        &["t", "2", "3"],
        &["t", "3", "4"],
        &["t", "4", "1"],
        &["b", "1", "2"],
        &["b", "2", "3"],
        &["b", "3", "4"],
        &["b", "4", "1"],
    ])
}

/// Same octahedron given by cyclic neighbour lists.
pub fn octahedron_polyhedron() -> AbstractComplex<&'static str> {
    polyhedron(&[
        ("t", &["1", "2", "3", "4"]),
        ("b", &["1", "4", "3", "2"]),
        ("1", &["t", "2", "b", "4"]),
        ("2", &["t", "3", "b", "1"]),
        ("3", &["t", "4", "b", "2"]),
        ("4", &["t", "1", "b", "3"]),
    ])
}

/// Icosahedron surface: apex `t`, pentagons `a1..a5` and `b1..b5`, apex `b`.
pub fn icosahedron() -> AbstractComplex<&'static str> {
    maximal(&[
        &["t", "a1", "a2"],
        &["t", "a2", "a3"],
        &["t", "a3", "a4"],
        &["t", "a4", "a5"],
        &["t", "a5", "a1"],
        &["a1", "a2", "b1"],
        &["a2", "a3", "b2"],
        &["a3", "a4", "b3"],
        &["a4", "a5", "b4"],
        &["a5", "a1", "b5"],
        &["b1", "b2", "a2"],
        &["b2", "b3", "a3"],
        &["b3", "b4", "a4"],
        &["b4", "b5", "a5"],
        &["b5", "b1", "a1"],
        &["b", "b1", "b2"],
        &["b", "b2", "b3"],
        &["b", "b3", "b4"],
        &["b", "b4", "b5"],
        &["b", "b5", "b1"],
    ])
}

/// Boundary of triangle `abc`: three edges, no 2-face.
pub fn triangle_boundary() -> AbstractComplex<&'static str> {
    maximal(&[&["a", "b"], &["b", "c"], &["c", "a"]])
}
