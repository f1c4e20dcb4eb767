//! Abstract simplicial complexes in two storage modes.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

/// Vertex label bound used throughout the crate.
pub trait Label: Clone + Ord + Hash + fmt::Debug + fmt::Display {}

impl<T: Clone + Ord + Hash + fmt::Debug + fmt::Display> Label for T {}

/// Sorted, duplicate-free vertex list.
pub type Simplex<V> = Vec<V>;

/// Two disjoint simplices whose realized hulls must stay apart.
pub type CollisionPair<V> = (Simplex<V>, Simplex<V>);

/// Malformed complexes, realizations, or length maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComplexError {
    Empty,
    TooFewNeighbors { vertex: String, count: usize },
    AsymmetricNeighbors { from: String, to: String },
    DuplicateNeighbor { vertex: String, neighbor: String },
    SelfLoop { vertex: String },
    MissingCoordinates { vertex: String },
    DimensionMismatch { vertex: String, expected: usize, found: usize },
    NonFiniteCoordinate { vertex: String },
    MissingLength { u: String, v: String },
    NonPositiveLength { u: String, v: String },
}

impl fmt::Display for ComplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "complex has no vertices"),
            Self::TooFewNeighbors { vertex, count } => {
                write!(f, "vertex {vertex} has {count} neighbours, need at least 3")
            }
            Self::AsymmetricNeighbors { from, to } => {
                write!(f, "{to} is a neighbour of {from} but not vice versa")
            }
            Self::DuplicateNeighbor { vertex, neighbor } => {
                write!(f, "vertex {vertex} lists neighbour {neighbor} twice")
            }
            Self::SelfLoop { vertex } => write!(f, "vertex {vertex} is its own neighbour"),
            Self::MissingCoordinates { vertex } => write!(f, "vertex {vertex} has no coordinates"),
            Self::DimensionMismatch {
                vertex,
                expected,
                found,
            } => write!(
                f,
                "vertex {vertex} has {found} coordinates, expected {expected}"
            ),
            Self::NonFiniteCoordinate { vertex } => {
                write!(f, "vertex {vertex} has a non-finite coordinate")
            }
            Self::MissingLength { u, v } => {
                write!(f, "no target length for edge ({u}, {v}) and no default")
            }
            Self::NonPositiveLength { u, v } => {
                write!(f, "target length for ({u}, {v}) must be positive")
            }
        }
    }
}

impl std::error::Error for ComplexError {}

/// How the complex was specified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Storage<V> {
    /// Every subset of a listed simplex is a face.
    MaximalSimplices(Vec<Simplex<V>>),
    /// Closed 2-manifold: each vertex maps to its cyclic neighbour list.
    Polyhedron(BTreeMap<V, Vec<V>>),
}

/// Abstract simplicial complex with lazily enumerated faces.
///
/// Invariants:
/// - At least one vertex.
/// - Polyhedron mode: every vertex has ≥ 3 distinct neighbours, none of
///   them itself, and the neighbour relation is symmetric.
/// - `faces[k]` (once computed) is the sorted list of k-simplices.
#[derive(Clone, Debug)]
pub struct AbstractComplex<V> {
    pub(super) storage: Storage<V>,
    pub(super) faces: OnceCell<Vec<Vec<Simplex<V>>>>,
    pub(super) collision_pairs: OnceCell<Vec<CollisionPair<V>>>,
}

impl<V: Label> AbstractComplex<V> {
    /// Complex generated by `data`; each entry is deduplicated and sorted.
    pub fn maximal_simplices(data: Vec<Vec<V>>) -> Result<Self, ComplexError> {
        let mut simplices = Vec::with_capacity(data.len());
        for mut s in data {
            s.sort();
            s.dedup();
            if !s.is_empty() {
                simplices.push(s);
            }
        }
        if simplices.is_empty() {
            return Err(ComplexError::Empty);
        }
        Ok(Self::from_storage(Storage::MaximalSimplices(simplices)))
    }

    /// Closed 2-manifold from cyclic neighbour lists.
    pub fn polyhedron(map: BTreeMap<V, Vec<V>>) -> Result<Self, ComplexError> {
        if map.is_empty() {
            return Err(ComplexError::Empty);
        }
        for (v, neighbours) in &map {
            if neighbours.len() < 3 {
                return Err(ComplexError::TooFewNeighbors {
                    vertex: v.to_string(),
                    count: neighbours.len(),
                });
            }
            for (i, n) in neighbours.iter().enumerate() {
                if n == v {
                    return Err(ComplexError::SelfLoop {
                        vertex: v.to_string(),
                    });
                }
                if neighbours[..i].contains(n) {
                    return Err(ComplexError::DuplicateNeighbor {
                        vertex: v.to_string(),
                        neighbor: n.to_string(),
                    });
                }
                let back = map.get(n).is_some_and(|ns| ns.contains(v));
                if !back {
                    return Err(ComplexError::AsymmetricNeighbors {
                        from: v.to_string(),
                        to: n.to_string(),
                    });
                }
            }
        }
        Ok(Self::from_storage(Storage::Polyhedron(map)))
    }

    fn from_storage(storage: Storage<V>) -> Self {
        Self {
            storage,
            faces: OnceCell::new(),
            collision_pairs: OnceCell::new(),
        }
    }

    #[inline]
    pub fn storage(&self) -> &Storage<V> {
        &self.storage
    }

    /// Largest face dimension (2 for polyhedra).
    pub fn dimension(&self) -> usize {
        match &self.storage {
            Storage::Polyhedron(_) => 2,
            Storage::MaximalSimplices(data) => {
                data.iter().map(Vec::len).max().unwrap_or(1).saturating_sub(1)
            }
        }
    }
}

impl<V: Label> fmt::Display for AbstractComplex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |f: &mut fmt::Formatter<'_>, xs: &[V]| -> fmt::Result {
            let parts: Vec<String> = xs.iter().map(ToString::to_string).collect();
            write!(f, "[{}]", parts.join(", "))
        };
        match &self.storage {
            Storage::MaximalSimplices(data) => {
                write!(f, "maximal simplices:")?;
                for s in data {
                    write!(f, " ")?;
                    list(f, s)?;
                }
                Ok(())
            }
            Storage::Polyhedron(map) => {
                write!(f, "polyhedron:")?;
                for (v, ns) in map {
                    write!(f, " {v} -> ")?;
                    list(f, ns)?;
                }
                Ok(())
            }
        }
    }
}
