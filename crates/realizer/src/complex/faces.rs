//! Face enumeration and collision-candidate pairs.

use std::collections::BTreeSet;

use super::types::{AbstractComplex, CollisionPair, Label, Simplex, Storage};

/// k-subsets of `items` in lexicographic index order.
pub(crate) fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n {
        return Vec::new();
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(idxs.iter().map(|&i| items[i].clone()).collect());
        // Rightmost index that can still move.
        let Some(i) = (0..k).rev().find(|&i| idxs[i] != i + n - k) else {
            return out;
        };
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
}

/// Both inputs sorted.
fn disjoint<V: Ord>(a: &[V], b: &[V]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return false,
        }
    }
    true
}

fn with_vertex<V: Label>(s: &[V], v: &V) -> Simplex<V> {
    let mut out = s.to_vec();
    let pos = out.binary_search(v).unwrap_or_else(|p| p);
    out.insert(pos, v.clone());
    out
}

impl<V: Label> AbstractComplex<V> {
    fn all_faces(&self) -> &Vec<Vec<Simplex<V>>> {
        self.faces.get_or_init(|| {
            let dim = self.dimension();
            let mut by_dim: Vec<BTreeSet<Simplex<V>>> = vec![BTreeSet::new(); dim + 1];
            match &self.storage {
                Storage::MaximalSimplices(data) => {
                    for s in data {
                        for k in 0..s.len() {
                            by_dim[k].extend(combinations(s, k + 1));
                        }
                    }
                }
                Storage::Polyhedron(map) => {
                    for (v, ns) in map {
                        by_dim[0].insert(vec![v.clone()]);
                        for (i, n) in ns.iter().enumerate() {
                            let next = &ns[(i + 1) % ns.len()];
                            let mut edge = vec![v.clone(), n.clone()];
                            edge.sort();
                            by_dim[1].insert(edge);
                            let mut tri = vec![v.clone(), n.clone(), next.clone()];
                            tri.sort();
                            by_dim[2].insert(tri);
                        }
                    }
                }
            }
            by_dim.into_iter().map(|s| s.into_iter().collect()).collect()
        })
    }

    /// Sorted k-faces; empty above the dimension.
    pub fn k_simplices(&self, k: usize) -> &[Simplex<V>] {
        self.all_faces().get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices in sorted order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.k_simplices(0).iter().map(|s| &s[0])
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.k_simplices(0).len()
    }

    #[inline]
    pub fn edges(&self) -> &[Simplex<V>] {
        self.k_simplices(1)
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges().len()
    }

    /// Every face of every dimension, lowest dimension first.
    pub fn faces(&self) -> impl Iterator<Item = &Simplex<V>> + '_ {
        self.all_faces().iter().flatten()
    }

    /// Whether `s` (any order, no duplicates) is a face.
    pub fn contains_face(&self, s: &[V]) -> bool {
        if s.is_empty() {
            return false;
        }
        let mut sorted = s.to_vec();
        sorted.sort();
        self.k_simplices(sorted.len() - 1)
            .binary_search(&sorted)
            .is_ok()
    }

    /// All unordered pairs of faces with disjoint vertex sets.
    pub fn non_adjacent_pairs(&self) -> Vec<CollisionPair<V>> {
        let faces: Vec<&Simplex<V>> = self.faces().collect();
        let mut out = Vec::new();
        for (i, a) in faces.iter().enumerate() {
            for b in &faces[i + 1..] {
                if disjoint(a, b) {
                    out.push(((*a).clone(), (*b).clone()));
                }
            }
        }
        out
    }

    /// Disjoint pairs that cannot be enlarged on either side.
    ///
    /// Every non-adjacent pair is componentwise contained in one of these, and
    /// hull distance only shrinks when a simplex grows, so the minimum over
    /// this list equals the minimum over all non-adjacent pairs.
    pub fn collision_simplex_pairs(&self) -> &[CollisionPair<V>] {
        self.collision_pairs.get_or_init(|| {
            let vertices: Vec<&V> = self.vertices().collect();
            let extendable = |s: &[V], other: &[V]| {
                vertices.iter().any(|&v| {
                    s.binary_search(v).is_err()
                        && other.binary_search(v).is_err()
                        && self.contains_face(&with_vertex(s, v))
                })
            };
            self.non_adjacent_pairs()
                .into_iter()
                .filter(|(a, b)| !extendable(a, b) && !extendable(b, a))
                .collect()
        })
    }
}
