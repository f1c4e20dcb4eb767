//! Complexes with exact rational vertex coordinates.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;

use num_traits::Zero;
use tracing::debug;

use super::lengths::TargetLengths;
use super::types::{AbstractComplex, ComplexError, Label};
use crate::distance::simplex_square_distance;
use crate::exact::{from_f64_truncated, Rational};
use crate::lcp::{LcpCfg, LcpError};
use crate::linalg::Matrix;

/// Abstract complex plus a point of `ℚᵈ` per vertex.
///
/// Invariants:
/// - Exactly the vertices of the complex have coordinates, all of length `d`.
/// - The collision distance is cached together with the `LcpCfg` it was
///   computed under; other settings recompute it.
#[derive(Clone, Debug)]
pub struct RealizedComplex<V> {
    complex: AbstractComplex<V>,
    coords: BTreeMap<V, Vec<Rational>>,
    dim: usize,
    sq_collision: OnceCell<(LcpCfg, Option<Rational>)>,
}

impl<V: Label> RealizedComplex<V> {
    /// Coordinates for non-vertices are dropped.
    pub fn new(
        complex: AbstractComplex<V>,
        mut coords: BTreeMap<V, Vec<Rational>>,
    ) -> Result<Self, ComplexError> {
        let mut kept = BTreeMap::new();
        let mut dim = None;
        for v in complex.vertices() {
            let p = coords
                .remove(v)
                .ok_or_else(|| ComplexError::MissingCoordinates {
                    vertex: v.to_string(),
                })?;
            let expected = *dim.get_or_insert(p.len());
            if p.len() != expected {
                return Err(ComplexError::DimensionMismatch {
                    vertex: v.to_string(),
                    expected,
                    found: p.len(),
                });
            }
            kept.insert(v.clone(), p);
        }
        Ok(Self {
            dim: dim.unwrap_or(0),
            complex,
            coords: kept,
            sq_collision: OnceCell::new(),
        })
    }

    /// Rationalize float coordinates, truncating after `digits` decimals.
    pub fn from_f64(
        complex: AbstractComplex<V>,
        coords: &BTreeMap<V, Vec<f64>>,
        digits: u32,
    ) -> Result<Self, ComplexError> {
        let mut exact = BTreeMap::new();
        for (v, p) in coords {
            let q = p
                .iter()
                .map(|&x| from_f64_truncated(x, digits))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ComplexError::NonFiniteCoordinate {
                    vertex: v.to_string(),
                })?;
            exact.insert(v.clone(), q);
        }
        Self::new(complex, exact)
    }

    #[inline]
    pub fn complex(&self) -> &AbstractComplex<V> {
        &self.complex
    }

    #[inline]
    pub fn ambient_dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn coordinates(&self, v: &V) -> Option<&[Rational]> {
        self.coords.get(v).map(Vec::as_slice)
    }

    #[inline]
    pub fn vertex_coordinates(&self) -> &BTreeMap<V, Vec<Rational>> {
        &self.coords
    }

    fn point(&self, v: &V) -> &[Rational] {
        // Every vertex has coordinates by construction.
        &self.coords[v]
    }

    /// `‖x_u − x_v‖²`.
    pub fn squared_distance(&self, u: &V, v: &V) -> Rational {
        self.point(u)
            .iter()
            .zip(self.point(v))
            .fold(Rational::zero(), |acc, (a, b)| {
                let d = a - b;
                acc + &d * &d
            })
    }

    /// Minimum squared hull distance over the collision pairs.
    ///
    /// `None` when the complex has no pair of disjoint faces, in which case
    /// no realization can self-intersect.
    pub fn collision_distance_squared(&self, cfg: &LcpCfg) -> Result<Option<Rational>, LcpError> {
        if let Some((_, cached)) = self.sq_collision.get().filter(|(key, _)| key == cfg) {
            return Ok(cached.clone());
        }
        let mut best: Option<Rational> = None;
        for (s1, s2) in self.complex.collision_simplex_pairs() {
            let p1: Vec<Vec<Rational>> = s1.iter().map(|v| self.point(v).to_vec()).collect();
            let p2: Vec<Vec<Rational>> = s2.iter().map(|v| self.point(v).to_vec()).collect();
            let d = simplex_square_distance(&p1, &p2, cfg)?.sq_dist;
            if best.as_ref().map_or(true, |b| d < *b) {
                best = Some(d);
            }
        }
        debug!(
            pairs = self.complex.collision_simplex_pairs().len(),
            sq_distance = ?best.as_ref().map(ToString::to_string),
            "collision distance"
        );
        let _ = self.sq_collision.set((*cfg, best.clone()));
        Ok(best)
    }

    /// `ρ² = Σ_edges (‖x_u − x_v‖² − L_uv)²`.
    pub fn rho_squared(&self, targets: &TargetLengths<V>) -> Result<Rational, ComplexError> {
        let mut total = Rational::zero();
        for e in self.complex.edges() {
            let (u, v) = (&e[0], &e[1]);
            let err = self.squared_distance(u, v) - targets.get(u, v)?;
            total += &err * &err;
        }
        Ok(total)
    }

    /// Jacobian of the squared-edge-length map, `E × dV`.
    ///
    /// Rows follow the sorted edge list; vertex `i` (sorted) owns columns
    /// `d·i .. d·i + d`. Row `(u, v)` holds `2(x_u − x_v)` in `u`'s block and
    /// `2(x_v − x_u)` in `v`'s block.
    pub fn length_jacobian(&self) -> Matrix<Rational> {
        let d = self.dim;
        let index: BTreeMap<&V, usize> = self.complex.vertices().enumerate().map(|(i, v)| (v, i)).collect();
        let edges = self.complex.edges();
        let mut j = Matrix::zeros(edges.len(), d * index.len());
        let two = Rational::from_integer(2.into());
        for (row, e) in edges.iter().enumerate() {
            let (u, v) = (&e[0], &e[1]);
            let (iu, iv) = (index[u], index[v]);
            for k in 0..d {
                let diff = &two * (&self.point(u)[k] - &self.point(v)[k]);
                j.set(row, d * iv + k, -&diff);
                j.set(row, d * iu + k, diff);
            }
        }
        j
    }
}

impl<V: Label> fmt::Display for RealizedComplex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.complex)?;
        for (v, p) in &self.coords {
            let parts: Vec<String> = p.iter().map(ToString::to_string).collect();
            writeln!(f, "  {v} : [{}]", parts.join(", "))?;
        }
        Ok(())
    }
}
