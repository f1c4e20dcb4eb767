//! Target squared edge lengths.

use std::collections::BTreeMap;
use std::fmt;

use num_traits::Signed;

use super::types::{ComplexError, Label};
use crate::exact::Rational;

/// Per-edge target squared lengths with an optional fallback.
///
/// Keys are stored with the smaller label first, so lookups ignore
/// orientation. Every stored value is strictly positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetLengths<V> {
    edges: BTreeMap<(V, V), Rational>,
    default: Option<Rational>,
}

impl<V: Label> Default for TargetLengths<V> {
    fn default() -> Self {
        Self {
            edges: BTreeMap::new(),
            default: None,
        }
    }
}

fn key<V: Label>(u: V, v: V) -> (V, V) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl<V: Label> TargetLengths<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every edge gets `sq_len`.
    pub fn uniform(sq_len: Rational) -> Result<Self, ComplexError> {
        Self::new().with_default(sq_len)
    }

    pub fn with_default(mut self, sq_len: Rational) -> Result<Self, ComplexError> {
        if !sq_len.is_positive() {
            return Err(ComplexError::NonPositiveLength {
                u: "default".into(),
                v: "default".into(),
            });
        }
        self.default = Some(sq_len);
        Ok(self)
    }

    pub fn insert(&mut self, u: V, v: V, sq_len: Rational) -> Result<(), ComplexError> {
        if !sq_len.is_positive() {
            return Err(ComplexError::NonPositiveLength {
                u: u.to_string(),
                v: v.to_string(),
            });
        }
        self.edges.insert(key(u, v), sq_len);
        Ok(())
    }

    /// Exact pair (either orientation), then the default.
    pub fn get(&self, u: &V, v: &V) -> Result<&Rational, ComplexError> {
        self.edges
            .get(&key(u.clone(), v.clone()))
            .or(self.default.as_ref())
            .ok_or_else(|| ComplexError::MissingLength {
                u: u.to_string(),
                v: v.to_string(),
            })
    }

    #[inline]
    pub fn default_length(&self) -> Option<&Rational> {
        self.default.as_ref()
    }

    /// Explicit entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &V, &Rational)> + '_ {
        self.edges.iter().map(|((u, v), q)| (u, v, q))
    }
}

impl<V: Label> fmt::Display for TargetLengths<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(d) = &self.default {
            writeln!(f, "default : {d}")?;
        }
        for ((u, v), q) in &self.edges {
            writeln!(f, "({u}, {v}) : {q}")?;
        }
        Ok(())
    }
}
