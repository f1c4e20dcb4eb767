//! JSON problem files and exact number parsing.
//!
//! Problem file:
//! ```json
//! { "dim": 3,
//!   "complex": { "maximal_simplices": [["a", "b", "c", "d"]] },
//!   "lengths": { "default": "1", "edges": [["a", "b", "9/4"]] } }
//! ```
//! `complex` may instead be `{ "polyhedron": { "v": ["n1", "n2", ...] } }`.
//! Rationals are strings: `"3"`, `"-1/3"`, `"0.25"`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use realizer::complex::{AbstractComplex, TargetLengths};
use realizer::Rational;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexSpec {
    MaximalSimplices(Vec<Vec<String>>),
    Polyhedron(BTreeMap<String, Vec<String>>),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LengthsSpec {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub edges: Vec<(String, String, String)>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Problem {
    pub dim: usize,
    pub complex: ComplexSpec,
    #[serde(default)]
    pub lengths: LengthsSpec,
}

/// Two point lists, one per simplex.
#[derive(Clone, Debug, Deserialize)]
pub struct DistanceInput {
    pub s1: Vec<Vec<String>>,
    pub s2: Vec<Vec<String>>,
}

pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Parse `"n"`, `"n/d"` or a plain decimal `"-1.25"` exactly.
pub fn parse_rational(s: &str) -> Result<Rational> {
    let s = s.trim();
    if let Some((n, d)) = s.split_once('/') {
        let n = BigInt::from_str(n.trim()).with_context(|| format!("bad numerator in {s:?}"))?;
        let d = BigInt::from_str(d.trim()).with_context(|| format!("bad denominator in {s:?}"))?;
        if d.is_zero() {
            bail!("zero denominator in {s:?}");
        }
        return Ok(Rational::new(n, d));
    }
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() && frac.is_empty() {
        bail!("empty number {s:?}");
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        bail!("not a rational: {s:?}");
    }
    let digits = format!("{whole}{frac}");
    let numer = BigInt::from_str(&digits).with_context(|| format!("not a rational: {s:?}"))?;
    let denom = (0..frac.len()).fold(BigInt::one(), |acc, _| acc * 10);
    let value = Rational::new(numer, denom);
    Ok(if negative { -value } else { value })
}

pub fn parse_points(points: &[Vec<String>]) -> Result<Vec<Vec<Rational>>> {
    points
        .iter()
        .map(|p| p.iter().map(|x| parse_rational(x)).collect())
        .collect()
}

impl Problem {
    pub fn build_complex(&self) -> Result<AbstractComplex<String>> {
        let complex = match &self.complex {
            ComplexSpec::MaximalSimplices(data) => AbstractComplex::maximal_simplices(data.clone()),
            ComplexSpec::Polyhedron(map) => AbstractComplex::polyhedron(map.clone()),
        };
        complex.context("invalid complex")
    }

    pub fn targets(&self) -> Result<TargetLengths<String>> {
        let mut targets = TargetLengths::new();
        if let Some(default) = &self.lengths.default {
            targets = targets.with_default(parse_rational(default)?)?;
        }
        for (u, v, len) in &self.lengths.edges {
            targets
                .insert(u.clone(), v.clone(), parse_rational(len)?)
                .with_context(|| format!("edge {u}-{v}"))?;
        }
        Ok(targets)
    }
}
