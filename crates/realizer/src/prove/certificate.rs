//! Certificate transcript of the existence prover.

use std::fmt;

use crate::exact::{Interval, Truth};

/// The five sufficient inequalities, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Check {
    /// `d·V ≥ E`.
    Dimension,
    /// `CD² > 0`.
    NonSelfIntersection,
    /// `σ_min > 0`.
    Nondegeneracy,
    /// `ρ < σ_min² / (16√E)`.
    LengthError,
    /// `(σ_min − √(σ_min² − 16ρ√E)) / (8√E) < CD / √V`.
    CollisionPreservation,
}

impl Check {
    pub const ALL: [Check; 5] = [
        Check::Dimension,
        Check::NonSelfIntersection,
        Check::Nondegeneracy,
        Check::LengthError,
        Check::CollisionPreservation,
    ];

    /// 1-based position in the chain.
    pub fn number(self) -> u8 {
        match self {
            Check::Dimension => 1,
            Check::NonSelfIntersection => 2,
            Check::Nondegeneracy => 3,
            Check::LengthError => 4,
            Check::CollisionPreservation => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Check::Dimension => "dimension feasibility",
            Check::NonSelfIntersection => "non-self-intersection",
            Check::Nondegeneracy => "jacobian nondegeneracy",
            Check::LengthError => "length-error smallness",
            Check::CollisionPreservation => "collision preservation",
        }
    }

    pub fn inequality(self) -> &'static str {
        match self {
            Check::Dimension => "d·V ≥ E",
            Check::NonSelfIntersection => "CD² > 0",
            Check::Nondegeneracy => "σ_min > 0",
            Check::LengthError => "ρ < σ_min² / (16√E)",
            Check::CollisionPreservation => "(σ_min − √(σ_min² − 16ρ√E)) / (8√E) < CD / √V",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "check {} ({})", self.number(), self.name())
    }
}

/// One evaluated inequality `lhs relation rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceEntry {
    pub check: Check,
    pub lhs: Interval,
    /// `"<"`, `">"` or `"≥"`.
    pub relation: &'static str,
    pub rhs: Interval,
    pub outcome: Truth,
    /// Square-root precision the entry was decided at.
    pub digits: u32,
}

/// Ordered transcript; a successful run holds one `True` entry per
/// non-vacuous check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CertificateTrace {
    pub entries: Vec<TraceEntry>,
    /// Named quantities (`d`, `V`, `ρ²`, ...) recorded along the way.
    pub notes: Vec<(String, String)>,
}

impl CertificateTrace {
    pub(crate) fn note(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.notes.push((key.into(), value.to_string()));
    }

    pub fn entry(&self, check: Check) -> Option<&TraceEntry> {
        self.entries.iter().find(|e| e.check == check)
    }

    pub fn all_true(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_true())
    }
}

impl fmt::Display for CertificateTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.notes {
            writeln!(f, "{k} = {v}")?;
        }
        for e in &self.entries {
            writeln!(f, "{}: {}", e.check, e.check.inequality())?;
            writeln!(f, "  lhs = {}", e.lhs)?;
            writeln!(f, "  {} rhs = {}", e.relation, e.rhs)?;
            writeln!(f, "  {} at {} digits", e.outcome, e.digits)?;
        }
        Ok(())
    }
}
