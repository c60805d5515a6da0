//! # Diagnostics
//!
//! Structured reports of recoverable degeneracies. Every diagnostic carries a
//! kind and, when known, the height it occurred at. Diagnostics are collected
//! in a [`Diagnostics`] sink owned by the caller and mirrored to the log.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Kind of a recoverable degeneracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A crossed edge lacked exactly two owning faces during manifold slicing.
    ManifoldViolation,
    /// Walked loops crossed each other.
    SelfIntersectingSlice,
    /// An edge walk could not close into a loop of at least three edges.
    DanglingEdges,
    /// Reconstruction produced no usable loop even after the radius retries.
    ReconstructionEmpty,
    /// A CSG combination had no children.
    AmbiguousCsgOperand,
}

impl DiagnosticKind {
    /// Returns the kind name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::ManifoldViolation => "manifold_violation",
            DiagnosticKind::SelfIntersectingSlice => "self_intersecting_slice",
            DiagnosticKind::DanglingEdges => "dangling_edges",
            DiagnosticKind::ReconstructionEmpty => "reconstruction_empty",
            DiagnosticKind::AmbiguousCsgOperand => "ambiguous_csg_operand",
        }
    }
}

/// A single recoverable degeneracy report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Slice height, when the report belongs to one.
    pub z: Option<f64>,
    /// Human readable detail.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "{} at z={z}: {}", self.kind.name(), self.message),
            None => write!(f, "{}: {}", self.kind.name(), self.message),
        }
    }
}

/// Collector for diagnostics produced during one or more queries.
///
/// # Example
///
/// ```rust
/// use slice_kernel::{Diagnostics, DiagnosticKind};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.report(DiagnosticKind::DanglingEdges, Some(1.5), "walk of 2 edges");
/// assert_eq!(diagnostics.len(), 1);
/// assert!(diagnostics.contains(DiagnosticKind::DanglingEdges));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and emits it as a warning event.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!(
            kind = diagnostic.kind.name(),
            z = diagnostic.z,
            message = %diagnostic.message,
            "slice degeneracy"
        );
        self.entries.push(diagnostic);
    }

    /// Records a diagnostic built from its parts.
    pub fn report(&mut self, kind: DiagnosticKind, z: Option<f64>, message: impl Into<String>) {
        self.push(Diagnostic {
            kind,
            z,
            message: message.into(),
        });
    }

    /// Moves every entry of `other` into this collector without logging twice.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Returns true when a diagnostic of `kind` was recorded.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the recorded diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Consumes the collector, returning its entries.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_and_query() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.report(DiagnosticKind::ManifoldViolation, Some(0.2), "edge 4 has 1 face");
        assert!(diagnostics.contains(DiagnosticKind::ManifoldViolation));
        assert!(!diagnostics.contains(DiagnosticKind::DanglingEdges));
        assert_eq!(diagnostics.iter().next().and_then(|d| d.z), Some(0.2));
    }

    #[test]
    fn test_extend_merges_entries() {
        let mut a = Diagnostics::new();
        a.report(DiagnosticKind::DanglingEdges, None, "a");
        let mut b = Diagnostics::new();
        b.report(DiagnosticKind::ReconstructionEmpty, None, "b");
        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.into_vec()[1].kind, DiagnosticKind::ReconstructionEmpty);
    }

    #[test]
    fn test_display_includes_height() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::SelfIntersectingSlice,
            z: Some(3.0),
            message: "loops 0 and 1 cross".to_string(),
        };
        let text = diagnostic.to_string();
        assert!(text.contains("self_intersecting_slice"));
        assert!(text.contains("z=3"));
    }
}
