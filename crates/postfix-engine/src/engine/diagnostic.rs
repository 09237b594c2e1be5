//! Per-cell evaluation diagnostics.
//!
//! Diagnostics are collected, never raised: a failing cell renders `#ERR` and
//! the sweep carries on. The `Display` text of each variant is the message
//! shown to users.

use thiserror::Error;

use super::cell_ref::CellRef;
use super::path::VisitedPath;

#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// A reference chain came back to a cell that is still being resolved.
    #[error("ERROR: Dependency loop detected in {path}")]
    DependencyLoop { path: VisitedPath },

    /// An operator was applied to a missing or non-numeric operand.
    #[error("ERROR: Expression at >>{cell}<< not valid (1)")]
    InvalidOperand { cell: CellRef },

    /// More than one value was left on the stack.
    #[error("ERROR: Expression at >>{cell}<< not valid (2)")]
    LeftoverOperands { cell: CellRef },

    /// A reference points at a cell that does not exist in the grid.
    #[error("ERROR: Reference to >>{target}<< from >>{cell}<< is outside the grid")]
    MissingCell { target: String, cell: CellRef },

    /// The reference chain is deeper than the configured limit.
    #[error("ERROR: Expression at >>{cell}<< exceeds the maximum reference depth of {limit}")]
    DepthExceeded { cell: CellRef, limit: usize },
}

impl Diagnostic {
    /// True when the message depends on the reference path that produced it.
    pub fn depends_on_path(&self) -> bool {
        matches!(
            self,
            Diagnostic::DependencyLoop { .. } | Diagnostic::DepthExceeded { .. }
        )
    }
}

/// Append `diagnostic` unless an equal one is already present.
pub(crate) fn push_unique(list: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    if !list.contains(&diagnostic) {
        list.push(diagnostic);
    }
}

/// Drop repeated diagnostics, keeping the first occurrence of each.
pub fn dedup_diagnostics(list: &mut Vec<Diagnostic>) {
    let mut seen = std::collections::HashSet::new();
    list.retain(|d| seen.insert(d.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text() {
        let a1 = CellRef::new(0, 0);
        let loop_path = VisitedPath::from(vec![a1, CellRef::new(1, 1)]);
        assert_eq!(
            Diagnostic::DependencyLoop { path: loop_path }.to_string(),
            "ERROR: Dependency loop detected in A1 -> B2"
        );
        assert_eq!(
            Diagnostic::InvalidOperand { cell: a1 }.to_string(),
            "ERROR: Expression at >>A1<< not valid (1)"
        );
        assert_eq!(
            Diagnostic::LeftoverOperands { cell: a1 }.to_string(),
            "ERROR: Expression at >>A1<< not valid (2)"
        );
        assert_eq!(
            Diagnostic::MissingCell { target: "C9".to_string(), cell: a1 }.to_string(),
            "ERROR: Reference to >>C9<< from >>A1<< is outside the grid"
        );
        assert_eq!(
            Diagnostic::DepthExceeded { cell: a1, limit: 8 }.to_string(),
            "ERROR: Expression at >>A1<< exceeds the maximum reference depth of 8"
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let a1 = Diagnostic::InvalidOperand { cell: CellRef::new(0, 0) };
        let b1 = Diagnostic::InvalidOperand { cell: CellRef::new(1, 0) };
        let mut list = vec![b1.clone(), a1.clone(), b1.clone(), a1.clone()];
        dedup_diagnostics(&mut list);
        assert_eq!(list, vec![b1, a1]);
    }

    #[test]
    fn test_depends_on_path() {
        let a1 = CellRef::new(0, 0);
        assert!(Diagnostic::DependencyLoop { path: VisitedPath::from(vec![a1]) }.depends_on_path());
        assert!(Diagnostic::DepthExceeded { cell: a1, limit: 4 }.depends_on_path());
        assert!(!Diagnostic::InvalidOperand { cell: a1 }.depends_on_path());
        assert!(!Diagnostic::MissingCell { target: "B9".to_string(), cell: a1 }.depends_on_path());
    }

    #[test]
    fn test_push_unique() {
        let a1 = Diagnostic::LeftoverOperands { cell: CellRef::new(0, 0) };
        let mut list = Vec::new();
        push_unique(&mut list, a1.clone());
        push_unique(&mut list, a1);
        assert_eq!(list.len(), 1);
    }
}
