//! Dependency-loop detection while resolving references.
//!
//! The evaluator walks references depth-first. Before it descends into a
//! referenced cell it pushes the current cell onto a [`VisitedPath`], and pops
//! it once the referenced value is back. A cell that is asked to evaluate while
//! it is already on the path is part of a loop.
//!
//! A path lives for exactly one top-level cell evaluation.

use std::fmt;

use super::cell_ref::CellRef;

/// Chain of cells currently being resolved, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisitedPath {
    cells: Vec<CellRef>,
}

impl VisitedPath {
    pub fn new() -> VisitedPath {
        VisitedPath::default()
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.cells.contains(cell)
    }

    pub fn push(&mut self, cell: CellRef) {
        self.cells.push(cell);
    }

    pub fn pop(&mut self) -> Option<CellRef> {
        self.cells.pop()
    }

    /// Number of cells currently being resolved.
    pub fn depth(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellRef] {
        &self.cells
    }
}

impl From<Vec<CellRef>> for VisitedPath {
    fn from(cells: Vec<CellRef>) -> Self {
        VisitedPath { cells }
    }
}

/// Renders as `A1 -> B2 -> C3`.
impl fmt::Display for VisitedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}
