//! Whole-grid evaluation.
//!
//! Every cell is evaluated independently, in row-major order, with its own
//! empty [`VisitedPath`]. The sweep always completes; failing cells render as
//! `#ERR` and their diagnostics are collected in first-occurrence order.

use tracing::debug;

use super::cell_ref::CellRef;
use super::diagnostic::{Diagnostic, dedup_diagnostics};
use super::eval::{EvalOptions, Evaluator, Value};
use super::format::format_value;
use super::grid::Grid;
use super::path::VisitedPath;

/// Output of a full sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepResult {
    /// Rendered table: rows joined by `\n`, cells joined by the input separator.
    pub output: String,
    /// Unique diagnostics, in the order they were first produced.
    pub errors: Vec<Diagnostic>,
    /// Evaluated values, shaped like the input grid.
    pub cells: Vec<Vec<Value>>,
}

impl SweepResult {
    /// Diagnostic messages as displayed to users.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Build a grid from `text` and evaluate every cell with default options.
///
/// `text` is expected to be normalized already: `\n` line endings and no runs
/// of consecutive spaces.
pub fn evaluate_grid(text: &str, separator: &str) -> SweepResult {
    evaluate_grid_with_options(text, separator, &EvalOptions::default())
}

pub fn evaluate_grid_with_options(text: &str, separator: &str, options: &EvalOptions) -> SweepResult {
    let grid = Grid::build(text, separator);
    sweep(&grid, separator, options)
}

/// Evaluate every cell of an existing grid.
pub fn sweep(grid: &Grid, separator: &str, options: &EvalOptions) -> SweepResult {
    let evaluator = Evaluator::with_options(grid, options.clone());
    let mut errors = Vec::new();
    let mut cells = Vec::with_capacity(grid.len());
    let mut lines = Vec::with_capacity(grid.len());

    for (row_idx, row) in grid.rows().iter().enumerate() {
        let mut values = Vec::with_capacity(row.len());
        let mut fields = Vec::with_capacity(row.len());

        for (col_idx, expression) in row.iter().enumerate() {
            let cell = CellRef::new(col_idx, row_idx);
            let mut path = VisitedPath::new();
            let result = evaluator.evaluate(expression, &cell, &mut path);
            debug!(cell = %cell, value = ?result.value, errors = result.errors.len(), "evaluated");

            fields.push(format_value(&result.value));
            values.push(result.value);
            errors.extend(result.errors);
        }

        lines.push(fields.join(separator));
        cells.push(values);
    }

    dedup_diagnostics(&mut errors);

    SweepResult {
        output: lines.join("\n"),
        errors,
        cells,
    }
}
