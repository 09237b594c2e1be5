//! Postfix spreadsheet engine API.
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`Grid`], [`Row`] - Raw cell expressions split from delimited text
//! - [`Token`], [`is_number`], [`is_coordinate`], [`is_operator`] - Token classification
//! - [`Evaluator`] - Postfix evaluation with recursive reference resolution
//! - [`VisitedPath`] - Dependency-loop detection
//! - [`evaluate_grid`] - Evaluate every cell of a grid
//! - [`format_value`] - Format values for output
//! - [`generate_sheet`] - Random sheets for benchmarking

mod cell_ref;
mod diagnostic;
mod eval;
mod format;
mod generate;
mod grid;
mod path;
mod sweep;
mod token;

pub use cell_ref::{CellRef, split_coordinate};
pub use diagnostic::{Diagnostic, dedup_diagnostics};
pub use eval::{DEFAULT_MAX_DEPTH, EvalOptions, Evaluation, Evaluator, Value};
pub use format::{format_number, format_value};
pub use generate::{GenerateOptions, generate_sheet, infix_to_postfix, random_cell, random_infix};
pub use grid::{Grid, Row};
pub use path::VisitedPath;
pub use sweep::{SweepResult, evaluate_grid, evaluate_grid_with_options, sweep};
pub use token::{Operator, Token, is_coordinate, is_number, is_operator};
