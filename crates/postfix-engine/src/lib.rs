//! postfix-engine - evaluates grids of postfix expressions with cell references.

pub mod engine;

pub use engine::{EvalOptions, SweepResult, evaluate_grid, evaluate_grid_with_options};
