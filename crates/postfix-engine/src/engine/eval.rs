//! Postfix expression evaluation.
//!
//! An expression is a space separated list of tokens evaluated left to right
//! against a value stack. Coordinate tokens are resolved by evaluating the
//! referenced cell's own expression, recursively, with a [`VisitedPath`]
//! guarding against dependency loops.
//!
//! Within one top-level evaluation, finished dependencies are memoized so a
//! cell referenced from many places is evaluated once. Results that mention
//! the visited path (loops, depth limit) are only reused under the same path.
//! Nothing is shared between top-level cells.
//!
//! Failures never abort evaluation. They turn the affected value into
//! [`Value::Error`] and leave a [`Diagnostic`] behind.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use super::cell_ref::CellRef;
use super::diagnostic::{Diagnostic, push_unique};
use super::grid::Grid;
use super::path::VisitedPath;
use super::token::Token;

/// Default limit on how many references deep a single evaluation may go.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Longest reference chain followed before a cell is reported as too deep.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The value of an evaluated cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    /// Sentinel for a cell that could not be evaluated; renders as `#ERR`.
    Error,
    /// Every token was skipped, so nothing was left on the stack.
    Blank,
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error)
    }

    /// A value an operator accepts: a finite number.
    fn operand(self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }
}

/// Result of evaluating one expression, including diagnostics from the
/// cells it depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub value: Value,
    pub errors: Vec<Diagnostic>,
}

impl Evaluation {
    fn failed(diagnostic: Diagnostic) -> Evaluation {
        Evaluation {
            value: Value::Error,
            errors: vec![diagnostic],
        }
    }
}

/// An evaluation plus the length of the longest reference chain below it.
#[derive(Clone, Debug)]
struct Settled {
    evaluation: Evaluation,
    height: usize,
}

/// Finished sub-evaluations for one top-level cell.
#[derive(Debug, Default)]
struct Memo {
    /// Results that hold for any path that does not exceed the depth limit.
    settled: HashMap<CellRef, Settled>,
    /// Loop or depth results, keyed by the path they were produced under.
    by_path: HashMap<VisitedPath, HashMap<CellRef, Settled>>,
}

/// Evaluates postfix expressions against a read-only grid.
#[derive(Clone, Debug)]
pub struct Evaluator<'g> {
    grid: &'g Grid,
    options: EvalOptions,
}

impl<'g> Evaluator<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self::with_options(grid, EvalOptions::default())
    }

    pub fn with_options(grid: &'g Grid, options: EvalOptions) -> Self {
        Self { grid, options }
    }

    /// Evaluate the expression stored at `cell`. None if the grid has no such cell.
    pub fn evaluate_cell(&self, cell: &CellRef, path: &mut VisitedPath) -> Option<Evaluation> {
        let expression = self.grid.get(cell)?;
        Some(self.evaluate(expression, cell, path))
    }

    /// Evaluate `expression` as the contents of cell `this`.
    ///
    /// `path` holds the cells whose evaluation is waiting on this one; pass an
    /// empty path for a top-level cell. It is restored to its original
    /// contents before returning.
    pub fn evaluate(&self, expression: &str, this: &CellRef, path: &mut VisitedPath) -> Evaluation {
        let mut memo = Memo::default();
        self.evaluate_in(expression, this, path, &mut memo).evaluation
    }

    fn evaluate_in(
        &self,
        expression: &str,
        this: &CellRef,
        path: &mut VisitedPath,
        memo: &mut Memo,
    ) -> Settled {
        if path.contains(this) {
            debug!(cell = %this, path = %path, "dependency loop");
            return Settled {
                evaluation: Evaluation::failed(Diagnostic::DependencyLoop { path: path.clone() }),
                height: 0,
            };
        }

        let expression = if expression.trim().is_empty() {
            "0"
        } else {
            expression
        };

        let mut stack: Vec<Value> = Vec::new();
        let mut errors: Vec<Diagnostic> = Vec::new();
        let mut height = 0;

        for token in expression.split(' ') {
            match Token::classify(token) {
                Token::Number(n) => stack.push(Value::Number(n)),
                Token::Coordinate(target) => {
                    let (value, reach) = self.resolve(token, target, this, path, memo, &mut errors);
                    height = height.max(reach);
                    stack.push(value);
                }
                Token::Operator(op) => {
                    let rhs = stack.pop();
                    let lhs = stack.pop();
                    match (lhs.and_then(Value::operand), rhs.and_then(Value::operand)) {
                        (Some(l), Some(r)) => {
                            stack.push(Value::Number(op.apply(l, r)));
                        }
                        _ => {
                            push_unique(&mut errors, Diagnostic::InvalidOperand { cell: *this });
                            stack.push(Value::Error);
                        }
                    }
                }
                Token::Unknown => {}
            }
        }

        if stack.len() > 1 {
            // A cell already flagged for a bad operand is not flagged twice.
            if !errors.contains(&Diagnostic::InvalidOperand { cell: *this }) {
                push_unique(&mut errors, Diagnostic::LeftoverOperands { cell: *this });
            }
            return Settled {
                evaluation: Evaluation {
                    value: Value::Error,
                    errors,
                },
                height,
            };
        }

        Settled {
            evaluation: Evaluation {
                value: stack.pop().unwrap_or(Value::Blank),
                errors,
            },
            height,
        }
    }

    /// Resolve one reference token. Returns the referenced value and the
    /// length of the reference chain it took, counting this reference.
    fn resolve(
        &self,
        token: &str,
        target: Option<CellRef>,
        this: &CellRef,
        path: &mut VisitedPath,
        memo: &mut Memo,
        errors: &mut Vec<Diagnostic>,
    ) -> (Value, usize) {
        let Some((target, expression)) =
            target.and_then(|t| self.grid.get(&t).map(|expression| (t, expression)))
        else {
            push_unique(
                errors,
                Diagnostic::MissingCell {
                    target: token.to_ascii_uppercase(),
                    cell: *this,
                },
            );
            return (Value::Error, 0);
        };

        if path.depth() >= self.options.max_depth {
            warn!(cell = %this, limit = self.options.max_depth, "reference depth limit reached");
            push_unique(
                errors,
                Diagnostic::DepthExceeded {
                    cell: *this,
                    limit: self.options.max_depth,
                },
            );
            return (Value::Error, 0);
        }

        if let Some(done) = memo.settled.get(&target) {
            if path.depth() + done.height < self.options.max_depth {
                trace!(from = %this, to = %target, "reusing settled reference");
                merge(errors, &done.evaluation.errors);
                return (done.evaluation.value, done.height + 1);
            }
        }

        path.push(*this);
        let cached = memo
            .by_path
            .get(&*path)
            .and_then(|cells| cells.get(&target))
            .cloned();
        let result = match cached {
            Some(done) => done,
            None => {
                trace!(from = %this, to = %target, "resolving reference");
                let result = self.evaluate_in(expression, &target, path, memo);
                if result.evaluation.errors.iter().any(Diagnostic::depends_on_path) {
                    memo.by_path
                        .entry(path.clone())
                        .or_default()
                        .insert(target, result.clone());
                } else {
                    memo.settled.insert(target, result.clone());
                }
                result
            }
        };
        path.pop();

        merge(errors, &result.evaluation.errors);
        (result.evaluation.value, result.height + 1)
    }
}

fn merge(errors: &mut Vec<Diagnostic>, found: &[Diagnostic]) {
    for diagnostic in found {
        push_unique(errors, diagnostic.clone());
    }
}
