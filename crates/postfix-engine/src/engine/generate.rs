//! Random sheet generation for benchmarking the evaluator.
//!
//! Each cell starts as a fully parenthesized infix expression over single
//! digits, is converted to postfix with the shunting-yard algorithm, and then
//! has some of its literals swapped for references to other cells of the
//! sheet. References are never checked, so generated sheets can contain
//! dependency loops.

use rand::Rng;
use rand::seq::SliceRandom;

use super::cell_ref::CellRef;
use super::token::Operator;

const OPERATORS: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

/// Shape and mix of a generated sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub rows: usize,
    pub cols: usize,
    /// Nesting depth of each infix expression; a cell has `2^depth` literals.
    pub expression_depth: usize,
    /// One literal in this many becomes a cell reference. 0 disables references.
    pub reference_one_in: u32,
    pub separator: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            expression_depth: 3,
            reference_one_in: 39,
            separator: ",".to_string(),
        }
    }
}

/// Build a random infix expression such as `( ( 1 + 2 ) * ( 3 / 4 ) )`.
pub fn random_infix<R: Rng + ?Sized>(depth: usize, rng: &mut R) -> String {
    if depth == 0 {
        return rng.gen_range(0..10).to_string();
    }
    let left = random_infix(depth - 1, rng);
    let right = random_infix(depth - 1, rng);
    let op = OPERATORS.choose(rng).copied().unwrap_or(Operator::Add);
    format!("( {} {} {} )", left, op, right)
}

fn precedence(op: Operator) -> u8 {
    match op {
        Operator::Add | Operator::Sub => 1,
        Operator::Mul | Operator::Div => 2,
    }
}

/// Convert a space separated infix expression to postfix.
///
/// Operators are left associative. Tokens other than parentheses and the
/// four operators are treated as operands and copied through unchanged.
pub fn infix_to_postfix(expression: &str) -> String {
    enum Pending {
        Open,
        Op(Operator),
    }

    let mut output: Vec<String> = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();

    for token in expression.split_whitespace() {
        match token {
            "(" => pending.push(Pending::Open),
            ")" => {
                while let Some(top) = pending.pop() {
                    match top {
                        Pending::Open => break,
                        Pending::Op(op) => output.push(op.to_string()),
                    }
                }
            }
            _ => match Operator::from_token(token) {
                Some(op) => {
                    while let Some(Pending::Op(top)) = pending.last() {
                        if precedence(*top) < precedence(op) {
                            break;
                        }
                        output.push(top.to_string());
                        pending.pop();
                    }
                    pending.push(Pending::Op(op));
                }
                None => output.push(token.to_string()),
            },
        }
    }

    while let Some(top) = pending.pop() {
        if let Pending::Op(op) = top {
            output.push(op.to_string());
        }
    }

    output.join(" ")
}

/// Generate one cell: a random postfix expression with some literals
/// replaced by references into a `rows` x `cols` sheet.
pub fn random_cell<R: Rng + ?Sized>(options: &GenerateOptions, rng: &mut R) -> String {
    let postfix = infix_to_postfix(&random_infix(options.expression_depth, rng));
    if options.reference_one_in == 0 || options.rows == 0 || options.cols == 0 {
        return postfix;
    }

    postfix
        .split(' ')
        .map(|token| {
            if Operator::from_token(token).is_none() && rng.gen_ratio(1, options.reference_one_in) {
                let col = rng.gen_range(0..options.cols);
                let row = rng.gen_range(0..options.rows);
                CellRef::new(col, row).to_string()
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate a whole sheet: rows joined by `\n`, cells by the separator.
pub fn generate_sheet<R: Rng + ?Sized>(options: &GenerateOptions, rng: &mut R) -> String {
    let mut lines = Vec::with_capacity(options.rows);
    for _ in 0..options.rows {
        let cells: Vec<String> = (0..options.cols).map(|_| random_cell(options, rng)).collect();
        lines.push(cells.join(&options.separator));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::eval::Value;
    use crate::engine::sweep::evaluate_grid;
    use crate::engine::token::{is_coordinate, is_number};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_infix_to_postfix() {
        assert_eq!(infix_to_postfix("1 + 2"), "1 2 +");
        assert_eq!(infix_to_postfix("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(infix_to_postfix("( 1 + 2 ) * 3"), "1 2 + 3 *");
        assert_eq!(infix_to_postfix("8 - 3 - 2"), "8 3 - 2 -");
        assert_eq!(infix_to_postfix("( ( 1 / 2 ) - ( 3 * 4 ) )"), "1 2 / 3 4 * -");
    }

    #[test]
    fn test_converted_expression_keeps_its_value() {
        let text = infix_to_postfix("( 2 - 1 ) + 3 * 5 / 10");
        assert_eq!(text, "2 1 - 3 5 * 10 / +");
        assert_eq!(evaluate_grid(&text, ",").output, "2.5");
    }

    #[test]
    fn test_random_infix_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let expression = random_infix(3, &mut rng);
        let tokens: Vec<&str> = expression.split(' ').collect();
        assert_eq!(tokens.iter().filter(|t| is_number(t)).count(), 8);
        assert_eq!(tokens.iter().filter(|t| **t == "(").count(), 7);
        assert_eq!(random_infix(0, &mut rng).len(), 1);
    }

    #[test]
    fn test_references_stay_inside_sheet() {
        let options = GenerateOptions {
            rows: 3,
            cols: 2,
            reference_one_in: 1,
            ..GenerateOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            for token in random_cell(&options, &mut rng).split(' ') {
                if is_coordinate(token) {
                    let cell = CellRef::from_str(token).unwrap();
                    assert!(cell.col < 2 && cell.row < 3, "{token}");
                } else {
                    assert!(Operator::from_token(token).is_some(), "{token}");
                }
            }
        }
    }

    #[test]
    fn test_generated_sheet_shape() {
        let options = GenerateOptions {
            rows: 4,
            cols: 6,
            separator: ";".to_string(),
            ..GenerateOptions::default()
        };
        let sheet = generate_sheet(&options, &mut StdRng::seed_from_u64(3));
        let lines: Vec<&str> = sheet.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.split(';').count() == 6));
    }

    #[test]
    fn test_generated_sheets_evaluate() {
        for seed in 0..20 {
            let options = GenerateOptions {
                rows: 20,
                cols: 20,
                ..GenerateOptions::default()
            };
            let sheet = generate_sheet(&options, &mut StdRng::seed_from_u64(seed));
            let result = evaluate_grid(&sheet, ",");

            assert_eq!(result.cells.len(), 20);
            for row in &result.cells {
                assert_eq!(row.len(), 20);
                for value in row {
                    assert!(
                        matches!(value, Value::Number(_)) || value.is_error(),
                        "seed {seed}: {value:?}"
                    );
                }
            }
            let failed = result.cells.iter().flatten().any(Value::is_error);
            assert_eq!(failed, result.has_errors(), "seed {seed}");
        }
    }
}
