//! Token classification for postfix expressions.
//!
//! A token is exactly one of a number literal, a coordinate reference or an
//! arithmetic operator. Anything else is [`Token::Unknown`] and is skipped by
//! the evaluator without a diagnostic.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::cell_ref::{CellRef, coordinate_re};

/// One of the four binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_token(token: &str) -> Option<Operator> {
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    /// Apply the operator with IEEE-754 semantics; `x / 0` is infinite or NaN.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A classified expression token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    /// A syntactically valid reference. `None` when it cannot address a cell
    /// (row 0, or a column too large to index).
    Coordinate(Option<CellRef>),
    Operator(Operator),
    Unknown,
}

impl Token {
    pub fn classify(token: &str) -> Token {
        if is_number(token) {
            match token.parse::<f64>() {
                Ok(n) => Token::Number(n),
                Err(_) => Token::Unknown,
            }
        } else if is_coordinate(token) {
            Token::Coordinate(CellRef::from_str(token))
        } else if let Some(op) = Operator::from_token(token) {
            Token::Operator(op)
        } else {
            Token::Unknown
        }
    }
}

/// Decimal literal: optional leading `-`, then digits with an optional
/// fraction, or a bare fraction such as `.5`. No exponent, no `+` sign.
pub fn is_number(token: &str) -> bool {
    number_re().is_match(token)
}

/// One or more ASCII letters followed by one or more digits.
pub fn is_coordinate(token: &str) -> bool {
    coordinate_re().is_match(token)
}

pub fn is_operator(token: &str) -> bool {
    Operator::from_token(token).is_some()
}

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| {
        Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("number regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_number() {
        for token in ["0", "5", "-5", "12.5", "-0.25", "3.", ".5", "-.5", "007"] {
            assert!(is_number(token), "{token} should be a number");
        }
        for token in ["", "-", ".", "-.", "+5", "1e3", "D2", "2D", "1.2.3", "inf", "NaN", " 1"] {
            assert!(!is_number(token), "{token} should not be a number");
        }
    }

    #[test]
    fn test_is_coordinate() {
        assert!(is_coordinate("A1"));
        assert!(is_coordinate("zz99"));
        assert!(is_coordinate("A0"));
        assert!(!is_coordinate("A"));
        assert!(!is_coordinate("1A"));
        assert!(!is_coordinate("A1+"));
        assert!(!is_coordinate("A1.5"));
    }

    #[test]
    fn test_is_operator() {
        for token in ["+", "-", "*", "/"] {
            assert!(is_operator(token));
        }
        for token in ["", "^", "%", "++", "x", "1"] {
            assert!(!is_operator(token));
        }
    }

    #[test]
    fn test_classes_are_mutually_exclusive() {
        for token in ["1", "-1", "A1", "+", "-", "*", "/", "abc", "", "?"] {
            let hits = [is_number(token), is_coordinate(token), is_operator(token)]
                .iter()
                .filter(|hit| **hit)
                .count();
            assert!(hits <= 1, "{token} matched {hits} classes");
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Token::classify("-2.5"), Token::Number(-2.5));
        assert_eq!(Token::classify("b2"), Token::Coordinate(Some(CellRef::new(1, 1))));
        assert_eq!(Token::classify("A0"), Token::Coordinate(None));
        assert_eq!(Token::classify("/"), Token::Operator(Operator::Div));
        assert_eq!(Token::classify("#"), Token::Unknown);
        assert_eq!(Token::classify(""), Token::Unknown);
    }

    #[test]
    fn test_apply_division_by_zero_is_not_an_error() {
        assert!(Operator::Div.apply(1.0, 0.0).is_infinite());
        assert!(Operator::Div.apply(0.0, 0.0).is_nan());
    }
}
