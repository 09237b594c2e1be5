//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed column/row coordinates.
//!
//! Column labels are bijective base-26: `0 -> A`, `25 -> Z`, `26 -> AA`,
//! `701 -> ZZ`, `702 -> AAA`.
//!
//! # Examples
//!
//! ```
//! use postfix_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("b3").unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "b2", "AA10").
    ///
    /// Returns None if the input is not letters followed by digits, if the row
    /// number is 0, or if the column does not fit in a `usize`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let (letters, numbers) = split_coordinate(name)?;
        let col = Self::letters_to_col(letters)?;
        let row = numbers.parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// Inverse of [`CellRef::col_to_letters`]. Case-insensitive.
    pub fn letters_to_col(letters: &str) -> Option<usize> {
        if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        col_acc.checked_sub(1)
    }

    /// The column part of the reference, e.g. "AB" for `AB7`.
    pub fn col_label(&self) -> String {
        Self::col_to_letters(self.col)
    }
}

/// Split a coordinate token into its letter run and digit run.
///
/// The letters are returned as written; callers normalize case.
pub fn split_coordinate(token: &str) -> Option<(&str, &str)> {
    let caps = coordinate_re().captures(token)?;
    let letters = caps.name("letters")?.as_str();
    let numbers = caps.name("numbers")?.as_str();
    Some((letters, numbers))
}

pub(crate) fn coordinate_re() -> &'static Regex {
    static COORD_RE: OnceLock<Regex> = OnceLock::new();
    COORD_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("coordinate regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_col_to_letters_known_labels() {
        assert_eq!(CellRef::col_to_letters(0), "A");
        assert_eq!(CellRef::col_to_letters(10), "K");
        assert_eq!(CellRef::col_to_letters(25), "Z");
        assert_eq!(CellRef::col_to_letters(26), "AA");
        assert_eq!(CellRef::col_to_letters(51), "AZ");
        assert_eq!(CellRef::col_to_letters(52), "BA");
        assert_eq!(CellRef::col_to_letters(701), "ZZ");
        assert_eq!(CellRef::col_to_letters(702), "AAA");
    }

    #[test]
    fn test_parse_a1_is_case_insensitive() {
        assert_eq!(CellRef::from_str("a1"), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::from_str("aB12"), Some(CellRef::new(27, 11)));
        assert_eq!(CellRef::from_str("ab12").unwrap().to_string(), "AB12");
    }

    #[test]
    fn test_parse_a1_rejects_malformed() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("A").is_none());
        assert!(CellRef::from_str("12").is_none());
        assert!(CellRef::from_str("1A").is_none());
        assert!(CellRef::from_str("A1B").is_none());
        assert!(CellRef::from_str("A-1").is_none());
        assert!(CellRef::from_str("A 1").is_none());
    }

    #[test]
    fn test_parse_a1_row_zero_returns_none() {
        assert!(CellRef::from_str("A0").is_none());
    }

    #[test]
    fn test_parse_a1_keeps_leading_zero_rows() {
        assert_eq!(CellRef::from_str("C007"), Some(CellRef::new(2, 6)));
    }

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::from_str(&huge).is_none());
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_split_coordinate() {
        assert_eq!(split_coordinate("ab12"), Some(("ab", "12")));
        assert_eq!(split_coordinate("12ab"), None);
    }

    proptest! {
        #[test]
        fn label_round_trips_through_parser(col in 0usize..20_000) {
            let label = CellRef::col_to_letters(col);
            let parsed = CellRef::from_str(&format!("{}1", label)).unwrap();
            prop_assert_eq!(parsed.col, col);
            prop_assert_eq!(parsed.col_label(), label);
        }

        #[test]
        fn labels_are_strictly_increasing(col in 0usize..20_000) {
            let a = CellRef::col_to_letters(col);
            let b = CellRef::col_to_letters(col + 1);
            prop_assert!((a.len(), &a) < (b.len(), &b));
        }
    }
}
