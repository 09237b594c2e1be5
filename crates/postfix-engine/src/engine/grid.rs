//! Grid construction from delimited text.
//!
//! A [`Grid`] is built once per evaluation run and never mutated afterwards.
//! Each [`Row`] keeps its raw fields in input order, so the field at position
//! `i` is the cell in column [`CellRef::col_to_letters(i)`](CellRef::col_to_letters).

use super::cell_ref::CellRef;

/// One line of input split into raw cell expressions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Row {
        Row { cells }
    }

    /// Raw expression at a zero-based column index.
    pub fn get(&self, col: usize) -> Option<&str> {
        self.cells.get(col).map(String::as_str)
    }

    /// Raw expression for a column label such as "B" or "aa".
    pub fn get_label(&self, label: &str) -> Option<&str> {
        CellRef::letters_to_col(label).and_then(|col| self.get(col))
    }

    /// Column labels present in this row, in order.
    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.cells.len()).map(CellRef::col_to_letters)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(String::as_str)
    }
}

/// Row-major collection of raw cell expressions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Split `text` on `\n` into rows and each row on `separator` into cells.
    ///
    /// Fields are not trimmed. A trailing newline yields a final row holding a
    /// single empty cell. An empty separator keeps each line as one cell.
    pub fn build(text: &str, separator: &str) -> Grid {
        let rows = text
            .split('\n')
            .map(|line| {
                let cells = if separator.is_empty() {
                    vec![line.to_string()]
                } else {
                    line.split(separator).map(str::to_string).collect()
                };
                Row::new(cells)
            })
            .collect();
        Grid { rows }
    }

    /// Raw expression stored at `cell`, or None when the reference is outside the grid.
    pub fn get(&self, cell: &CellRef) -> Option<&str> {
        self.rows.get(cell.row).and_then(|row| row.get(cell.col))
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows, including a trailing empty one.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every cell coordinate in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| (0..cells.len()).map(move |col| CellRef::new(col, row)))
    }
}
