//! Reading sheet text from disk.

mod text;

pub use text::{normalize, read_sheet};
