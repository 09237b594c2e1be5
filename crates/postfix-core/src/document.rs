//! A sheet ready for evaluation.

use postfix_engine::engine::{EvalOptions, SweepResult, evaluate_grid_with_options};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::storage::{normalize, read_sheet};

/// Normalized sheet text plus the separator used to split it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    text: String,
    separator: String,
}

impl Document {
    /// Build a document from in-memory text, normalizing it first.
    pub fn from_text(text: &str, separator: &str) -> Document {
        Document {
            text: normalize(text),
            separator: separator.to_string(),
        }
    }

    /// Read and normalize a sheet file.
    pub fn open(path: &Path, separator: &str) -> Result<Document> {
        let text = read_sheet(path)?;
        info!(path = %path.display(), rows = text.split('\n').count(), "loaded sheet");
        Ok(Document {
            text,
            separator: separator.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Evaluate every cell. Identical documents always give identical results.
    pub fn evaluate(&self, options: &EvalOptions) -> SweepResult {
        evaluate_grid_with_options(&self.text, &self.separator, options)
    }
}
