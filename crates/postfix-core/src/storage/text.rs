//! Plain-text sheet input.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;

/// Collapse `\r\n` and lone `\r` to `\n`, and runs of spaces to one space.
pub fn normalize(text: &str) -> String {
    let unix = text.replace("\r\n", "\n").replace('\r', "\n");
    spaces_re().replace_all(&unix, " ").into_owned()
}

/// Read a sheet from `path` and normalize it.
///
/// Trailing line terminators are dropped so a final newline does not add an
/// extra row.
pub fn read_sheet(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    let normalized = normalize(&content);
    Ok(normalized.trim_end_matches('\n').to_string())
}

fn spaces_re() -> &'static Regex {
    static SPACES_RE: OnceLock<Regex> = OnceLock::new();
    SPACES_RE.get_or_init(|| Regex::new(r" {2,}").expect("space run regex must compile"))
}
