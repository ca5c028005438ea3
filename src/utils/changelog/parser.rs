// changelog index parser

use super::config::COMMENT_MARKER;
use super::types::{ChangelogIndex, IndexLine};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// classify every line of an index
///
/// comments are only recognized when the marker is the very first character;
/// an indented `#` line counts as an entry
pub fn parse_index(path: &Path, content: &str) -> ChangelogIndex {
    let mut index = ChangelogIndex::new(path.to_path_buf());

    for (offset, line) in content.lines().enumerate() {
        let line_number = offset + 1;

        if line.trim().is_empty() {
            index.push(IndexLine::Blank { line_number });
        } else if line.starts_with(COMMENT_MARKER) {
            index.push(IndexLine::Comment {
                line_number,
                text: line.to_string(),
            });
        } else {
            index.push(IndexLine::Entry {
                line_number,
                text: line.trim().to_string(),
            });
        }
    }

    index
}

/// read and parse an index file
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<ChangelogIndex> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let index = parse_index(path, &content);
    log::debug!(
        "parsed changelog index {} ({} lines, {} entries)",
        path.display(),
        index.lines.len(),
        index.entry_count()
    );
    Ok(index)
}
