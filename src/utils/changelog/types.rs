// changelog index data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// a single classified line of the changelog index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IndexLine {
    Blank { line_number: usize },
    Comment { line_number: usize, text: String },
    Entry { line_number: usize, text: String },
}

impl IndexLine {
    pub fn line_number(&self) -> usize {
        match self {
            IndexLine::Blank { line_number }
            | IndexLine::Comment { line_number, .. }
            | IndexLine::Entry { line_number, .. } => *line_number,
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, IndexLine::Entry { .. })
    }
}

/// the parsed changelog index, newest entry last
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogIndex {
    pub path: PathBuf,
    pub lines: Vec<IndexLine>,
}

impl ChangelogIndex {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: IndexLine) {
        self.lines.push(line);
    }

    /// all entry lines as (line number, text), in file order
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().filter_map(|line| match line {
            IndexLine::Entry { line_number, text } => Some((*line_number, text.as_str())),
            _ => None,
        })
    }

    /// the authoritative current entry
    pub fn latest_entry(&self) -> Option<(usize, &str)> {
        self.entries().last()
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }
}

/// version string derived from the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVersion {
    pub version: String,
    /// index entry the version came from; None for fixed versions
    pub source_entry: Option<String>,
    pub line_number: Option<usize>,
    pub suffix_stripped: bool,
}

impl ResolvedVersion {
    pub fn fixed(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            source_entry: None,
            line_number: None,
            suffix_stripped: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}
