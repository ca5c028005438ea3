// changelog index configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// suffix carried by every entry of the changelog index (e.g. "v1.4.md")
pub const DEFAULT_ENTRY_SUFFIX: &str = ".md";

/// marker that starts a comment line in the changelog index
pub const COMMENT_MARKER: char = '#';

/// what to do when the selected entry does not end with the configured suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SuffixPolicy {
    /// use the entry unchanged and log a warning
    #[default]
    PassThrough,
    /// fail with a format error
    Strict,
}

impl std::str::FromStr for SuffixPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pass-through" | "passthrough" => Ok(SuffixPolicy::PassThrough),
            "strict" => Ok(SuffixPolicy::Strict),
            _ => Err(format!(
                "invalid suffix policy: {}, use 'pass-through' or 'strict'",
                s
            )),
        }
    }
}

/// configuration for resolving a version from a changelog index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConfig {
    /// path of the index file, relative to the project root
    pub changelog: PathBuf,

    /// suffix stripped from the selected entry (default: ".md")
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// behavior when the suffix is missing
    #[serde(default)]
    pub suffix_policy: SuffixPolicy,
}

fn default_suffix() -> String {
    DEFAULT_ENTRY_SUFFIX.to_string()
}

impl VersionConfig {
    pub fn new(changelog: impl Into<PathBuf>) -> Self {
        Self {
            changelog: changelog.into(),
            suffix: default_suffix(),
            suffix_policy: SuffixPolicy::default(),
        }
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn suffix_policy(mut self, policy: SuffixPolicy) -> Self {
        self.suffix_policy = policy;
        self
    }
}

/// where a build unit takes its version from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionSource {
    /// derived from a changelog index
    Changelog(VersionConfig),
    /// hardcoded literal
    Fixed { fixed: String },
}

impl VersionSource {
    pub fn fixed(version: impl Into<String>) -> Self {
        VersionSource::Fixed {
            fixed: version.into(),
        }
    }
}
