// version resolution from a changelog index

use super::config::{SuffixPolicy, VersionConfig, VersionSource};
use super::parser::load_index;
use super::types::{ChangelogIndex, ResolvedVersion};
use crate::error::{Error, Result};
use crate::utils::filesystem::is_single_component;
use std::path::Path;

/// select the last entry of the index and strip the configured suffix
pub fn resolve_version(index: &ChangelogIndex, config: &VersionConfig) -> Result<ResolvedVersion> {
    let (line_number, entry) = index.latest_entry().ok_or_else(|| {
        Error::configuration(format!(
            "changelog index {} has no version entries",
            index.path.display()
        ))
    })?;

    let (version, suffix_stripped) = match entry.strip_suffix(config.suffix.as_str()) {
        _ if config.suffix.is_empty() => (entry, false),
        Some(stripped) => (stripped, true),
        None => match config.suffix_policy {
            SuffixPolicy::PassThrough => {
                log::warn!(
                    "{}:{}: entry '{}' does not end with '{}', using it unchanged",
                    index.path.display(),
                    line_number,
                    entry,
                    config.suffix
                );
                (entry, false)
            }
            SuffixPolicy::Strict => {
                return Err(Error::Format {
                    path: index.path.clone(),
                    line: line_number,
                    reason: format!("entry '{}' does not end with '{}'", entry, config.suffix),
                });
            }
        },
    };

    if version.is_empty() {
        return Err(Error::Format {
            path: index.path.clone(),
            line: line_number,
            reason: format!("entry '{}' leaves an empty version", entry),
        });
    }

    // the version ends up in the artifact file name
    if !is_single_component(version) {
        return Err(Error::Format {
            path: index.path.clone(),
            line: line_number,
            reason: format!("version '{}' must not contain '/', '\\' or '..'", version),
        });
    }

    Ok(ResolvedVersion {
        version: version.to_string(),
        source_entry: Some(entry.to_string()),
        line_number: Some(line_number),
        suffix_stripped,
    })
}

/// resolve a unit's version, reading the index relative to `root` when needed
pub fn resolve_source<P: AsRef<Path>>(root: P, source: &VersionSource) -> Result<ResolvedVersion> {
    match source {
        VersionSource::Fixed { fixed } => {
            if fixed.trim().is_empty() {
                return Err(Error::configuration("fixed version must not be blank"));
            }
            if !is_single_component(fixed) {
                return Err(Error::configuration(format!(
                    "fixed version '{}' must not contain '/', '\\' or '..'",
                    fixed
                )));
            }
            Ok(ResolvedVersion::fixed(fixed.clone()))
        }
        VersionSource::Changelog(config) => {
            let index = load_index(root.as_ref().join(&config.changelog))?;
            let resolved = resolve_version(&index, config)?;
            log::info!(
                "resolved version {} from {} line {}",
                resolved,
                index.path.display(),
                resolved.line_number.unwrap_or_default()
            );
            Ok(resolved)
        }
    }
}
