// copies a resource directory into staging, expanding filtered files

use super::properties::BuildProperties;
use super::template::expand_template;
use crate::error::{Error, Result};
use crate::utils::filesystem::{FilesystemExplorer, matches_relative};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// resource files whose `/`-relative path matches the glob `pattern` get
/// placeholder expansion; `*` stops at `/`, so use `**/name` for nested files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    pub pattern: String,
}

impl FilterRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn compile(&self) -> Result<Pattern> {
        Pattern::new(&self.pattern).map_err(|e| {
            Error::configuration(format!("invalid resource filter '{}': {}", self.pattern, e))
        })
    }
}

/// outcome of processing one resource directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceReport {
    #[serde(skip)]
    pub staging_dir: PathBuf,
    /// relative paths of every staged file
    pub staged: Vec<String>,
    /// relative paths of the files that went through expansion
    pub expanded: Vec<String>,
}

/// copy `resources_dir` into `staging_dir`, expanding files matched by `filters`
///
/// every rule must match at least one file; a missing resource directory is
/// only an error when there are rules to apply
pub fn process_resources(
    resources_dir: Option<&Path>,
    staging_dir: &Path,
    filters: &[FilterRule],
    properties: &BuildProperties,
) -> Result<ResourceReport> {
    let mut report = ResourceReport {
        staging_dir: staging_dir.to_path_buf(),
        ..Default::default()
    };

    let resources_dir = match resources_dir {
        Some(dir) if dir.is_dir() => dir,
        Some(dir) if !filters.is_empty() => {
            return Err(Error::resource_not_found(dir, "resource directory does not exist"));
        }
        None if !filters.is_empty() => {
            return Err(Error::configuration(
                "resource filters are configured but no resource directory is set",
            ));
        }
        Some(dir) => {
            log::debug!("resource directory {} does not exist, skipping", dir.display());
            return Ok(report);
        }
        None => return Ok(report),
    };

    let patterns = filters
        .iter()
        .map(FilterRule::compile)
        .collect::<Result<Vec<_>>>()?;

    let explorer = FilesystemExplorer::new(resources_dir);
    let root = explorer.scan_from_root().map_err(|e| Error::FileReadError {
        path: resources_dir.to_path_buf(),
        source: e,
    })?;

    for (rule, pattern) in filters.iter().zip(&patterns) {
        if explorer.find_files_matching(&root, pattern).is_empty() {
            return Err(Error::resource_not_found(
                resources_dir.join(&rule.pattern),
                format!("no resource matches filter '{}'", rule.pattern),
            ));
        }
    }

    for file in explorer.files(&root) {
        let target = staging_dir.join(&file.relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::FileWriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let filtered = patterns
            .iter()
            .any(|pattern| matches_relative(pattern, &file.relative));

        if filtered {
            let text = fs::read_to_string(&file.path).map_err(|e| Error::FileReadError {
                path: file.path.clone(),
                source: e,
            })?;
            let expanded = expand_template(&file.path, &text, properties)?;
            fs::write(&target, expanded).map_err(|e| Error::FileWriteError {
                path: target.clone(),
                source: e,
            })?;
            log::info!("expanded resource {}", file.relative);
            report.expanded.push(file.relative.clone());
        } else {
            fs::copy(&file.path, &target).map_err(|e| Error::FileWriteError {
                path: target.clone(),
                source: e,
            })?;
        }
        report.staged.push(file.relative.clone());
    }

    log::debug!(
        "staged {} resources ({} expanded) into {}",
        report.staged.len(),
        report.expanded.len(),
        staging_dir.display()
    );
    Ok(report)
}
