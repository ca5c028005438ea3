// packaging inputs and results

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// something whose contents are flattened into the artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum PackageSource {
    /// files added with paths relative to the directory
    Directory(PathBuf),
    /// entries copied out of an existing zip/jar
    Archive(PathBuf),
}

impl PackageSource {
    /// directories stay directories, anything else is read as an archive
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            PackageSource::Directory(path)
        } else {
            PackageSource::Archive(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PackageSource::Directory(path) | PackageSource::Archive(path) => path,
        }
    }
}

/// everything needed to write one artifact
#[derive(Debug, Clone)]
pub struct PackageSpec {
    pub output: PathBuf,
    pub main_class: String,
    pub implementation_title: Option<String>,
    pub implementation_version: Option<String>,
    /// added in order; earlier sources win on duplicate paths
    pub sources: Vec<PackageSource>,
}

impl PackageSpec {
    pub fn new(output: impl Into<PathBuf>, main_class: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            main_class: main_class.into(),
            implementation_title: None,
            implementation_version: None,
            sources: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.implementation_title = Some(title.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.implementation_version = Some(version.into());
        self
    }

    pub fn source(mut self, source: PackageSource) -> Self {
        self.sources.push(source);
        self
    }
}

/// result of writing an artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageReport {
    pub artifact: PathBuf,
    pub main_class: String,
    pub entry_point_found: bool,
    /// number of file entries written, manifest included
    pub entries: usize,
    /// later duplicates that were dropped, in encounter order
    pub excluded: Vec<String>,
    pub size: u64,
    pub sha256: String,
}
