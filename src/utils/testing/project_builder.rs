// builder for creating test projects on disk

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// a dependency archive to be written into the project
#[derive(Debug, Clone)]
pub struct TestArchive {
    pub path: String,
    pub entries: Vec<(String, Vec<u8>)>, // entry name -> content
}

impl TestArchive {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.entries.push((name.into(), content.into()));
        self
    }

    /// add an empty `.class` entry for a binary class name
    pub fn class(self, class_name: &str) -> Self {
        let name = format!("{}.class", class_name.replace('.', "/"));
        self.entry(name, vec![0xCAu8, 0xFE, 0xBA, 0xBE])
    }
}

/// builder for test projects
pub struct TestProjectBuilder {
    files: BTreeMap<String, Vec<u8>>, // relative path -> content
    archives: Vec<TestArchive>,
}

impl TestProjectBuilder {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            archives: Vec::new(),
        }
    }

    pub fn file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// write the project file
    pub fn config(self, toml: &str) -> Self {
        self.file(crate::utils::config::CONFIG_FILE_NAME, toml)
    }

    /// write a changelog index from its lines
    pub fn changelog(self, path: impl Into<String>, lines: &[&str]) -> Self {
        let mut content = lines.join("\n");
        content.push('\n');
        self.file(path, content)
    }

    /// add an empty compiled class below `classes_dir`
    pub fn class(self, classes_dir: &str, class_name: &str) -> Self {
        let path = format!(
            "{}/{}.class",
            classes_dir.trim_end_matches('/'),
            class_name.replace('.', "/")
        );
        self.file(path, vec![0xCAu8, 0xFE, 0xBA, 0xBE])
    }

    pub fn archive(mut self, archive: TestArchive) -> Self {
        self.archives.push(archive);
        self
    }

    pub fn build(self) -> Result<TestProject, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();

        for (relative, content) in &self.files {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }

        for archive in &self.archives {
            Self::write_archive(&root.join(&archive.path), archive)?;
        }

        Ok(TestProject {
            path: root,
            _temp_dir: temp_dir,
        })
    }

    fn write_archive(path: &Path, archive: &TestArchive) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut zip = ZipWriter::new(File::create(path)?);
        for (name, content) in &archive.entries {
            zip.start_file(name.as_str(), SimpleFileOptions::default())?;
            zip.write_all(content)?;
        }
        zip.finish()?;
        Ok(())
    }
}

impl Default for TestProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// a built test project, removed when dropped
pub struct TestProject {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TestProject {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }
}
