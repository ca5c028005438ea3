use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum FsElement {
    File(FsFile),
    Directory(FsDirectory),
}

/// true when `name` stays a single path component once joined to a directory
pub fn is_single_component(name: &str) -> bool {
    !name.contains(['/', '\\']) && !name.contains("..")
}

// a file found during a scan, abstracted from the FS
#[derive(Debug, Clone)]
pub struct FsFile {
    pub path: PathBuf,
    // '/'-separated path relative to the scan root
    pub relative: String,
    pub size: Option<u64>,
    pub sha256: Option<String>,
}

impl FsFile {
    pub fn new(path: PathBuf, relative: String) -> Self {
        FsFile {
            path,
            relative,
            size: None,
            sha256: None,
        }
    }

    pub fn metadata_scan(&mut self) -> Result<(), std::io::Error> {
        self.size = Some(std::fs::metadata(&self.path)?.len());
        Ok(())
    }

    pub fn hash(&mut self) -> Result<(), std::io::Error> {
        use sha2::{Digest, Sha256};
        use std::fs::File;
        use std::io::Read;

        let mut file = File::open(&self.path)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];
        loop {
            let read = file.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }
        self.sha256 = Some(hex::encode(hasher.finalize()));
        Ok(())
    }
}

// a scanned directory with its children
#[derive(Debug, Clone)]
pub struct FsDirectory {
    pub path: PathBuf,
    pub relative: String,
    pub elements: Vec<FsElement>,
    pub is_root: bool,
}

impl FsDirectory {
    pub fn new(path: PathBuf, relative: String) -> Self {
        FsDirectory {
            path,
            relative,
            elements: Vec::new(),
            is_root: false,
        }
    }

    pub fn new_root(path: PathBuf) -> Self {
        FsDirectory {
            path,
            relative: String::new(),
            elements: Vec::new(),
            is_root: true,
        }
    }

    /// join a child name onto this directory's relative path
    pub fn child_relative(&self, name: &str) -> String {
        if self.relative.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.relative, name)
        }
    }
}
