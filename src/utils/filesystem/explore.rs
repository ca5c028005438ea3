use crate::utils::filesystem::types::*;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::PathBuf;

pub struct FilesystemExplorer {
    pub root_path: PathBuf,
}

impl FilesystemExplorer {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        FilesystemExplorer {
            root_path: root_path.into(),
        }
    }

    pub fn scan_from_root(&self) -> Result<FsDirectory, std::io::Error> {
        let mut directory = FsDirectory::new_root(self.root_path.clone());
        Self::scan_directory_recursive(&mut directory)?;
        Ok(directory)
    }

    // children are sorted by name so every walk is deterministic
    fn scan_directory_recursive(directory: &mut FsDirectory) -> Result<(), std::io::Error> {
        let mut entries = fs::read_dir(&directory.path)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let relative = directory.child_relative(&name);

            if path.is_file() {
                directory
                    .elements
                    .push(FsElement::File(FsFile::new(path, relative)));
            } else if path.is_dir() {
                let mut subdir = FsDirectory::new(path, relative);
                Self::scan_directory_recursive(&mut subdir)?;
                directory.elements.push(FsElement::Directory(subdir));
            }
        }

        Ok(())
    }

    /// every file below `directory`, in walk order
    pub fn files<'a>(&self, directory: &'a FsDirectory) -> Vec<&'a FsFile> {
        let mut files = Vec::new();
        Self::files_recursive(directory, &mut files);
        files
    }

    fn files_recursive<'a>(directory: &'a FsDirectory, files: &mut Vec<&'a FsFile>) {
        for element in &directory.elements {
            match element {
                FsElement::File(file) => files.push(file),
                FsElement::Directory(dir) => Self::files_recursive(dir, files),
            }
        }
    }

    /// files whose `/`-relative path matches `pattern`
    ///
    /// `*` and `?` stop at `/`, so a bare name only matches at the scan root;
    /// nested files need `**/name`
    pub fn find_files_matching<'a>(
        &self,
        directory: &'a FsDirectory,
        pattern: &Pattern,
    ) -> Vec<&'a FsFile> {
        self.files(directory)
            .into_iter()
            .filter(|file| matches_relative(pattern, &file.relative))
            .collect()
    }

    pub fn count_elements(&self, directory: &FsDirectory) -> (usize, usize) {
        let mut file_count = 0;
        let mut dir_count = 0;
        Self::count_elements_recursive(directory, &mut file_count, &mut dir_count);
        (file_count, dir_count)
    }

    fn count_elements_recursive(
        directory: &FsDirectory,
        file_count: &mut usize,
        dir_count: &mut usize,
    ) {
        for element in &directory.elements {
            match element {
                FsElement::File(_) => *file_count += 1,
                FsElement::Directory(dir) => {
                    *dir_count += 1;
                    Self::count_elements_recursive(dir, file_count, dir_count);
                }
            }
        }
    }
}

const RELATIVE_PATH_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// match a `/`-relative path the way `find_files_matching` does
pub fn matches_relative(pattern: &Pattern, relative: &str) -> bool {
    pattern.matches_with(relative, RELATIVE_PATH_MATCH)
}
