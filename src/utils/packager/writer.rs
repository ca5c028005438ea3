// fat archive writer with first-wins duplicate handling

use super::manifest::{MANIFEST_PATH, Manifest, class_entry_path};
use super::types::{PackageReport, PackageSource, PackageSpec};
use crate::error::{Error, Result};
use crate::utils::filesystem::{FilesystemExplorer, FsFile};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// write the artifact described by `spec`
///
/// the archive is built in a temporary file next to the output and only moved
/// into place once complete
pub fn package(spec: &PackageSpec) -> Result<PackageReport> {
    for source in &spec.sources {
        let path = source.path();
        let present = match source {
            PackageSource::Directory(_) => path.is_dir(),
            PackageSource::Archive(_) => path.is_file(),
        };
        if !present {
            return Err(Error::resource_not_found(path, "package source does not exist"));
        }
    }

    let output_dir = match spec.output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&output_dir).map_err(|e| Error::FileWriteError {
        path: output_dir.clone(),
        source: e,
    })?;

    let mut temp = NamedTempFile::new_in(&output_dir).map_err(|e| Error::FileWriteError {
        path: output_dir.clone(),
        source: e,
    })?;

    let mut manifest = Manifest::new(&spec.main_class);
    if let Some(title) = &spec.implementation_title {
        manifest = manifest.attribute("Implementation-Title", title);
    }
    if let Some(version) = &spec.implementation_version {
        manifest = manifest.attribute("Implementation-Version", version);
    }

    let mut writer = ArchiveWriter::new(temp.as_file_mut(), &spec.output);
    writer.add_bytes(MANIFEST_PATH, manifest.render().as_bytes())?;

    for source in &spec.sources {
        match source {
            PackageSource::Directory(dir) => writer.add_directory_tree(dir)?,
            PackageSource::Archive(archive) => writer.merge_archive(archive)?,
        }
    }

    let entry_point_found = writer.contains(&class_entry_path(&spec.main_class));
    let (entries, excluded) = writer.finish()?;

    temp.persist(&spec.output)
        .map_err(|e| Error::FileWriteError {
            path: spec.output.clone(),
            source: e.error,
        })?;

    let mut artifact = FsFile::new(spec.output.clone(), String::new());
    artifact.metadata_scan()?;
    artifact.hash()?;

    if !entry_point_found {
        log::warn!(
            "entry point {} is not in {}; the artifact will fail at launch",
            spec.main_class,
            spec.output.display()
        );
    }
    log::info!(
        "wrote {} ({} entries, {} duplicates excluded)",
        spec.output.display(),
        entries,
        excluded.len()
    );

    Ok(PackageReport {
        artifact: spec.output.clone(),
        main_class: spec.main_class.clone(),
        entry_point_found,
        entries,
        excluded,
        size: artifact.size.unwrap_or_default(),
        sha256: artifact.sha256.unwrap_or_default(),
    })
}

/// '/'-joined archive name for a relative path, None if it escapes the root
fn entry_name(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

struct ArchiveWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    output: PathBuf,
    seen: HashSet<String>,
    excluded: Vec<String>,
    entries: usize,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    fn new(inner: W, output: &Path) -> Self {
        Self {
            zip: ZipWriter::new(inner),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            output: output.to_path_buf(),
            seen: HashSet::new(),
            excluded: Vec::new(),
            entries: 0,
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    fn zip_error(&self, err: zip::result::ZipError) -> Error {
        Error::archive(&self.output, err)
    }

    /// reserve a file path; later claims of the same path are excluded
    fn claim(&mut self, name: &str) -> bool {
        if self.seen.insert(name.to_string()) {
            true
        } else {
            log::debug!("excluding duplicate entry {}", name);
            self.excluded.push(name.to_string());
            false
        }
    }

    fn add_directory_entry(&mut self, dir: &str) -> Result<()> {
        let dir = format!("{}/", dir.trim_end_matches('/'));
        if self.seen.insert(dir.clone()) {
            self.zip
                .add_directory(dir, self.options)
                .map_err(|e| self.zip_error(e))?;
        }
        Ok(())
    }

    fn add_parents(&mut self, name: &str) -> Result<()> {
        let mut end = 0;
        while let Some(pos) = name[end..].find('/') {
            end += pos;
            self.add_directory_entry(&name[..end])?;
            end += 1;
        }
        Ok(())
    }

    /// start a file entry if its path is still free; false when excluded
    fn start_entry(&mut self, name: &str) -> Result<bool> {
        if !self.claim(name) {
            return Ok(false);
        }
        self.add_parents(name)?;
        self.zip
            .start_file(name, self.options)
            .map_err(|e| self.zip_error(e))?;
        self.entries += 1;
        Ok(true)
    }

    fn add_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        if self.start_entry(name)? {
            self.zip.write_all(bytes)?;
        }
        Ok(())
    }

    fn add_directory_tree(&mut self, dir: &Path) -> Result<()> {
        let explorer = FilesystemExplorer::new(dir);
        let root = explorer.scan_from_root().map_err(|e| Error::FileReadError {
            path: dir.to_path_buf(),
            source: e,
        })?;

        for file in explorer.files(&root) {
            if self.start_entry(&file.relative)? {
                let mut reader = File::open(&file.path).map_err(|e| Error::FileReadError {
                    path: file.path.clone(),
                    source: e,
                })?;
                io::copy(&mut reader, &mut self.zip)?;
            }
        }
        Ok(())
    }

    fn merge_archive(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut archive = ZipArchive::new(file).map_err(|e| Error::archive(path, e))?;
        log::debug!("merging {} ({} entries)", path.display(), archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| Error::archive(path, e))?;
            let name = match entry.enclosed_name().as_deref().and_then(entry_name) {
                Some(name) => name,
                None => {
                    log::warn!("skipping unsafe entry '{}' in {}", entry.name(), path.display());
                    continue;
                }
            };

            if entry.is_dir() {
                self.add_directory_entry(&name)?;
            } else if self.start_entry(&name)? {
                io::copy(&mut entry, &mut self.zip)?;
            }
        }
        Ok(())
    }

    /// finalize the archive, returning the entry count and excluded paths
    fn finish(mut self) -> Result<(usize, Vec<String>)> {
        self.zip.finish().map_err(|e| Error::archive(&self.output, e))?;
        Ok((self.entries, self.excluded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_normalizes_separators() {
        assert_eq!(
            entry_name(Path::new("./org/lwjgl/Version.class")),
            Some("org/lwjgl/Version.class".to_string())
        );
        assert_eq!(entry_name(Path::new("../escape.txt")), None);
        assert_eq!(entry_name(Path::new("/abs/path")), None);
        assert_eq!(entry_name(Path::new(".")), None);
    }
}
