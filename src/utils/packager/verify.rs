// launch-time entry point check for a produced artifact

use super::manifest::{MANIFEST_PATH, Manifest, class_entry_path};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// confirm that the manifest's Main-Class is present in the archive
///
/// returns the main class name on success
pub fn verify_entry_point<P: AsRef<Path>>(artifact: P) -> Result<String> {
    let artifact = artifact.as_ref();
    let file = File::open(artifact).map_err(|e| Error::FileReadError {
        path: artifact.to_path_buf(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| Error::archive(artifact, e))?;

    let mut text = String::new();
    match archive.by_name(MANIFEST_PATH) {
        Ok(mut entry) => {
            entry.read_to_string(&mut text)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(Error::Format {
                path: artifact.to_path_buf(),
                line: 0,
                reason: format!("archive has no {}", MANIFEST_PATH),
            });
        }
        Err(e) => return Err(Error::archive(artifact, e)),
    }

    let manifest = Manifest::parse(&text);
    let main_class = manifest
        .main_class()
        .filter(|class| !class.trim().is_empty())
        .ok_or_else(|| Error::Format {
            path: artifact.to_path_buf(),
            line: 0,
            reason: "manifest declares no Main-Class".to_string(),
        })?
        .to_string();

    let class_path = class_entry_path(&main_class);
    if !archive.file_names().any(|name| name == class_path) {
        return Err(Error::ClassNotFound {
            class_name: main_class,
            artifact: artifact.to_path_buf(),
        });
    }

    log::debug!("entry point {} found in {}", main_class, artifact.display());
    Ok(main_class)
}
