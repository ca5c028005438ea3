use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    FileWriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    Configuration {
        reason: String,
    },
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    ResourceNotFound {
        path: PathBuf,
        reason: String,
    },
    Template {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },
    ClassNotFound {
        class_name: String,
        artifact: PathBuf,
    },
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileReadError { path, source } => {
                write!(f, "failed to read file: {} ({})", path.display(), source)
            }
            Error::FileWriteError { path, source } => {
                write!(f, "failed to write file: {} ({})", path.display(), source)
            }
            Error::TomlParseError { path, source } => {
                write!(
                    f,
                    "failed to parse toml file: {} ({})",
                    path.display(),
                    source
                )
            }
            Error::Configuration { reason } => {
                write!(f, "configuration error: {}", reason)
            }
            Error::Format { path, line, reason } => {
                write!(
                    f,
                    "format error at {}:{}: {}",
                    path.display(),
                    line,
                    reason
                )
            }
            Error::ResourceNotFound { path, reason } => {
                write!(f, "resource not found: {} ({})", path.display(), reason)
            }
            Error::Template { path, line, reason } => {
                write!(
                    f,
                    "template error at {}:{}: {}",
                    path.display(),
                    line,
                    reason
                )
            }
            Error::Archive { path, source } => {
                write!(f, "archive error in {}: {}", path.display(), source)
            }
            Error::ClassNotFound {
                class_name,
                artifact,
            } => {
                write!(
                    f,
                    "entry point class {} not found in {}",
                    class_name,
                    artifact.display()
                )
            }
            Error::IoError(err) => {
                write!(f, "io error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileReadError { source, .. } => Some(source),
            Error::FileWriteError { source, .. } => Some(source),
            Error::TomlParseError { source, .. } => Some(source),
            Error::Archive { source, .. } => Some(source),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

// Helper constructors for the variants built in many places
impl Error {
    pub fn configuration(reason: impl Into<String>) -> Self {
        Error::Configuration {
            reason: reason.into(),
        }
    }

    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Error::Archive {
            path: path.into(),
            source,
        }
    }

    pub fn resource_not_found(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ResourceNotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
