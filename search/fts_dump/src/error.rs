//! Errors reported by the dump tool.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong between the command line and the report.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("cannot find file '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("error reading '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing command")]
    MissingCommand,

    #[error("unknown command '{0}', expected one of: tokens, markers, stats")]
    UnknownCommand(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },

    #[error("missing file path")]
    MissingPath,

    #[error("no _MARKER_{threshold} in '{}'", path.display())]
    MarkerNotFound { threshold: i64, path: PathBuf },

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

impl DumpError {
    /// Map an I/O failure on `path` to the most specific variant.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => DumpError::NotFound { path },
            io::ErrorKind::PermissionDenied => DumpError::PermissionDenied { path },
            _ => DumpError::Read { path, source: err },
        }
    }
}
