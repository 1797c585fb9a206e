//! Error types for directory digesting.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building a digest tree.
///
/// A build is all-or-nothing: any of these aborts the whole traversal.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The path could not be stat-ed or listed (not found, permission denied, ...)
    #[error("cannot access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The entry's content could not be opened or read
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl DigestError {
    pub(crate) fn access(path: &Path, source: std::io::Error) -> Self {
        DigestError::Access {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        DigestError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The filesystem path that failed, if this error came from the traversal
    pub fn path(&self) -> Option<&Path> {
        match self {
            DigestError::Access { path, .. } | DigestError::Read { path, .. } => Some(path),
            DigestError::Config(_) | DigestError::Output(_) => None,
        }
    }

    /// The underlying OS error kind, if any
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            DigestError::Access { source, .. } | DigestError::Read { source, .. } => {
                Some(source.kind())
            }
            DigestError::Config(_) | DigestError::Output(_) => None,
        }
    }
}

impl From<config::ConfigError> for DigestError {
    fn from(err: config::ConfigError) -> Self {
        DigestError::Config(err.to_string())
    }
}
