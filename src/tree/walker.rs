//! Single-level directory listing for the tree builder

use crate::error::DigestError;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One directory entry with its non-following metadata
#[derive(Debug, Clone)]
pub struct ListedEntry {
    pub path: PathBuf,
    pub name: String,
    pub metadata: Metadata,
}

/// Stat the root named by the caller, following a symlink.
///
/// Only the root is resolved this way; entries found while listing keep
/// their non-following metadata.
pub fn root_metadata(path: &Path) -> Result<Metadata, DigestError> {
    std::fs::metadata(path).map_err(|e| DigestError::access(path, e))
}

/// List the immediate entries of `dir`.
///
/// Metadata is resolved once per entry with the non-following variant, so a
/// symlink to a directory is reported as a symlink. The returned order is
/// whatever the filesystem yields; callers must not rely on it.
pub fn list_directory(dir: &Path) -> Result<Vec<ListedEntry>, DigestError> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false);

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        let metadata = entry.metadata().map_err(|e| walk_error(entry.path(), e))?;

        entries.push(ListedEntry {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().to_string(),
            metadata,
        });
    }

    Ok(entries)
}

/// Convert a walkdir error into an access error naming the failing path
fn walk_error(fallback: &Path, err: walkdir::Error) -> DigestError {
    let path = err.path().unwrap_or(fallback).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    DigestError::Access { path, source }
}
