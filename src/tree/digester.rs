//! Entry digester: turns one filesystem entry into a leaf node or a pending directory

use crate::error::DigestError;
use crate::tree::hasher;
use crate::tree::node::{DigestNode, DirectoryNode, FileNode, LeafKind};
use crate::types::Digest;
use chrono::{DateTime, Utc};
use std::fs::{File, Metadata};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of digesting a single entry
#[derive(Debug)]
pub enum Entry {
    /// A finished leaf: regular file, symlink or special file
    Leaf(FileNode),
    /// A directory waiting for its children
    Directory(PendingDirectory),
}

/// A directory whose metadata is known but whose children are not.
///
/// Carries no size or digest; the only way to obtain a `DirectoryNode` is
/// [`PendingDirectory::complete`].
#[derive(Debug, Clone)]
pub struct PendingDirectory {
    pub path: PathBuf,
    pub name: String,
    pub mod_time: DateTime<Utc>,
    pub mode: u32,
}

impl PendingDirectory {
    /// Aggregate fully-digested children into a finished directory node.
    ///
    /// Children are sorted by path (byte order) before anything is computed,
    /// whatever order they arrive in.
    pub fn complete(self, mut children: Vec<DigestNode>) -> DirectoryNode {
        children.sort_by(|a, b| a.path().as_os_str().cmp(b.path().as_os_str()));

        let size = children.iter().map(DigestNode::size).sum();
        let digest = hasher::aggregate_children(children.iter().map(DigestNode::digest));

        DirectoryNode {
            path: self.path,
            name: self.name,
            size,
            mod_time: self.mod_time,
            mode: self.mode,
            digest,
            children,
        }
    }
}

/// Digest one entry given metadata from a single non-following stat.
///
/// Regular files are streamed through SHA-256; symlinks hash their target
/// string; special files are never opened and hash as empty. Directories are
/// returned pending.
pub fn digest_entry(path: &Path, metadata: &Metadata) -> Result<Entry, DigestError> {
    let name = entry_name(path);
    let mod_time = modification_time(path, metadata)?;
    let mode = mode_of(metadata);
    let file_type = metadata.file_type();

    if file_type.is_dir() {
        return Ok(Entry::Directory(PendingDirectory {
            path: path.to_path_buf(),
            name,
            mod_time,
            mode,
        }));
    }

    let (kind, digest, size) = if file_type.is_symlink() {
        let (digest, size) = digest_symlink(path)?;
        (LeafKind::Symlink, digest, size)
    } else if file_type.is_file() {
        let (digest, size) = digest_file(path)?;
        if size != metadata.len() {
            warn!(
                path = %path.display(),
                stat_size = metadata.len(),
                hashed_size = size,
                "File size changed while hashing; using bytes hashed"
            );
        }
        (LeafKind::Regular, digest, size)
    } else {
        (LeafKind::Special, hasher::empty_digest(), 0)
    };

    Ok(Entry::Leaf(FileNode {
        path: path.to_path_buf(),
        name,
        kind,
        size,
        mod_time,
        mode,
        digest,
    }))
}

/// Stream a regular file's bytes through SHA-256
fn digest_file(path: &Path) -> Result<(Digest, u64), DigestError> {
    let file = File::open(path).map_err(|e| DigestError::read(path, e))?;
    hasher::hash_reader(file).map_err(|e| DigestError::read(path, e))
}

/// Hash a symlink's target string without following it
fn digest_symlink(path: &Path) -> Result<(Digest, u64), DigestError> {
    let target = std::fs::read_link(path).map_err(|e| DigestError::read(path, e))?;
    let bytes = link_target_bytes(&target);
    Ok((hasher::compute_content_hash(&bytes), bytes.len() as u64))
}

#[cfg(unix)]
fn link_target_bytes(target: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    target.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn link_target_bytes(target: &Path) -> Vec<u8> {
    target.to_string_lossy().into_owned().into_bytes()
}

/// Base name of a path, or the path as given when it has none (".", "/")
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn modification_time(path: &Path, metadata: &Metadata) -> Result<DateTime<Utc>, DigestError> {
    metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .map_err(|e| DigestError::access(path, e))
}

#[cfg(unix)]
fn mode_of(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn mode_of(metadata: &Metadata) -> u32 {
    use crate::tree::node::mode_bits::{S_IFDIR, S_IFLNK, S_IFREG};

    let file_type = metadata.file_type();
    let readonly = metadata.permissions().readonly();
    if file_type.is_dir() {
        S_IFDIR | if readonly { 0o555 } else { 0o755 }
    } else if file_type.is_symlink() {
        S_IFLNK | 0o777
    } else {
        S_IFREG | if readonly { 0o444 } else { 0o644 }
    }
}
