//! Digest tree node types

use crate::types::Digest;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What kind of non-directory entry a leaf represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    /// Regular file; content is its bytes
    Regular,
    /// Symbolic link; content is the link target string
    Symlink,
    /// FIFO, socket or device; never opened, content is empty
    Special,
}

/// A digested non-directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub path: PathBuf,
    pub name: String,
    pub kind: LeafKind,
    /// Number of bytes hashed
    pub size: u64,
    pub mod_time: DateTime<Utc>,
    pub mode: u32,
    pub digest: Digest,
}

/// A directory whose children are all digested
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryNode {
    pub path: PathBuf,
    pub name: String,
    /// Sum of the children's sizes
    pub size: u64,
    pub mod_time: DateTime<Utc>,
    pub mode: u32,
    /// Aggregate of the children's digests, in path order
    pub digest: Digest,
    /// Children sorted by path
    pub children: Vec<DigestNode>,
}

/// One entry of a finished digest tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DigestNode {
    File(FileNode),
    Directory(DirectoryNode),
}

impl DigestNode {
    pub fn path(&self) -> &Path {
        match self {
            DigestNode::File(f) => &f.path,
            DigestNode::Directory(d) => &d.path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DigestNode::File(f) => &f.name,
            DigestNode::Directory(d) => &d.name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            DigestNode::File(f) => f.size,
            DigestNode::Directory(d) => d.size,
        }
    }

    pub fn mod_time(&self) -> DateTime<Utc> {
        match self {
            DigestNode::File(f) => f.mod_time,
            DigestNode::Directory(d) => d.mod_time,
        }
    }

    pub fn mode(&self) -> u32 {
        match self {
            DigestNode::File(f) => f.mode,
            DigestNode::Directory(d) => d.mode,
        }
    }

    pub fn digest(&self) -> &Digest {
        match self {
            DigestNode::File(f) => &f.digest,
            DigestNode::Directory(d) => &d.digest,
        }
    }

    /// Children in path order; empty for leaves
    pub fn children(&self) -> &[DigestNode] {
        match self {
            DigestNode::File(_) => &[],
            DigestNode::Directory(d) => &d.children,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, DigestNode::Directory(_))
    }

    /// Total number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(DigestNode::node_count).sum::<usize>()
    }

    /// Find a descendant (or self) by exact path
    pub fn find(&self, path: &Path) -> Option<&DigestNode> {
        if self.path() == path {
            return Some(self);
        }
        if !path.starts_with(self.path()) {
            return None;
        }
        self.children().iter().find_map(|child| child.find(path))
    }
}

/// Portable file-type bits, matching the Unix `st_mode` encoding
pub mod mode_bits {
    pub const S_IFMT: u32 = 0o170000;
    pub const S_IFDIR: u32 = 0o040000;
    pub const S_IFREG: u32 = 0o100000;
    pub const S_IFLNK: u32 = 0o120000;
}
