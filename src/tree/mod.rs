//! Directory Digest Tree
//!
//! Represents a directory hierarchy as a Merkle tree: every file is digested
//! from its bytes, every directory from its children's digests in path order.

pub mod builder;
pub mod digester;
pub mod hasher;
pub mod node;
pub mod walker;

pub use builder::{build_tree, BuilderOptions, TreeBuilder};
pub use node::{DigestNode, DirectoryNode, FileNode, LeafKind};
