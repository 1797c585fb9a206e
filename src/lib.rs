//! dirdigest: Merkle Digests for Directory Trees
//!
//! Walks a directory hierarchy and assigns every file a SHA-256 digest of its
//! bytes and every directory a digest of its children's digests, taken in
//! path order. Two trees with identical content produce identical root
//! digests regardless of timestamps, permissions or traversal order.

pub mod cli;
pub mod config;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod tree;
pub mod types;
pub mod views;

pub use config::{ConfigLoader, DigestConfig};
pub use error::DigestError;
pub use tree::{build_tree, BuilderOptions, DigestNode, TreeBuilder};
pub use types::Digest;
