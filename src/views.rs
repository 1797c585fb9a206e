//! Digest Tree Views
//!
//! Renders a finished digest tree for output: either as a flat, pre-order list
//! of records (for JSON or line-oriented consumers) or as an indented,
//! column-aligned text tree. Views never alter digests.

use crate::tree::DigestNode;
use crate::types::Digest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt::Write;

/// Default width of the shortened digest in the indented view
pub const DEFAULT_DIGEST_WIDTH: usize = 16;

/// One node of the tree, flattened for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestRecord {
    pub path: String,
    pub size: u64,
    /// UTC, millisecond precision
    pub mod_time: String,
    pub mode: u32,
    pub digest: Digest,
}

impl From<&DigestNode> for DigestRecord {
    fn from(node: &DigestNode) -> Self {
        Self {
            path: node.path().to_string_lossy().to_string(),
            size: node.size(),
            mod_time: format_timestamp(&node.mod_time()),
            mode: node.mode(),
            digest: *node.digest(),
        }
    }
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Flatten the tree in depth-first pre-order
pub fn flatten(root: &DigestNode) -> Vec<DigestRecord> {
    let mut records = Vec::with_capacity(root.node_count());
    collect_records(root, &mut records);
    records
}

fn collect_records(node: &DigestNode, records: &mut Vec<DigestRecord>) {
    records.push(DigestRecord::from(node));
    for child in node.children() {
        collect_records(child, records);
    }
}

/// Serialize the flattened tree as a JSON array
pub fn to_json(root: &DigestNode, pretty: bool) -> serde_json::Result<String> {
    let records = flatten(root);
    if pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    }
}

/// Widest `indent + name` over the subtree, two columns per depth level
pub fn max_name_width(node: &DigestNode, depth: usize) -> usize {
    let own = node.name().chars().count() + depth * 2;
    node.children()
        .iter()
        .map(|child| max_name_width(child, depth + 1))
        .fold(own, usize::max)
}

/// Render the tree as indented text, one node per line.
///
/// ```text
/// root     / -         10 bytes digest:fe8cf935..18bb4837
///   a.txt    -          5 bytes digest:2cf24dba..938b9824
/// ```
///
/// Names are padded to the longest name in the whole tree; directories carry a
/// trailing `/`.
pub fn render_indented(root: &DigestNode, digest_width: usize) -> String {
    let width = max_name_width(root, 0);
    let mut out = String::new();
    render_node(root, 0, width, digest_width, &mut out);
    out
}

fn render_node(
    node: &DigestNode,
    depth: usize,
    width: usize,
    digest_width: usize,
    out: &mut String,
) {
    let indent = depth * 2;
    let indicator = if node.is_dir() { '/' } else { ' ' };
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "{:indent$}{:<name_width$}{} - {:>10} bytes digest:{}",
        "",
        node.name(),
        indicator,
        node.size(),
        node.digest().short(digest_width),
        indent = indent,
        name_width = width - indent,
    );
    for child in node.children() {
        render_node(child, depth + 1, width, digest_width, out);
    }
}
