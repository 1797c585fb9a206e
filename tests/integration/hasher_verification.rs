//! Hasher Implementation Verification Tests
//!
//! Checks the digest functions against SHA-256 computed directly and against
//! published test vectors.

use dirdigest::tree::hasher;
use sha2::{Digest as _, Sha256};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

/// Test that content hash matches SHA-256 directly
#[test]
fn test_content_hash_matches_sha256() {
    let content = b"test content";

    let ours = hasher::compute_content_hash(content);
    let direct: [u8; 32] = Sha256::digest(content).into();

    assert_eq!(ours.as_bytes(), &direct);
}

/// Test known vectors
#[test]
fn test_known_vectors() {
    assert_eq!(
        hasher::compute_content_hash(b"Hello, world!").to_hex(),
        "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3"
    );
    assert_eq!(
        hasher::empty_digest().to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

/// Test that streaming a file gives the same digest as hashing its bytes
#[test]
fn test_streamed_file_matches_in_memory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.bin");
    let content: Vec<u8> = (0..200_000u32).map(|i| (i * 7 % 256) as u8).collect();
    fs::write(&path, &content).unwrap();

    let (digest, size) = hasher::hash_reader(fs::File::open(&path).unwrap()).unwrap();

    assert_eq!(digest, hasher::compute_content_hash(&content));
    assert_eq!(size, content.len() as u64);
}

/// Test that the directory aggregate hashes the concatenated hex strings
#[test]
fn test_aggregate_hashes_hex_text() {
    let hello = hasher::compute_content_hash(b"hello");
    let world = hasher::compute_content_hash(b"world");

    let aggregate = hasher::aggregate_children([&hello, &world]);
    let text = format!("{}{}", hello.to_hex(), world.to_hex());
    let (expected, _) = hasher::hash_reader(Cursor::new(text.into_bytes())).unwrap();

    assert_eq!(aggregate, expected);
    assert_eq!(
        aggregate.to_hex(),
        "15e178b71fae8849ee562c9cc0d7ea322fba6cd495411329d47234479167cc8b"
    );
}

/// Test that aggregation is order sensitive
#[test]
fn test_aggregate_order_matters() {
    let a = hasher::compute_content_hash(b"a");
    let b = hasher::compute_content_hash(b"b");

    assert_ne!(
        hasher::aggregate_children([&a, &b]),
        hasher::aggregate_children([&b, &a])
    );
}

/// Test that a directory with one child does not share its child's digest
#[test]
fn test_single_child_aggregate_differs_from_child() {
    let only = hasher::compute_content_hash(b"only");
    assert_ne!(hasher::aggregate_children([&only]), only);
}
