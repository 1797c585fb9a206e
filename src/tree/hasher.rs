//! SHA-256 digest computation for filesystem nodes

use crate::types::Digest;
use sha2::{Digest as _, Sha256};
use std::io::{self, Read};

/// Read buffer size for streaming file content
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Digest of the empty byte sequence.
///
/// This is also the aggregate digest of a directory with no children.
pub fn empty_digest() -> Digest {
    compute_content_hash(&[])
}

/// Compute the digest of an in-memory byte slice
pub fn compute_content_hash(content: &[u8]) -> Digest {
    Digest::from_bytes(Sha256::digest(content).into())
}

/// Stream a reader to EOF through SHA-256.
///
/// Returns the digest together with the number of bytes actually hashed.
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<(Digest, u64)> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
        total += bytes_read as u64;
    }

    Ok((Digest::from_bytes(hasher.finalize().into()), total))
}

/// Compute a directory's aggregate digest from its children's digests.
///
/// digest = SHA256(hex(child_1) || hex(child_2) || ... || hex(child_n))
///
/// Each child contributes its 64-character lowercase hex string, not the raw
/// bytes. Children must already be in path order; this function does not sort.
pub fn aggregate_children<'a, I>(child_digests: I) -> Digest
where
    I: IntoIterator<Item = &'a Digest>,
{
    let mut hasher = Sha256::new();
    for digest in child_digests {
        hasher.update(digest.to_hex().as_bytes());
    }
    Digest::from_bytes(hasher.finalize().into())
}
