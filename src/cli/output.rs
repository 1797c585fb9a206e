//! CLI output: error mapping from domain errors to the stderr surface.

use crate::error::DigestError;

/// Map a failure to the single line printed on stderr.
pub fn map_error(e: &DigestError) -> String {
    format!("error: {}", e)
}
