//! Content hashing for text groupings.
//!
//! A grouping is identified by the SHA-256 of its compact JSON encoding.
//! Arrays of strings carry no object keys, so the encoding is canonical:
//! two arrays hash equal exactly when they hold the same strings in the
//! same order.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the JSON encoding of `texts`.
pub fn grouping_hash(texts: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    let encoded = serde_json::to_string(texts).unwrap_or_default();
    compute_hash(&encoded)
}

fn compute_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}
