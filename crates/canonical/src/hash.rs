//! Hashing utilities for normalized text.
//!
//! ## Identity digest
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || normalized_text_bytes)
//! ```
//!
//! The version is part of the digest so texts normalized under different rules
//! never share an identity, even when their normalized bytes happen to agree.
//!
//! ```rust
//! use canonical::{hash_normalized_bytes, hash_text};
//!
//! let hash = hash_text("hello world");
//! assert_eq!(hash.len(), 64);
//!
//! let v1 = hash_normalized_bytes(1, b"hello world");
//! let v2 = hash_normalized_bytes(2, b"hello world");
//! assert_ne!(v1, v2);
//! ```

use sha2::{Digest, Sha256};

/// Hash arbitrary text with SHA-256 and return a hex digest.
///
/// Version-agnostic; intended for diagnostics and log correlation. For the
/// identity of a normalized document use [`hash_normalized_bytes`].
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the version-aware identity digest of normalized text.
///
/// Returns 64 lowercase hex characters.
pub fn hash_normalized_bytes(version: u32, normalized_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(version.to_be_bytes());
    hasher.update([0]);
    hasher.update(normalized_bytes);
    hex::encode(hasher.finalize())
}
