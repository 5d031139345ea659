//! Utility functions and helpers.

pub mod http;

use sha2::{Digest, Sha256};

/// Short SHA-256 fingerprint of some content, for log lines.
pub fn short_digest(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    hex::encode(&hash[..6])
}
