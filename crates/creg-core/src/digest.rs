//! # Content Digests
//!
//! SHA-256 digests over [`CanonicalBytes`]. The function signatures accept
//! only canonical bytes, so every identifier derived from a digest flows
//! through the same serialization rules.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// A 32-byte SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The raw digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Lowercase hex rendering of the digest.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute the SHA-256 digest of canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(bytes)
}

/// Compute the SHA-256 digest of canonical bytes as a hex string.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    sha256_digest(data).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_is_deterministic() {
        let cb = CanonicalBytes::new(&json!({"course_id": 1, "student": "alice"})).unwrap();
        assert_eq!(sha256_digest(&cb), sha256_digest(&cb));
    }

    #[test]
    fn hex_is_64_lowercase_chars() {
        let cb = CanonicalBytes::new(&json!({"k": "v"})).unwrap();
        let hex = sha256_hex(&cb);
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn display_carries_algorithm_prefix() {
        let cb = CanonicalBytes::new(&json!({})).unwrap();
        let shown = sha256_digest(&cb).to_string();
        assert!(shown.starts_with("sha256:"));
        assert_eq!(shown.len(), 7 + 64);
    }

    #[test]
    fn known_vector_for_empty_object() {
        let cb = CanonicalBytes::new(&json!({})).unwrap();
        assert_eq!(
            sha256_hex(&cb),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn distinct_inputs_distinct_digests() {
        let a = CanonicalBytes::new(&json!({"course_id": 1})).unwrap();
        let b = CanonicalBytes::new(&json!({"course_id": 2})).unwrap();
        assert_ne!(sha256_digest(&a), sha256_digest(&b));
    }
}
