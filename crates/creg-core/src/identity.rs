//! # Domain Identifiers
//!
//! Newtype wrappers for every identifier the registry handles. They keep
//! namespaces apart at the type level: a [`CourseId`] cannot stand in for an
//! [`Address`], and a [`CertificateId`] can only be built from a digest or a
//! well-formed hex string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::digest::ContentDigest;
use crate::error::ValidationError;

/// Monetary amount in the smallest currency unit.
pub type Amount = u64;

const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Identity of a participant: the owner, an instructor, a student, or a
/// settlement account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create an address from its textual form.
    ///
    /// Leading and trailing whitespace is trimmed; an empty result is
    /// rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField { field: "address" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The null address (`0x` followed by forty zeros).
    pub fn null() -> Self {
        Self(NULL_ADDRESS.to_string())
    }

    /// Whether this is a null address in any zero-padded `0x` form.
    pub fn is_null(&self) -> bool {
        self.0
            .strip_prefix("0x")
            .or_else(|| self.0.strip_prefix("0X"))
            .is_some_and(|rest| rest.chars().all(|c| c == '0'))
    }

    /// Borrow the textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequential course identifier. Valid ids start at 1; 0 never names a
/// course.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CourseId(u64);

impl CourseId {
    /// Wrap a raw course number.
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    /// The raw course number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CourseId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "course:{}", self.0)
    }
}

/// Certificate identifier: a SHA-256 digest rendered as `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CertificateId([u8; 32]);

impl CertificateId {
    /// Build an id from a content digest.
    pub fn from_digest(digest: ContentDigest) -> Self {
        Self(digest.bytes)
    }

    /// Parse a 64-character hex string, with or without the `0x` prefix.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidHex(format!(
                "{s:?} contains non-hex characters"
            )));
        }
        if hex.len() != 64 {
            return Err(ValidationError::InvalidHex(format!(
                "expected 64 hex characters, got {}",
                hex.len()
            )));
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = hex
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| ValidationError::InvalidHex(s.to_string()))?;
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|e| ValidationError::InvalidHex(format!("{s:?}: {e}")))?;
        }
        Ok(Self(bytes))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Serialize for CertificateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CertificateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
