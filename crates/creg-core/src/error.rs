//! # Error Hierarchy
//!
//! Structured error types shared across the workspace, built with
//! `thiserror`. Registry-level failures live in `creg-registry::error`;
//! this module holds the errors raised by the primitives themselves.

use thiserror::Error;

/// Top-level error type for the core primitives.
#[derive(Error, Debug)]
pub enum CregError {
    /// Canonicalization failure during digest computation.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Prices and credits are integers.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation failures for domain primitives and operation inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// An identity argument was the null address.
    #[error("{field} must not be the null address")]
    NullAddress {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A numeric field that must be strictly positive was zero.
    #[error("{field} must be greater than zero")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A timestamp could not be parsed or is out of range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A hex-encoded identifier could not be decoded.
    #[error("invalid hex identifier: {0}")]
    InvalidHex(String),
}
