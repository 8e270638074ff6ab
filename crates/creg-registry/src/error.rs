//! # Registry Error Types
//!
//! Every registry failure is a rejected precondition: the operation leaves
//! no trace in state, balances or the event log. Variants carry the
//! identifiers involved so a caller can correct the input and re-issue the
//! call without consulting logs.

use thiserror::Error;

use creg_core::{
    Address, Amount, CanonicalizationError, CertificateId, CourseId, ValidationError,
};

use crate::config::ConfigError;
use crate::payment::PaymentRailError;

/// Coarse classification of registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong role or identity for the operation.
    Authorization,
    /// Unknown course or unregistered student.
    NotFound,
    /// Already registered or already enrolled.
    Duplicate,
    /// Malformed input, or an invalid precondition such as an inactive
    /// course or a missing enrollment.
    Validation,
    /// Offered payment below the course price.
    InsufficientPayment,
    /// The payment rail refused a settlement leg.
    Transfer,
    /// Identifier collision or digest failure.
    Integrity,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Duplicate => "duplicate",
            Self::Validation => "validation",
            Self::InsufficientPayment => "insufficient_payment",
            Self::Transfer => "transfer",
            Self::Integrity => "integrity",
        };
        f.write_str(s)
    }
}

/// Errors returned by [`CredentialRegistry`](crate::CredentialRegistry)
/// operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The caller lacks the role the operation requires.
    #[error("{caller} may not {operation}: {reason}")]
    Unauthorized {
        /// Operation that was attempted.
        operation: &'static str,
        /// The rejected caller.
        caller: Address,
        /// Which role check failed.
        reason: &'static str,
    },

    /// The identity has never registered as a student.
    #[error("student {student} is not registered")]
    StudentNotRegistered {
        /// The unregistered identity.
        student: Address,
    },

    /// The course id is 0 or beyond the highest allocated id.
    #[error("{course_id} does not exist ({total_courses} courses allocated)")]
    CourseNotFound {
        /// The requested course.
        course_id: CourseId,
        /// High-water mark of allocated course ids.
        total_courses: u64,
    },

    /// The course exists but is closed for enrollment.
    #[error("{course_id} is not active")]
    CourseInactive {
        /// The inactive course.
        course_id: CourseId,
    },

    /// The caller already holds a student registration.
    #[error("student {student} is already registered")]
    AlreadyRegistered {
        /// The registered identity.
        student: Address,
    },

    /// The student already holds an enrollment in the course.
    #[error("student {student} is already enrolled in {course_id}")]
    AlreadyEnrolled {
        /// The enrolled student.
        student: Address,
        /// The course.
        course_id: CourseId,
    },

    /// A certificate was requested for a student without an enrollment.
    #[error("student {student} is not enrolled in {course_id}")]
    NotEnrolled {
        /// The student named in the request.
        student: Address,
        /// The course.
        course_id: CourseId,
    },

    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Offered payment is below the course price.
    #[error("insufficient payment for {course_id}: price {required}, offered {offered}")]
    InsufficientPayment {
        /// The course being paid for.
        course_id: CourseId,
        /// Course price.
        required: Amount,
        /// Amount offered by the caller.
        offered: Amount,
    },

    /// Settlement through the payment rail failed; the enrollment was
    /// rolled back.
    #[error("settlement failed: {0}")]
    Transfer(#[from] PaymentRailError),

    /// A derived certificate id is already taken.
    #[error("certificate id {certificate_id} is already issued")]
    CertificateIdCollision {
        /// The colliding id.
        certificate_id: CertificateId,
    },

    /// Canonicalization failed while deriving an identifier or digest.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Registry configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A snapshot is internally inconsistent and cannot be restored.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl RegistryError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::StudentNotRegistered { .. } | Self::CourseNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::AlreadyRegistered { .. } | Self::AlreadyEnrolled { .. } => ErrorKind::Duplicate,
            Self::CourseInactive { .. }
            | Self::NotEnrolled { .. }
            | Self::Validation(_)
            | Self::Config(_) => ErrorKind::Validation,
            Self::InsufficientPayment { .. } => ErrorKind::InsufficientPayment,
            Self::Transfer(_) => ErrorKind::Transfer,
            Self::CertificateIdCollision { .. }
            | Self::Canonicalization(_)
            | Self::InvalidSnapshot(_) => ErrorKind::Integrity,
        }
    }
}
