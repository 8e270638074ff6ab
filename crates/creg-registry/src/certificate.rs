//! # Certificates
//!
//! A certificate records that an instructor attested a student's completion
//! of a course. The document itself lives in an external content-addressed
//! store; the registry keeps only its content hash.
//!
//! ## Identifier derivation
//!
//! ```text
//! certificate_id = sha256(canonical_json({
//!     student, course_id, issued_at, nonce
//! }))
//! ```
//!
//! `nonce` is the registry-wide count of certificates issued before this
//! one. Two certificates for the same student and course within the same
//! second therefore still receive distinct ids.

use serde::{Deserialize, Serialize};

use creg_core::{
    sha256_digest, Address, CanonicalBytes, CanonicalizationError, CertificateId, CourseId,
    Timestamp,
};

/// An issued certificate. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Derived identifier.
    pub certificate_id: CertificateId,
    /// The completed course.
    pub course_id: CourseId,
    /// Certificate holder.
    pub student: Address,
    /// Issuing instructor.
    pub instructor: Address,
    /// Issuance time.
    pub issued_at: Timestamp,
    /// Content hash of the externally stored document.
    pub certificate_hash: String,
    /// Set on issuance; there is no revocation.
    pub is_verified: bool,
}

#[derive(Serialize)]
struct IdPreimage<'a> {
    student: &'a Address,
    course_id: CourseId,
    issued_at: Timestamp,
    nonce: u64,
}

/// Derive the certificate id for an issuance.
pub fn derive_certificate_id(
    student: &Address,
    course_id: CourseId,
    issued_at: Timestamp,
    nonce: u64,
) -> Result<CertificateId, CanonicalizationError> {
    let preimage = IdPreimage {
        student,
        course_id,
        issued_at,
        nonce,
    };
    Ok(CertificateId::from_digest(sha256_digest(
        &CanonicalBytes::new(&preimage)?,
    )))
}

/// Result of `verify_certificate`.
///
/// `found` says whether the id was ever issued; `is_valid` is the stored
/// verified flag. An unknown id yields `found == false`, `is_valid == false`
/// and zero-valued fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateVerification {
    /// The id that was looked up.
    pub certificate_id: CertificateId,
    /// Whether a certificate with this id exists.
    pub found: bool,
    /// The stored verified flag.
    pub is_valid: bool,
    /// The completed course.
    pub course_id: CourseId,
    /// Certificate holder.
    pub student: Address,
    /// Issuing instructor.
    pub instructor: Address,
    /// Issuance time.
    pub issued_at: Timestamp,
    /// Content hash of the document.
    pub certificate_hash: String,
}

impl CertificateVerification {
    /// The result for an id that was never issued.
    pub fn not_found(certificate_id: CertificateId) -> Self {
        Self {
            certificate_id,
            found: false,
            is_valid: false,
            course_id: CourseId::default(),
            student: Address::null(),
            instructor: Address::null(),
            issued_at: Timestamp::default(),
            certificate_hash: String::new(),
        }
    }
}

impl From<&Certificate> for CertificateVerification {
    fn from(cert: &Certificate) -> Self {
        Self {
            certificate_id: cert.certificate_id,
            found: true,
            is_valid: cert.is_verified,
            course_id: cert.course_id,
            student: cert.student.clone(),
            instructor: cert.instructor.clone(),
            issued_at: cert.issued_at,
            certificate_hash: cert.certificate_hash.clone(),
        }
    }
}
