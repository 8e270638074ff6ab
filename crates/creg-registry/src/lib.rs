//! # creg-registry — Credential Registry Service
//!
//! Maintains students, instructor authorizations, course listings,
//! payment-settled enrollments and completion certificates. All records are
//! owned by a single [`CredentialRegistry`]; callers interact only through
//! its operations.
//!
//! ## Architecture
//!
//! ```text
//! caller ──▶ CredentialRegistry ──▶ RwLock<state, rail, event log>
//!                  │                        │
//!                  │ enroll_in_course       └──▶ PaymentRail (Settlement)
//!                  │ issue_certificate      ──▶ CanonicalBytes → CertificateId
//!                  └──▶ tracing (info on success, debug on rejection)
//! ```
//!
//! ## Roles
//!
//! - **Owner**: fixed at construction; authorizes instructors and may toggle
//!   any course.
//! - **Instructor**: creates courses and issues certificates for the courses
//!   they teach.
//! - **Student**: registers, enrolls and receives certificates.
//!
//! ## Crate Policy
//!
//! - Every failed operation leaves state, balances and events untouched.
//! - Events are emitted only by successful mutations.
//! - No `.unwrap()` outside tests.

pub mod certificate;
pub mod config;
pub mod course;
pub mod error;
pub mod events;
pub mod payment;
pub mod registry;
pub mod student;

pub use certificate::{derive_certificate_id, Certificate, CertificateVerification};
pub use config::{ConfigError, RegistryConfig, CONFIG_ENV_VAR};
pub use course::{Course, CourseDetails};
pub use error::{ErrorKind, RegistryError};
pub use events::{EventLog, RegistryEvent, RegistryEventKind};
pub use payment::{InMemoryLedger, PaymentRail, PaymentRailError, Settlement, TransferLeg};
pub use registry::{ContractStats, CredentialRegistry, Enrollment, RegistrySnapshot};
pub use student::Student;
