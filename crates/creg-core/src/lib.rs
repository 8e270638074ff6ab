//! # creg-core — Foundational Types for the Credential Registry
//!
//! Leaf crate of the workspace. Defines the primitives every other crate
//! builds on; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `Address`, `CourseId` and `CertificateId` are
//!    distinct types. A course id cannot be passed where a participant is
//!    expected, and addresses are validated on construction.
//!
//! 2. **`CanonicalBytes` for every digest.** Certificate ids, event digests
//!    and state digests all hash canonical JSON produced by
//!    [`CanonicalBytes::new()`], never ad-hoc byte strings.
//!
//! 3. **UTC-only timestamps, injected time.** [`Timestamp`] is UTC with
//!    seconds precision. Time is read through the [`Clock`] trait so hosts
//!    and tests control it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `creg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest};
pub use error::{CanonicalizationError, CregError, ValidationError};
pub use identity::{Address, Amount, CertificateId, CourseId};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
