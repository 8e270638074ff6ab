//! # Time — UTC Timestamps and Clocks
//!
//! [`Timestamp`] is UTC with seconds precision, matching the granularity of
//! the ledger host the registry models. Registration, course creation and
//! certificate issuance all stamp records through a [`Clock`], so a host can
//! plug in its own time source and tests can pin time with [`ManualClock`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A UTC timestamp truncated to whole seconds.
///
/// The default value is the Unix epoch, used for the zero-valued records
/// returned by lookups of unknown keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// From a `DateTime<Utc>`, discarding sub-second precision.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// From seconds since the Unix epoch.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, ValidationError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTimestamp(format!("epoch seconds {secs}")))
    }

    /// Parse an RFC 3339 string with a `Z` suffix.
    ///
    /// Explicit offsets, even `+00:00`, are rejected so that the textual
    /// form of a stored timestamp is unique.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(ValidationError::InvalidTimestamp(format!(
                "{s:?} must use the Z suffix"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| ValidationError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Seconds since the Unix epoch.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Borrow the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self(DateTime::UNIX_EPOCH)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current timestamp.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    secs: AtomicI64,
}

impl ManualClock {
    /// Start the clock at the given instant.
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: AtomicI64::new(start.epoch_secs()),
        }
    }

    /// Start the clock at the given epoch second.
    pub fn at_epoch_secs(secs: i64) -> Self {
        Self {
            secs: AtomicI64::new(secs),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, at: Timestamp) {
        self.secs.store(at.epoch_secs(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_epoch_secs(self.secs.load(Ordering::SeqCst)).unwrap_or_default()
    }
}
