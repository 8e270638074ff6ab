//! # Registry Event Log
//!
//! Domain events are the audit trail of the registry: one event per
//! successful mutation, appended in the same global order as the mutations
//! themselves. Rejected operations never emit.
//!
//! The log is bounded. When it exceeds its capacity the oldest 10% of
//! entries are dropped; hosts that need a complete history should drain
//! events to durable storage before that happens. Sequence numbers keep
//! increasing across trims, so gaps reveal dropped entries.
//!
//! Each event is individually digestable via `CanonicalBytes` +
//! `sha256_digest`.

use serde::{Deserialize, Serialize};

use creg_core::{
    sha256_digest, Address, Amount, CanonicalBytes, CanonicalizationError, CertificateId,
    ContentDigest, CourseId, Timestamp,
};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEventKind {
    /// A new student registered.
    StudentRegistered {
        /// The student.
        student: Address,
        /// Display name.
        name: String,
    },
    /// The owner authorized (or re-authorized) an instructor.
    InstructorAuthorized {
        /// The instructor.
        instructor: Address,
    },
    /// An instructor listed a course.
    CourseCreated {
        /// The new course.
        course_id: CourseId,
        /// Course title.
        title: String,
        /// Instructor of record.
        instructor: Address,
        /// Listed price.
        price: Amount,
    },
    /// A student enrolled and the payment settled.
    StudentEnrolled {
        /// The student.
        student: Address,
        /// The course.
        course_id: CourseId,
        /// Amount paid to the instructor.
        price_paid: Amount,
    },
    /// An instructor issued a certificate.
    CertificateIssued {
        /// The certificate.
        certificate_id: CertificateId,
        /// Certificate holder.
        student: Address,
        /// The completed course.
        course_id: CourseId,
        /// Issuing instructor.
        instructor: Address,
    },
    /// A course was opened or closed for enrollment.
    CourseStatusChanged {
        /// The course.
        course_id: CourseId,
        /// New active flag.
        active: bool,
        /// Instructor or owner that made the change.
        changed_by: Address,
    },
}

impl RegistryEventKind {
    /// Stable snake_case name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StudentRegistered { .. } => "student_registered",
            Self::InstructorAuthorized { .. } => "instructor_authorized",
            Self::CourseCreated { .. } => "course_created",
            Self::StudentEnrolled { .. } => "student_enrolled",
            Self::CertificateIssued { .. } => "certificate_issued",
            Self::CourseStatusChanged { .. } => "course_status_changed",
        }
    }

    /// Whether the event names the given participant.
    pub fn involves(&self, account: &Address) -> bool {
        match self {
            Self::StudentRegistered { student, .. } | Self::StudentEnrolled { student, .. } => {
                student == account
            }
            Self::InstructorAuthorized { instructor } | Self::CourseCreated { instructor, .. } => {
                instructor == account
            }
            Self::CertificateIssued {
                student,
                instructor,
                ..
            } => student == account || instructor == account,
            Self::CourseStatusChanged { changed_by, .. } => changed_by == account,
        }
    }

    /// The course the event concerns, if any.
    pub fn course_id(&self) -> Option<CourseId> {
        match self {
            Self::CourseCreated { course_id, .. }
            | Self::StudentEnrolled { course_id, .. }
            | Self::CertificateIssued { course_id, .. }
            | Self::CourseStatusChanged { course_id, .. } => Some(*course_id),
            Self::StudentRegistered { .. } | Self::InstructorAuthorized { .. } => None,
        }
    }
}

impl std::fmt::Display for RegistryEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEvent {
    /// Monotonic sequence number, starting at 0.
    pub sequence: u64,
    /// When the mutation was committed.
    pub timestamp: Timestamp,
    /// The event payload.
    #[serde(flatten)]
    pub kind: RegistryEventKind,
}

impl RegistryEvent {
    /// Content digest of this event.
    pub fn digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        Ok(sha256_digest(&CanonicalBytes::new(self)?))
    }
}

/// Append-only, bounded event log.
#[derive(Clone)]
pub struct EventLog {
    entries: Vec<RegistryEvent>,
    max_entries: usize,
    next_sequence: u64,
}

impl EventLog {
    /// Create a log holding at most `max_entries` events.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
            next_sequence: 0,
        }
    }

    /// Append an event and return its sequence number.
    pub fn append(&mut self, timestamp: Timestamp, kind: RegistryEventKind) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(RegistryEvent {
            sequence,
            timestamp,
            kind,
        });
        if self.entries.len() > self.max_entries {
            let trim = (self.max_entries / 10).max(1);
            self.entries.drain(..trim);
            tracing::debug!(trimmed = trim, capacity = self.max_entries, "event log trimmed");
        }
        sequence
    }

    /// All retained events, oldest first.
    pub fn entries(&self) -> &[RegistryEvent] {
        &self.entries
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no events are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sequence number the next event will receive.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Retained events naming a participant.
    pub fn entries_for(&self, account: &Address) -> Vec<&RegistryEvent> {
        self.entries
            .iter()
            .filter(|e| e.kind.involves(account))
            .collect()
    }

    /// Retained events concerning a course.
    pub fn entries_for_course(&self, course_id: CourseId) -> Vec<&RegistryEvent> {
        self.entries
            .iter()
            .filter(|e| e.kind.course_id() == Some(course_id))
            .collect()
    }

    /// The retained event with the given sequence number.
    pub fn get(&self, sequence: u64) -> Option<&RegistryEvent> {
        self.entries
            .binary_search_by_key(&sequence, |e| e.sequence)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// The most recent `n` events.
    pub fn last_n(&self, n: usize) -> &[RegistryEvent] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("entries", &self.entries.len())
            .field("max_entries", &self.max_entries)
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}
