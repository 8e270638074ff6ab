//! # Credential Registry
//!
//! The registry owns every record: courses, students, certificates,
//! enrollment flags and the authorized-instructor set. It is the only way to
//! change them.
//!
//! ## Serialization
//!
//! All state sits behind one `parking_lot::RwLock`. A mutating operation
//! holds the write lock from its first precondition check to its last event,
//! including payment settlement, so operations apply in a single total order
//! and readers never see a half-applied change. Every check runs before the
//! first mutation; a rejected call changes nothing.
//!
//! ## Lifecycles
//!
//! ```text
//! Student      unregistered ──register_student──▶ registered
//! Enrollment   not enrolled ──enroll_in_course──▶ enrolled
//! Course       active ◀──set_course_status──▶ inactive
//! Certificate  nonexistent ──issue_certificate──▶ issued (terminal)
//! ```
//!
//! ## Enrollment atomicity
//!
//! `enroll_in_course` commits the enrollment first, then settles the payment
//! through the [`PaymentRail`]. If any settlement leg fails, completed legs
//! are reversed and the enrollment is restored to its prior state before the
//! error is returned.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use creg_core::{
    sha256_digest, Address, Amount, CanonicalBytes, CertificateId, Clock, ContentDigest,
    CourseId, ValidationError,
};

use crate::certificate::{derive_certificate_id, Certificate, CertificateVerification};
use crate::config::RegistryConfig;
use crate::course::{Course, CourseDetails};
use crate::error::RegistryError;
use crate::events::{EventLog, RegistryEvent, RegistryEventKind};
use crate::payment::{PaymentRail, PaymentRailError, Settlement, TransferLeg};
use crate::student::Student;

/// Aggregate counters returned by `get_contract_stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStats {
    /// High-water mark of course ids.
    pub total_courses: u64,
    /// Number of registered students.
    pub total_students: u64,
    /// The registry owner.
    pub owner: Address,
}

/// A (student, course) enrollment flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Enrollment {
    /// The enrolled student.
    pub student: Address,
    /// The course.
    pub course_id: CourseId,
}

/// Serializable copy of the full registry state.
///
/// Collections are sorted so that equal states produce equal snapshots and
/// equal [`state digests`](CredentialRegistry::state_digest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// The registry owner.
    pub owner: Address,
    /// High-water mark of course ids.
    pub total_courses: u64,
    /// Number of registered students.
    pub total_students: u64,
    /// Number of certificates issued; the next issuance nonce.
    pub certificates_issued: u64,
    /// Authorized instructors, sorted.
    pub authorized_instructors: Vec<Address>,
    /// Courses in id order.
    pub courses: Vec<Course>,
    /// Students sorted by address.
    pub students: Vec<Student>,
    /// Enrollment flags, sorted.
    pub enrollments: Vec<Enrollment>,
    /// Certificates sorted by id.
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone)]
struct RegistryState {
    owner: Address,
    /// Index `i` holds course id `i + 1`.
    courses: Vec<Course>,
    students: HashMap<Address, Student>,
    certificates: HashMap<CertificateId, Certificate>,
    enrollments: HashSet<(Address, CourseId)>,
    authorized_instructors: BTreeSet<Address>,
    total_students: u64,
    certificates_issued: u64,
}

impl RegistryState {
    fn new(owner: Address) -> Self {
        Self {
            owner,
            courses: Vec::new(),
            students: HashMap::new(),
            certificates: HashMap::new(),
            enrollments: HashSet::new(),
            authorized_instructors: BTreeSet::new(),
            total_students: 0,
            certificates_issued: 0,
        }
    }

    fn total_courses(&self) -> u64 {
        self.courses.len() as u64
    }

    fn course_index(&self, course_id: CourseId) -> Option<usize> {
        let n = usize::try_from(course_id.get()).ok()?;
        (n >= 1 && n <= self.courses.len()).then(|| n - 1)
    }

    fn require_course(&self, course_id: CourseId) -> Result<usize, RegistryError> {
        self.course_index(course_id)
            .ok_or(RegistryError::CourseNotFound {
                course_id,
                total_courses: self.total_courses(),
            })
    }

    fn require_owner(&self, caller: &Address, operation: &'static str) -> Result<(), RegistryError> {
        if *caller != self.owner {
            return Err(RegistryError::Unauthorized {
                operation,
                caller: caller.clone(),
                reason: "not the registry owner",
            });
        }
        Ok(())
    }

    fn require_instructor(
        &self,
        caller: &Address,
        operation: &'static str,
    ) -> Result<(), RegistryError> {
        if !self.authorized_instructors.contains(caller) {
            return Err(RegistryError::Unauthorized {
                operation,
                caller: caller.clone(),
                reason: "not an authorized instructor",
            });
        }
        Ok(())
    }

    fn require_student(&self, student: &Address) -> Result<(), RegistryError> {
        match self.students.get(student) {
            Some(s) if s.is_registered => Ok(()),
            _ => Err(RegistryError::StudentNotRegistered {
                student: student.clone(),
            }),
        }
    }

    fn is_enrolled(&self, student: &Address, course_id: CourseId) -> bool {
        self.enrollments.contains(&(student.clone(), course_id))
    }

    fn snapshot(&self) -> RegistrySnapshot {
        let mut students: Vec<Student> = self.students.values().cloned().collect();
        students.sort_by(|a, b| a.address.cmp(&b.address));
        let mut enrollments: Vec<Enrollment> = self
            .enrollments
            .iter()
            .map(|(student, course_id)| Enrollment {
                student: student.clone(),
                course_id: *course_id,
            })
            .collect();
        enrollments.sort();
        let mut certificates: Vec<Certificate> = self.certificates.values().cloned().collect();
        certificates.sort_by(|a, b| a.certificate_id.cmp(&b.certificate_id));

        RegistrySnapshot {
            owner: self.owner.clone(),
            total_courses: self.total_courses(),
            total_students: self.total_students,
            certificates_issued: self.certificates_issued,
            authorized_instructors: self.authorized_instructors.iter().cloned().collect(),
            courses: self.courses.clone(),
            students,
            enrollments,
            certificates,
        }
    }

    fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, RegistryError> {
        let invalid = |msg: String| Err(RegistryError::InvalidSnapshot(msg));

        if snapshot.owner.is_null() {
            return invalid("owner is the null address".to_string());
        }
        if snapshot.total_courses != snapshot.courses.len() as u64 {
            return invalid(format!(
                "total_courses {} but {} courses listed",
                snapshot.total_courses,
                snapshot.courses.len()
            ));
        }
        for (i, course) in snapshot.courses.iter().enumerate() {
            if course.id.get() != i as u64 + 1 {
                return invalid(format!("course at position {i} has id {}", course.id));
            }
        }

        let mut state = Self::new(snapshot.owner);
        state.courses = snapshot.courses;
        state.authorized_instructors = snapshot.authorized_instructors.into_iter().collect();

        for student in snapshot.students {
            let address = student.address.clone();
            if state.students.insert(address.clone(), student).is_some() {
                return invalid(format!("student {address} listed twice"));
            }
        }
        if snapshot.total_students != state.students.len() as u64 {
            return invalid(format!(
                "total_students {} but {} students listed",
                snapshot.total_students,
                state.students.len()
            ));
        }
        state.total_students = snapshot.total_students;

        for Enrollment { student, course_id } in snapshot.enrollments {
            if state.course_index(course_id).is_none() || !state.students.contains_key(&student) {
                return invalid(format!("enrollment of {student} in unknown {course_id}"));
            }
            state.enrollments.insert((student, course_id));
        }

        if snapshot.certificates_issued < snapshot.certificates.len() as u64 {
            return invalid(format!(
                "certificates_issued {} below {} stored certificates",
                snapshot.certificates_issued,
                snapshot.certificates.len()
            ));
        }
        for cert in snapshot.certificates {
            let id = cert.certificate_id;
            if state.certificates.insert(id, cert).is_some() {
                return invalid(format!("certificate {id} listed twice"));
            }
        }
        state.certificates_issued = snapshot.certificates_issued;

        Ok(state)
    }
}

struct Inner {
    state: RegistryState,
    rail: Box<dyn PaymentRail>,
    events: EventLog,
}

/// The credential registry service.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct CredentialRegistry {
    inner: RwLock<Inner>,
    config: RegistryConfig,
    clock: Arc<dyn Clock>,
}

fn rejected(operation: &'static str, caller: &Address, err: RegistryError) -> RegistryError {
    tracing::debug!(
        operation,
        caller = %caller,
        kind = %err.kind(),
        error = %err,
        "operation rejected"
    );
    err
}

fn settle_enrollment(
    settlement: &mut Settlement<'_>,
    student: &Address,
    registry_account: &Address,
    instructor: &Address,
    payment: Amount,
    price: Amount,
) -> Result<(), PaymentRailError> {
    settlement.transfer(student, registry_account, payment)?;
    settlement.transfer(registry_account, instructor, price)?;
    settlement.transfer(registry_account, student, payment - price)
}

impl CredentialRegistry {
    /// Create an empty registry owned by `owner`.
    pub fn new(
        owner: Address,
        config: RegistryConfig,
        rail: Box<dyn PaymentRail>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RegistryError> {
        if owner.is_null() {
            return Err(ValidationError::NullAddress { field: "owner" }.into());
        }
        config.validate()?;
        tracing::info!(owner = %owner, "credential registry created");
        Ok(Self {
            inner: RwLock::new(Inner {
                state: RegistryState::new(owner),
                rail,
                events: EventLog::new(config.max_events),
            }),
            config,
            clock,
        })
    }

    /// Rebuild a registry from a snapshot. The event log starts empty.
    pub fn restore(
        snapshot: RegistrySnapshot,
        config: RegistryConfig,
        rail: Box<dyn PaymentRail>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RegistryError> {
        config.validate()?;
        let state = RegistryState::from_snapshot(snapshot)?;
        tracing::info!(
            owner = %state.owner,
            courses = state.total_courses(),
            students = state.total_students,
            "credential registry restored"
        );
        Ok(Self {
            inner: RwLock::new(Inner {
                state,
                rail,
                events: EventLog::new(config.max_events),
            }),
            config,
            clock,
        })
    }

    /// The configuration this registry runs with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ── Mutations ─────────────────────────────────────────────────────

    /// Register the caller as a student.
    pub fn register_student(&self, caller: &Address, name: &str) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();
        let now = self.clock.now();
        let Inner { state, events, .. } = &mut *inner;

        let result = (|| -> Result<_, RegistryError> {
            if state.students.contains_key(caller) {
                return Err(RegistryError::AlreadyRegistered {
                    student: caller.clone(),
                });
            }
            let student = Student::new(caller.clone(), name, now)?;
            let name = student.name.clone();
            state.students.insert(caller.clone(), student);
            state.total_students += 1;
            events.append(
                now,
                RegistryEventKind::StudentRegistered {
                    student: caller.clone(),
                    name,
                },
            );
            Ok(())
        })();

        result.map_err(|e| rejected("register_student", caller, e))?;
        tracing::info!(student = %caller, "student registered");
        Ok(())
    }

    /// Grant instructor rights. Owner only; re-authorizing is a no-op that
    /// still emits an event.
    pub fn authorize_instructor(
        &self,
        caller: &Address,
        instructor: &Address,
    ) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();
        let now = self.clock.now();
        let Inner { state, events, .. } = &mut *inner;

        let result = (|| -> Result<_, RegistryError> {
            state.require_owner(caller, "authorize_instructor")?;
            if instructor.is_null() {
                return Err(ValidationError::NullAddress {
                    field: "instructor",
                }
                .into());
            }
            let newly = state.authorized_instructors.insert(instructor.clone());
            events.append(
                now,
                RegistryEventKind::InstructorAuthorized {
                    instructor: instructor.clone(),
                },
            );
            Ok(newly)
        })();

        let newly = result.map_err(|e| rejected("authorize_instructor", caller, e))?;
        tracing::info!(instructor = %instructor, newly_authorized = newly, "instructor authorized");
        Ok(())
    }

    /// List a new course with the caller as instructor.
    pub fn create_course(
        &self,
        caller: &Address,
        title: &str,
        description: &str,
        price: Amount,
        duration_days: u64,
    ) -> Result<CourseId, RegistryError> {
        let mut inner = self.inner.write();
        let now = self.clock.now();
        let Inner { state, events, .. } = &mut *inner;

        let result = (|| -> Result<_, RegistryError> {
            state.require_instructor(caller, "create_course")?;
            let course_id = CourseId::new(state.total_courses() + 1);
            let course = Course::new(
                course_id,
                title,
                description,
                caller.clone(),
                price,
                duration_days,
                now,
            )?;
            events.append(
                now,
                RegistryEventKind::CourseCreated {
                    course_id,
                    title: course.title.clone(),
                    instructor: caller.clone(),
                    price,
                },
            );
            state.courses.push(course);
            Ok(course_id)
        })();

        let course_id = result.map_err(|e| rejected("create_course", caller, e))?;
        tracing::info!(course_id = %course_id, instructor = %caller, price, "course created");
        Ok(course_id)
    }

    /// Enroll the caller in a course, paying `payment`.
    ///
    /// The instructor receives exactly the course price and the caller gets
    /// `payment - price` back. Returns the executed settlement legs.
    pub fn enroll_in_course(
        &self,
        caller: &Address,
        course_id: CourseId,
        payment: Amount,
    ) -> Result<Vec<TransferLeg>, RegistryError> {
        let mut inner = self.inner.write();
        let now = self.clock.now();
        let registry_account = &self.config.registry_account;
        let Inner {
            state,
            rail,
            events,
        } = &mut *inner;

        let result = (|| -> Result<_, RegistryError> {
            state.require_student(caller)?;
            let idx = state.require_course(course_id)?;
            let course = &state.courses[idx];
            if !course.is_active {
                return Err(RegistryError::CourseInactive { course_id });
            }
            if state.is_enrolled(caller, course_id) {
                return Err(RegistryError::AlreadyEnrolled {
                    student: caller.clone(),
                    course_id,
                });
            }
            if payment < course.price {
                return Err(RegistryError::InsufficientPayment {
                    course_id,
                    required: course.price,
                    offered: payment,
                });
            }
            let price = course.price;
            let instructor = course.instructor.clone();
            let prior_course = course.clone();
            let student = state
                .students
                .get_mut(caller)
                .ok_or_else(|| RegistryError::StudentNotRegistered {
                    student: caller.clone(),
                })?;
            let prior_student = student.clone();

            student.record_enrollment(course_id);
            state.enrollments.insert((caller.clone(), course_id));
            let course = &mut state.courses[idx];
            course.enrolled_students = course.enrolled_students.saturating_add(1);

            let mut settlement = Settlement::new(&mut **rail);
            match settle_enrollment(
                &mut settlement,
                caller,
                registry_account,
                &instructor,
                payment,
                price,
            ) {
                Ok(()) => {
                    let legs = settlement.commit();
                    events.append(
                        now,
                        RegistryEventKind::StudentEnrolled {
                            student: caller.clone(),
                            course_id,
                            price_paid: price,
                        },
                    );
                    Ok((price, legs))
                }
                Err(e) => {
                    let stranded = settlement.unwind();
                    if !stranded.is_empty() {
                        tracing::error!(
                            student = %caller,
                            course_id = %course_id,
                            stranded = stranded.len(),
                            "enrollment rolled back with unreversed settlement legs"
                        );
                    }
                    state.enrollments.remove(&(caller.clone(), course_id));
                    state.courses[idx] = prior_course;
                    state.students.insert(caller.clone(), prior_student);
                    Err(e.into())
                }
            }
        })();

        let (price, legs) = result.map_err(|e| rejected("enroll_in_course", caller, e))?;
        tracing::info!(
            student = %caller,
            course_id = %course_id,
            price,
            refund = payment - price,
            "student enrolled"
        );
        Ok(legs)
    }

    /// Issue a certificate for a student's completion of a course.
    ///
    /// Only the course's instructor may issue. Credits are awarded the first
    /// time a course is completed; later certificates for the same course
    /// are stored without further credit.
    pub fn issue_certificate(
        &self,
        caller: &Address,
        course_id: CourseId,
        student: &Address,
        certificate_hash: &str,
    ) -> Result<CertificateId, RegistryError> {
        let mut inner = self.inner.write();
        let now = self.clock.now();
        let credits = self.config.credits_per_course;
        let Inner { state, events, .. } = &mut *inner;

        let result = (|| -> Result<_, RegistryError> {
            state.require_instructor(caller, "issue_certificate")?;
            let idx = state.require_course(course_id)?;
            if state.courses[idx].instructor != *caller {
                return Err(RegistryError::Unauthorized {
                    operation: "issue_certificate",
                    caller: caller.clone(),
                    reason: "not the instructor of this course",
                });
            }
            state.require_student(student)?;
            if !state.is_enrolled(student, course_id) {
                return Err(RegistryError::NotEnrolled {
                    student: student.clone(),
                    course_id,
                });
            }
            let certificate_hash = certificate_hash.trim();
            if certificate_hash.is_empty() {
                return Err(ValidationError::EmptyField {
                    field: "certificate_hash",
                }
                .into());
            }

            let nonce = state.certificates_issued;
            let certificate_id = derive_certificate_id(student, course_id, now, nonce)?;
            if state.certificates.contains_key(&certificate_id) {
                return Err(RegistryError::CertificateIdCollision { certificate_id });
            }
            let holder = state
                .students
                .get_mut(student)
                .ok_or_else(|| RegistryError::StudentNotRegistered {
                    student: student.clone(),
                })?;
            let newly_completed = holder.record_completion(course_id, credits);
            state.certificates.insert(
                certificate_id,
                Certificate {
                    certificate_id,
                    course_id,
                    student: student.clone(),
                    instructor: caller.clone(),
                    issued_at: now,
                    certificate_hash: certificate_hash.to_string(),
                    is_verified: true,
                },
            );
            state.certificates_issued += 1;
            events.append(
                now,
                RegistryEventKind::CertificateIssued {
                    certificate_id,
                    student: student.clone(),
                    course_id,
                    instructor: caller.clone(),
                },
            );
            Ok((certificate_id, newly_completed))
        })();

        let (certificate_id, newly_completed) =
            result.map_err(|e| rejected("issue_certificate", caller, e))?;
        tracing::info!(
            certificate_id = %certificate_id,
            student = %student,
            course_id = %course_id,
            newly_completed,
            "certificate issued"
        );
        Ok(certificate_id)
    }

    /// Open or close a course for enrollment. Instructor of the course or
    /// the owner only.
    pub fn set_course_status(
        &self,
        caller: &Address,
        course_id: CourseId,
        active: bool,
    ) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();
        let now = self.clock.now();
        let Inner { state, events, .. } = &mut *inner;

        let result = (|| -> Result<_, RegistryError> {
            let idx = state.require_course(course_id)?;
            if state.courses[idx].instructor != *caller && state.owner != *caller {
                return Err(RegistryError::Unauthorized {
                    operation: "set_course_status",
                    caller: caller.clone(),
                    reason: "neither the course instructor nor the owner",
                });
            }
            state.courses[idx].is_active = active;
            events.append(
                now,
                RegistryEventKind::CourseStatusChanged {
                    course_id,
                    active,
                    changed_by: caller.clone(),
                },
            );
            Ok(())
        })();

        result.map_err(|e| rejected("set_course_status", caller, e))?;
        tracing::info!(course_id = %course_id, active, changed_by = %caller, "course status changed");
        Ok(())
    }

    // ── Reads ─────────────────────────────────────────────────────────

    /// Look up a certificate. Never fails; see [`CertificateVerification`].
    pub fn verify_certificate(&self, certificate_id: &CertificateId) -> CertificateVerification {
        self.inner
            .read()
            .state
            .certificates
            .get(certificate_id)
            .map(CertificateVerification::from)
            .unwrap_or_else(|| CertificateVerification::not_found(*certificate_id))
    }

    /// The stored certificate, if issued.
    pub fn certificate(&self, certificate_id: &CertificateId) -> Option<Certificate> {
        self.inner.read().state.certificates.get(certificate_id).cloned()
    }

    /// Courses a student enrolled in, in order. Empty for unknown students.
    pub fn get_student_enrolled_courses(&self, student: &Address) -> Vec<CourseId> {
        self.inner
            .read()
            .state
            .students
            .get(student)
            .map(|s| s.enrolled_courses.clone())
            .unwrap_or_default()
    }

    /// Courses a student completed, in order. Empty for unknown students.
    pub fn get_student_completed_courses(&self, student: &Address) -> Vec<CourseId> {
        self.inner
            .read()
            .state
            .students
            .get(student)
            .map(|s| s.completed_courses.clone())
            .unwrap_or_default()
    }

    /// Public course view. Unknown ids return a record with `exists ==
    /// false`.
    pub fn get_course_details(&self, course_id: CourseId) -> CourseDetails {
        let inner = self.inner.read();
        inner
            .state
            .course_index(course_id)
            .map(|idx| inner.state.courses[idx].details())
            .unwrap_or_else(|| CourseDetails::missing(course_id))
    }

    /// The stored course, if listed.
    pub fn course(&self, course_id: CourseId) -> Option<Course> {
        let inner = self.inner.read();
        inner
            .state
            .course_index(course_id)
            .map(|idx| inner.state.courses[idx].clone())
    }

    /// The stored student record, if registered.
    pub fn student(&self, student: &Address) -> Option<Student> {
        self.inner.read().state.students.get(student).cloned()
    }

    /// Whether the enrollment flag for (student, course) is set.
    pub fn is_enrolled(&self, student: &Address, course_id: CourseId) -> bool {
        self.inner.read().state.is_enrolled(student, course_id)
    }

    /// Whether the identity may create courses and issue certificates.
    pub fn is_authorized_instructor(&self, account: &Address) -> bool {
        self.inner
            .read()
            .state
            .authorized_instructors
            .contains(account)
    }

    /// A student's accumulated credits; zero for unknown students.
    pub fn total_credits(&self, student: &Address) -> u64 {
        self.inner
            .read()
            .state
            .students
            .get(student)
            .map_or(0, |s| s.total_credits)
    }

    /// Course and student counters plus the owner.
    pub fn get_contract_stats(&self) -> ContractStats {
        let inner = self.inner.read();
        ContractStats {
            total_courses: inner.state.total_courses(),
            total_students: inner.state.total_students,
            owner: inner.state.owner.clone(),
        }
    }

    /// The registry owner.
    pub fn owner(&self) -> Address {
        self.inner.read().state.owner.clone()
    }

    /// Balance of an account on the payment rail.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.inner.read().rail.balance_of(account)
    }

    /// All retained events, oldest first.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.inner.read().events.entries().to_vec()
    }

    /// Retained events naming a participant.
    pub fn events_for(&self, account: &Address) -> Vec<RegistryEvent> {
        self.inner
            .read()
            .events
            .entries_for(account)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Retained events concerning a course.
    pub fn events_for_course(&self, course_id: CourseId) -> Vec<RegistryEvent> {
        self.inner
            .read()
            .events
            .entries_for_course(course_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The most recent `n` retained events, oldest first.
    pub fn recent_events(&self, n: usize) -> Vec<RegistryEvent> {
        self.inner.read().events.last_n(n).to_vec()
    }

    /// Content digest of a retained event. `None` when the sequence number
    /// was never assigned or has been trimmed.
    pub fn event_digest(&self, sequence: u64) -> Result<Option<ContentDigest>, RegistryError> {
        let inner = self.inner.read();
        match inner.events.get(sequence) {
            Some(event) => Ok(Some(event.digest()?)),
            None => Ok(None),
        }
    }

    /// Serializable copy of the full state.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.inner.read().state.snapshot()
    }

    /// SHA-256 digest of the canonical snapshot.
    pub fn state_digest(&self) -> Result<ContentDigest, RegistryError> {
        let snapshot = self.snapshot();
        Ok(sha256_digest(&CanonicalBytes::new(&snapshot)?))
    }
}

impl std::fmt::Debug for CredentialRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("CredentialRegistry")
            .field("owner", &inner.state.owner)
            .field("total_courses", &inner.state.total_courses())
            .field("total_students", &inner.state.total_students)
            .field("events", &inner.events)
            .field("config", &self.config)
            .finish()
    }
}
