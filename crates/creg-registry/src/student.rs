//! # Students
//!
//! Student records are created once per identity and never deleted. Both
//! course lists are append-only; the enrolled list is kept duplicate-free by
//! the registry's enrollment flags, the completed list by a linear scan here.

use serde::{Deserialize, Serialize};

use creg_core::{Address, CourseId, Timestamp, ValidationError};

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// The student's identity.
    pub address: Address,
    /// Display name.
    pub name: String,
    /// Courses enrolled in, in enrollment order.
    pub enrolled_courses: Vec<CourseId>,
    /// Courses completed, in first-certificate order.
    pub completed_courses: Vec<CourseId>,
    /// Accumulated credits.
    pub total_credits: u64,
    /// Always true for stored records.
    pub is_registered: bool,
    /// Registration time.
    pub registered_at: Timestamp,
}

impl Student {
    /// Validate the name and build a fresh registration.
    pub fn new(address: Address, name: &str, registered_at: Timestamp) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        Ok(Self {
            address,
            name: name.to_string(),
            enrolled_courses: Vec::new(),
            completed_courses: Vec::new(),
            total_credits: 0,
            is_registered: true,
            registered_at,
        })
    }

    /// Append an enrolled course.
    pub fn record_enrollment(&mut self, course_id: CourseId) {
        self.enrolled_courses.push(course_id);
    }

    /// Whether the course is already in the completed list.
    pub fn has_completed(&self, course_id: CourseId) -> bool {
        self.completed_courses.contains(&course_id)
    }

    /// Mark a course completed and award credits, once per course.
    ///
    /// Returns `true` when the course was newly completed.
    pub fn record_completion(&mut self, course_id: CourseId, credits: u64) -> bool {
        if self.has_completed(course_id) {
            return false;
        }
        self.completed_courses.push(course_id);
        self.total_credits = self.total_credits.saturating_add(credits);
        true
    }
}
