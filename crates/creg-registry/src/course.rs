//! # Courses
//!
//! A course is listed once by an authorized instructor. After creation only
//! the active flag and the enrolled count change.

use serde::{Deserialize, Serialize};

use creg_core::{Address, Amount, CourseId, Timestamp, ValidationError};

/// A listed course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Sequential id, starting at 1.
    pub id: CourseId,
    /// Course title.
    pub title: String,
    /// Course description.
    pub description: String,
    /// Instructor of record; the only identity that may issue certificates.
    pub instructor: Address,
    /// Enrollment price in the smallest currency unit.
    pub price: Amount,
    /// Duration in days.
    pub duration_days: u64,
    /// Whether the course accepts enrollments.
    pub is_active: bool,
    /// Number of students enrolled.
    pub enrolled_students: u64,
    /// Listing time.
    pub created_at: Timestamp,
}

impl Course {
    /// Validate the listing fields and build an active course with no
    /// enrollments.
    pub fn new(
        id: CourseId,
        title: &str,
        description: &str,
        instructor: Address,
        price: Amount,
        duration_days: u64,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        if description.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "description",
            });
        }
        if duration_days == 0 {
            return Err(ValidationError::NotPositive { field: "duration" });
        }
        Ok(Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            instructor,
            price,
            duration_days,
            is_active: true,
            enrolled_students: 0,
            created_at,
        })
    }

    /// Public view of the course.
    pub fn details(&self) -> CourseDetails {
        CourseDetails {
            course_id: self.id,
            exists: true,
            title: self.title.clone(),
            description: self.description.clone(),
            instructor: self.instructor.clone(),
            price: self.price,
            duration_days: self.duration_days,
            is_active: self.is_active,
            enrolled_students: self.enrolled_students,
        }
    }
}

/// Read-only view returned by `get_course_details`.
///
/// Lookups of unknown ids return [`CourseDetails::missing`] instead of
/// failing; `exists` tells the two cases apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    /// The requested id.
    pub course_id: CourseId,
    /// Whether the id names a listed course.
    pub exists: bool,
    /// Course title.
    pub title: String,
    /// Course description.
    pub description: String,
    /// Instructor of record (null address when missing).
    pub instructor: Address,
    /// Enrollment price.
    pub price: Amount,
    /// Duration in days.
    pub duration_days: u64,
    /// Whether the course accepts enrollments.
    pub is_active: bool,
    /// Number of students enrolled.
    pub enrolled_students: u64,
}

impl CourseDetails {
    /// The zero-valued record for an id that names no course.
    pub fn missing(course_id: CourseId) -> Self {
        Self {
            course_id,
            exists: false,
            title: String::new(),
            description: String::new(),
            instructor: Address::null(),
            price: 0,
            duration_days: 0,
            is_active: false,
            enrolled_students: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instructor() -> Address {
        Address::new("instructor").unwrap()
    }

    #[test]
    fn new_course_is_active_and_empty() {
        let course = Course::new(
            CourseId::new(1),
            " Algorithms 101 ",
            "Sorting and searching",
            instructor(),
            100,
            30,
            Timestamp::default(),
        )
        .unwrap();
        assert_eq!(course.title, "Algorithms 101");
        assert!(course.is_active);
        assert_eq!(course.enrolled_students, 0);
    }

    #[test]
    fn free_courses_are_allowed() {
        let course = Course::new(
            CourseId::new(1),
            "Intro",
            "Free intro",
            instructor(),
            0,
            1,
            Timestamp::default(),
        );
        assert!(course.is_ok());
    }

    #[test]
    fn listing_validation() {
        let mk = |title: &str, desc: &str, days: u64| {
            Course::new(
                CourseId::new(1),
                title,
                desc,
                instructor(),
                10,
                days,
                Timestamp::default(),
            )
        };
        assert_eq!(
            mk("", "d", 1).unwrap_err(),
            ValidationError::EmptyField { field: "title" }
        );
        assert_eq!(
            mk("t", "  ", 1).unwrap_err(),
            ValidationError::EmptyField {
                field: "description"
            }
        );
        assert_eq!(
            mk("t", "d", 0).unwrap_err(),
            ValidationError::NotPositive { field: "duration" }
        );
    }

    #[test]
    fn missing_details_are_zero_valued() {
        let details = CourseDetails::missing(CourseId::new(0));
        assert!(!details.exists);
        assert!(details.instructor.is_null());
        assert_eq!(details.price, 0);
        assert!(!details.is_active);
    }

    #[test]
    fn details_mirror_course() {
        let course = Course::new(
            CourseId::new(4),
            "Rust",
            "Ownership",
            instructor(),
            55,
            14,
            Timestamp::default(),
        )
        .unwrap();
        let details = course.details();
        assert!(details.exists);
        assert_eq!(details.course_id, CourseId::new(4));
        assert_eq!(details.price, 55);
        assert_eq!(details.instructor, instructor());
    }
}
