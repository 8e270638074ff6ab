//! Property tests over random operation sequences.

use std::sync::Arc;

use proptest::prelude::*;

use creg_core::{Address, CourseId, ManualClock};
use creg_registry::{CredentialRegistry, InMemoryLedger, RegistryConfig};

const STUDENTS: [&str; 3] = ["s0", "s1", "s2"];
const INSTRUCTORS: [&str; 2] = ["i0", "i1"];
const FUNDING: u64 = 10_000;

fn addr(s: &str) -> Address {
    Address::new(s).unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    Register(usize),
    Create { instructor: usize, price: u64 },
    Enroll { student: usize, course: u64, payment: u64 },
    Issue { instructor: usize, student: usize, course: u64 },
    SetStatus { instructor: usize, course: u64, active: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..STUDENTS.len()).prop_map(Op::Register),
        (0..INSTRUCTORS.len(), 0u64..300).prop_map(|(instructor, price)| Op::Create {
            instructor,
            price
        }),
        (0..STUDENTS.len(), 0u64..6, 0u64..400).prop_map(|(student, course, payment)| {
            Op::Enroll {
                student,
                course,
                payment,
            }
        }),
        (0..INSTRUCTORS.len(), 0..STUDENTS.len(), 0u64..6).prop_map(
            |(instructor, student, course)| Op::Issue {
                instructor,
                student,
                course
            }
        ),
        (0..INSTRUCTORS.len(), 0u64..6, any::<bool>()).prop_map(
            |(instructor, course, active)| Op::SetStatus {
                instructor,
                course,
                active
            }
        ),
    ]
}

fn fresh_registry() -> CredentialRegistry {
    let ledger = InMemoryLedger::with_balances(STUDENTS.iter().map(|s| (addr(s), FUNDING)));
    let registry = CredentialRegistry::new(
        addr("owner"),
        RegistryConfig::default(),
        Box::new(ledger),
        Arc::new(ManualClock::at_epoch_secs(1_767_225_600)),
    )
    .unwrap();
    for i in INSTRUCTORS {
        registry.authorize_instructor(&addr("owner"), &addr(i)).unwrap();
    }
    registry
}

/// Apply one operation, returning whether it was accepted.
fn apply(registry: &CredentialRegistry, op: &Op) -> bool {
    let result = match op {
        Op::Register(s) => registry.register_student(&addr(STUDENTS[*s]), "Student"),
        Op::Create { instructor, price } => registry
            .create_course(&addr(INSTRUCTORS[*instructor]), "Course", "About", *price, 7)
            .map(|_| ()),
        Op::Enroll {
            student,
            course,
            payment,
        } => registry
            .enroll_in_course(&addr(STUDENTS[*student]), CourseId::new(*course), *payment)
            .map(|_| ()),
        Op::Issue {
            instructor,
            student,
            course,
        } => registry
            .issue_certificate(
                &addr(INSTRUCTORS[*instructor]),
                CourseId::new(*course),
                &addr(STUDENTS[*student]),
                "QmDoc",
            )
            .map(|_| ()),
        Op::SetStatus {
            instructor,
            course,
            active,
        } => registry.set_course_status(
            &addr(INSTRUCTORS[*instructor]),
            CourseId::new(*course),
            *active,
        ),
    };
    result.is_ok()
}

proptest! {
    #[test]
    fn invariants_hold_after_any_sequence(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let registry = fresh_registry();
        for op in &ops {
            apply(&registry, op);
        }

        let snapshot = registry.snapshot();
        let config = registry.config();

        // Course ids are dense from 1.
        for (i, course) in snapshot.courses.iter().enumerate() {
            prop_assert_eq!(course.id, CourseId::new(i as u64 + 1));
        }
        prop_assert_eq!(snapshot.total_courses, snapshot.courses.len() as u64);
        prop_assert_eq!(snapshot.total_students, snapshot.students.len() as u64);

        for student in &snapshot.students {
            // Credits are awarded once per completed course.
            prop_assert_eq!(
                student.total_credits,
                student.completed_courses.len() as u64 * config.credits_per_course
            );
            let mut completed = student.completed_courses.clone();
            completed.sort();
            completed.dedup();
            prop_assert_eq!(completed.len(), student.completed_courses.len());

            // Enrollment list mirrors the enrollment flags.
            let mut enrolled = student.enrolled_courses.clone();
            enrolled.sort();
            enrolled.dedup();
            prop_assert_eq!(enrolled.len(), student.enrolled_courses.len());
            for course_id in &student.enrolled_courses {
                prop_assert!(registry.is_enrolled(&student.address, *course_id));
            }
            for course_id in &student.completed_courses {
                prop_assert!(student.enrolled_courses.contains(course_id));
            }
        }

        // Per-course enrolled counts match the flags.
        for course in &snapshot.courses {
            let flags = snapshot
                .enrollments
                .iter()
                .filter(|e| e.course_id == course.id)
                .count() as u64;
            prop_assert_eq!(course.enrolled_students, flags);
        }

        // Every certificate names an enrolled student and the course's
        // instructor.
        for cert in &snapshot.certificates {
            prop_assert!(registry.is_enrolled(&cert.student, cert.course_id));
            let course = registry.course(cert.course_id).unwrap();
            prop_assert_eq!(&cert.instructor, &course.instructor);
            prop_assert!(registry.verify_certificate(&cert.certificate_id).is_valid);
        }
        prop_assert_eq!(snapshot.certificates_issued, snapshot.certificates.len() as u64);
    }

    #[test]
    fn value_is_conserved_and_instructors_earn_prices(
        ops in proptest::collection::vec(op_strategy(), 0..60)
    ) {
        let registry = fresh_registry();
        for op in &ops {
            apply(&registry, op);
        }
        let snapshot = registry.snapshot();

        let holders = STUDENTS
            .iter()
            .chain(INSTRUCTORS.iter())
            .chain(["registry"].iter());
        let total: u64 = holders.map(|a| registry.balance_of(&addr(a))).sum();
        prop_assert_eq!(total, FUNDING * STUDENTS.len() as u64);
        prop_assert_eq!(registry.balance_of(&addr("registry")), 0);

        for instructor in INSTRUCTORS {
            let earned: u64 = snapshot
                .courses
                .iter()
                .filter(|c| c.instructor == addr(instructor))
                .map(|c| c.price * c.enrolled_students)
                .sum();
            prop_assert_eq!(registry.balance_of(&addr(instructor)), earned);
        }
    }

    #[test]
    fn rejected_operations_leave_no_trace(
        ops in proptest::collection::vec(op_strategy(), 0..40),
        probe in op_strategy(),
    ) {
        let registry = fresh_registry();
        for op in &ops {
            apply(&registry, op);
        }
        let digest = registry.state_digest().unwrap();
        let events = registry.events().len();

        let rejected = !apply(&registry, &probe);
        if rejected {
            prop_assert_eq!(registry.state_digest().unwrap(), digest);
            prop_assert_eq!(registry.events().len(), events);
        }
    }
}
