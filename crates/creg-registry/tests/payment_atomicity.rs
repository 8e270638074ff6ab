//! Enrollment is all-or-nothing: a rejected enrollment leaves registry
//! state and the event log exactly as they were, and every settlement leg
//! the rail allows to be reversed is reversed.

use std::sync::Arc;

use creg_core::{Address, Amount, CourseId, ManualClock};
use creg_registry::{
    CredentialRegistry, ErrorKind, InMemoryLedger, PaymentRail, PaymentRailError,
    RegistryConfig, RegistryError,
};

fn addr(s: &str) -> Address {
    Address::new(s).unwrap()
}

/// Rail that refuses every transfer into one account.
struct RefusingRail {
    ledger: InMemoryLedger,
    refuse_to: Address,
}

impl PaymentRail for RefusingRail {
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PaymentRailError> {
        if *to == self.refuse_to {
            return Err(PaymentRailError::Rejected {
                reason: format!("transfers to {to} are frozen"),
            });
        }
        self.ledger.transfer(from, to, amount)
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account)
    }
}

fn registry_on(rail: Box<dyn PaymentRail>) -> CredentialRegistry {
    let registry = CredentialRegistry::new(
        addr("owner"),
        RegistryConfig::default(),
        rail,
        Arc::new(ManualClock::at_epoch_secs(1_767_225_600)),
    )
    .unwrap();
    registry.authorize_instructor(&addr("owner"), &addr("ivy")).unwrap();
    registry
        .create_course(&addr("ivy"), "Networks", "Packets", 100, 30)
        .unwrap();
    registry.register_student(&addr("sam"), "Sam").unwrap();
    registry
}

#[test]
fn instructor_leg_failure_unwinds_the_payment() {
    let rail = RefusingRail {
        ledger: InMemoryLedger::with_balances([(addr("sam"), 500)]),
        refuse_to: addr("ivy"),
    };
    let registry = registry_on(Box::new(rail));
    let before = registry.state_digest().unwrap();
    let events_before = registry.events().len();

    let err = registry
        .enroll_in_course(&addr("sam"), CourseId::new(1), 150)
        .unwrap_err();
    assert!(matches!(err, RegistryError::Transfer(PaymentRailError::Rejected { .. })));

    assert_eq!(registry.state_digest().unwrap(), before);
    assert_eq!(registry.events().len(), events_before);
    assert!(!registry.is_enrolled(&addr("sam"), CourseId::new(1)));
    assert!(registry.get_student_enrolled_courses(&addr("sam")).is_empty());
    assert_eq!(registry.get_course_details(CourseId::new(1)).enrolled_students, 0);
    assert_eq!(registry.balance_of(&addr("sam")), 500);
    assert_eq!(registry.balance_of(&addr("registry")), 0);
    assert_eq!(registry.balance_of(&addr("ivy")), 0);
}

#[test]
fn refund_leg_failure_restores_state_and_reverses_what_it_can() {
    // The refund leg fails, the instructor leg is reversed, and reversing
    // the student payment is refused by the same rail, stranding it in the
    // registry account.
    let rail = RefusingRail {
        ledger: InMemoryLedger::with_balances([(addr("sam"), 500)]),
        refuse_to: addr("sam"),
    };
    let registry = registry_on(Box::new(rail));
    let before = registry.snapshot();

    let err = registry
        .enroll_in_course(&addr("sam"), CourseId::new(1), 150)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transfer);
    assert_eq!(registry.snapshot(), before);
    assert_eq!(registry.balance_of(&addr("ivy")), 0);
    assert_eq!(registry.balance_of(&addr("registry")), 150);
    assert_eq!(registry.balance_of(&addr("sam")), 350);
}

#[test]
fn short_payment_changes_nothing() {
    let registry = registry_on(Box::new(InMemoryLedger::with_balances([(
        addr("sam"),
        500,
    )])));
    let before = registry.state_digest().unwrap();

    let err = registry
        .enroll_in_course(&addr("sam"), CourseId::new(1), 99)
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InsufficientPayment {
            required: 100,
            offered: 99,
            ..
        }
    ));
    assert_eq!(registry.state_digest().unwrap(), before);
    assert_eq!(registry.balance_of(&addr("sam")), 500);
}

#[test]
fn unfunded_student_cannot_enroll() {
    let registry = registry_on(Box::new(InMemoryLedger::with_balances([(addr("sam"), 60)])));
    let err = registry
        .enroll_in_course(&addr("sam"), CourseId::new(1), 100)
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Transfer(PaymentRailError::InsufficientFunds { .. })
    ));
    assert!(!registry.is_enrolled(&addr("sam"), CourseId::new(1)));
    assert_eq!(registry.balance_of(&addr("sam")), 60);
}

#[test]
fn overpayment_is_refunded_in_full() {
    let registry = registry_on(Box::new(InMemoryLedger::with_balances([(
        addr("sam"),
        1_000,
    )])));
    let legs = registry
        .enroll_in_course(&addr("sam"), CourseId::new(1), 900)
        .unwrap();
    assert_eq!(legs.len(), 3);
    assert_eq!(legs[1].amount, 100);
    assert_eq!(legs[2].amount, 800);
    assert_eq!(registry.balance_of(&addr("ivy")), 100);
    assert_eq!(registry.balance_of(&addr("sam")), 900);
    assert_eq!(registry.balance_of(&addr("registry")), 0);
}

#[test]
fn free_course_needs_no_funds() {
    let registry = registry_on(Box::new(InMemoryLedger::new()));
    let free = registry
        .create_course(&addr("ivy"), "Open day", "Tour", 0, 1)
        .unwrap();
    let legs = registry.enroll_in_course(&addr("sam"), free, 0).unwrap();
    assert!(legs.is_empty());
    assert!(registry.is_enrolled(&addr("sam"), free));
}
