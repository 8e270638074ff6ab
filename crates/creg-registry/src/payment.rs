//! # Payment Rail
//!
//! Value transfer is an external service. The registry sees it through the
//! [`PaymentRail`] trait and drives every enrollment payment as a
//! [`Settlement`]: an ordered list of transfer legs that is either committed
//! as a whole or unwound leg by leg in reverse order.
//!
//! [`InMemoryLedger`] is a balance-map rail for hosts without an external
//! payment network and for tests.
//!
//! ## Enrollment settlement
//!
//! ```text
//! student ──payment──▶ registry account ──price──▶ instructor
//!                               │
//!                               └──payment − price──▶ student (refund)
//! ```
//!
//! Zero-amount legs are skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use creg_core::{Address, Amount};

/// Errors raised by a payment rail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentRailError {
    /// The source account cannot cover the transfer.
    #[error("account {account} holds {available}, needs {required}")]
    InsufficientFunds {
        /// The debited account.
        account: Address,
        /// Amount of the transfer.
        required: Amount,
        /// Balance at the time of the transfer.
        available: Amount,
    },

    /// Crediting the destination would overflow its balance.
    #[error("crediting {amount} to {account} overflows its balance")]
    Overflow {
        /// The credited account.
        account: Address,
        /// Amount of the transfer.
        amount: Amount,
    },

    /// The rail refused the instruction for a rail-specific reason.
    #[error("transfer rejected: {reason}")]
    Rejected {
        /// Human-readable rejection reason.
        reason: String,
    },
}

/// A value-transfer service.
///
/// Implementations are called while the registry holds its write lock and
/// must not call back into the registry.
pub trait PaymentRail: Send + Sync {
    /// Move `amount` from one account to another.
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PaymentRailError>;

    /// Current balance of an account. Unknown accounts hold zero.
    fn balance_of(&self, account: &Address) -> Amount;
}

/// A single executed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLeg {
    /// Debited account.
    pub from: Address,
    /// Credited account.
    pub to: Address,
    /// Amount moved.
    pub amount: Amount,
}

/// An in-progress group of transfers that succeeds or fails as a unit.
pub struct Settlement<'a> {
    rail: &'a mut dyn PaymentRail,
    executed: Vec<TransferLeg>,
}

impl<'a> Settlement<'a> {
    /// Begin a settlement on the given rail.
    pub fn new(rail: &'a mut dyn PaymentRail) -> Self {
        Self {
            rail,
            executed: Vec::new(),
        }
    }

    /// Execute one leg. Zero amounts are skipped without touching the rail.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PaymentRailError> {
        if amount == 0 {
            return Ok(());
        }
        self.rail.transfer(from, to, amount)?;
        self.executed.push(TransferLeg {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    /// Legs executed so far, in order.
    pub fn executed(&self) -> &[TransferLeg] {
        &self.executed
    }

    /// Accept every executed leg.
    pub fn commit(self) -> Vec<TransferLeg> {
        self.executed
    }

    /// Reverse every executed leg, newest first.
    ///
    /// Returns the legs whose reversal the rail refused. Each refusal leaves
    /// value stranded and is logged at error level.
    pub fn unwind(self) -> Vec<TransferLeg> {
        let Self { rail, executed } = self;
        let mut stranded = Vec::new();
        for leg in executed.into_iter().rev() {
            match rail.transfer(&leg.to, &leg.from, leg.amount) {
                Ok(()) => {
                    tracing::warn!(
                        from = %leg.from,
                        to = %leg.to,
                        amount = leg.amount,
                        "reversed settlement leg"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        from = %leg.from,
                        to = %leg.to,
                        amount = leg.amount,
                        error = %e,
                        "failed to reverse settlement leg"
                    );
                    stranded.push(leg);
                }
            }
        }
        stranded
    }
}

impl std::fmt::Debug for Settlement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settlement")
            .field("executed", &self.executed)
            .finish()
    }
}

/// A payment rail backed by an in-memory balance map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<Address, Amount>,
}

impl InMemoryLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger with opening balances.
    pub fn with_balances(balances: impl IntoIterator<Item = (Address, Amount)>) -> Self {
        let mut ledger = Self::new();
        for (account, amount) in balances {
            ledger.credit(account, amount);
        }
        ledger
    }

    /// Mint value into an account, saturating at `Amount::MAX`.
    pub fn credit(&mut self, account: Address, amount: Amount) {
        let balance = self.balances.entry(account).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> u128 {
        self.balances.values().map(|&b| u128::from(b)).sum()
    }
}

impl PaymentRail for InMemoryLedger {
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PaymentRailError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(PaymentRailError::InsufficientFunds {
                account: from.clone(),
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| PaymentRailError::Overflow {
                account: to.clone(),
                amount,
            })?;
        self.balances.insert(from.clone(), available - amount);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }
}
