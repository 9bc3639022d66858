//! Transfer operation
//!
//! Moves funds between two distinct accounts while holding both of their
//! locks. The locks are always taken in lexicographic id order, whatever the
//! direction of the transfer. Two opposite transfers (A to B and B to A)
//! therefore queue on the same first lock instead of each holding one lock
//! and waiting on the other, so there is no circular wait. The lock timeout
//! only bounds contention delay.
//!
//! No balance is written until both new balances have been computed, and
//! both locks are released on every exit path through their guards.

use crate::core::lock_table::LockTable;
use crate::core::traits::{AccountStore, WriteMode};
use crate::operation::validation::{validate_amount, validate_distinct, validate_id};
use crate::types::LedgerError;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Order two distinct ids for lock acquisition
///
/// The result depends only on the pair, not on which side is the source.
pub fn lock_order<'a>(from: &'a str, to: &'a str) -> (&'a str, &'a str) {
    if from <= to {
        (from, to)
    } else {
        (to, from)
    }
}

/// Business logic for executing transfers between accounts
pub struct TransferOperation<S> {
    store: Arc<S>,
    locks: Arc<LockTable>,
    lock_timeout: Duration,
}

impl<S: AccountStore> TransferOperation<S> {
    pub fn new(store: Arc<S>, locks: Arc<LockTable>, lock_timeout: Duration) -> Self {
        Self {
            store,
            locks,
            lock_timeout,
        }
    }

    /// Move `amount` from `from` to `to`
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for empty ids, a non-positive amount, `from == to`,
    ///   or a credit that would overflow the destination balance
    /// - `LockTimeout` if either lock could not be acquired
    /// - `NotFound` for the first of `from`, `to` that does not exist
    /// - `InsufficientFunds` if `from` cannot cover `amount`
    pub fn execute(&self, from: &str, to: &str, amount: i64) -> Result<(), LedgerError> {
        validate_id(from)?;
        validate_id(to)?;
        validate_amount(amount)?;
        validate_distinct(from, to)?;

        let (first, second) = lock_order(from, to);
        let _first = self.locks.lock(first, self.lock_timeout)?;
        let _second = self.locks.lock(second, self.lock_timeout)?;

        let mut source = self.store.get(from)?;
        let mut destination = self.store.get(to)?;

        source.withdraw(amount)?;
        destination.credit(amount)?;

        self.store.put(source, WriteMode::Overwrite)?;
        self.store.put(destination, WriteMode::Overwrite)?;

        info!(from, to, amount, "transfer completed");
        Ok(())
    }
}
