//! Write operation: account creation
//!
//! The existence check runs only after the account's lock is held. Checking
//! first and locking afterwards would let two creators both see the id as
//! free, with the second one silently replacing the first account once it
//! gets the lock. With lock-then-check at most one creation per id succeeds
//! and every other attempt fails with `AlreadyExists`.

use crate::core::lock_table::LockTable;
use crate::core::traits::{AccountStore, WriteMode};
use crate::operation::validation::{validate_balance, validate_id};
use crate::types::{Account, LedgerError};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Business logic for creating accounts
pub struct WriteOperation<S> {
    store: Arc<S>,
    locks: Arc<LockTable>,
    lock_timeout: Duration,
}

impl<S: AccountStore> WriteOperation<S> {
    pub fn new(store: Arc<S>, locks: Arc<LockTable>, lock_timeout: Duration) -> Self {
        Self {
            store,
            locks,
            lock_timeout,
        }
    }

    /// Create `account` with `initial_balance` (zero when absent)
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for an empty id or a negative initial balance
    /// - `LockTimeout` if the account lock could not be acquired
    /// - `AlreadyExists` if the id is taken
    pub fn create_account(
        &self,
        account: &str,
        initial_balance: Option<i64>,
    ) -> Result<Account, LedgerError> {
        validate_id(account)?;
        let balance = validate_balance(initial_balance)?;

        let _guard = self.locks.lock(account, self.lock_timeout)?;

        match self.store.get(account) {
            Ok(_) => return Err(LedgerError::already_exists(account)),
            Err(LedgerError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let created = Account::with_balance(account, balance);
        self.store.put(created.clone(), WriteMode::CreateOnly)?;

        info!(account, balance, "account created");
        Ok(created)
    }
}
