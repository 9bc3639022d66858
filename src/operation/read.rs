//! Read operation
//!
//! Lookups go straight to the store without locking. The results are
//! snapshots and may already be stale when returned.

use crate::core::traits::AccountStore;
use crate::operation::validation::validate_id;
use crate::types::{Account, LedgerError};
use std::sync::Arc;

/// Business logic for retrieving accounts from the store
pub struct ReadOperation<S> {
    store: Arc<S>,
}

impl<S: AccountStore> ReadOperation<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every account currently stored
    pub fn read_accounts(&self) -> Vec<Account> {
        self.store.list()
    }

    /// One account by id
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `account` is empty
    /// - `NotFound` if no such account exists
    pub fn read_account(&self, account: &str) -> Result<Account, LedgerError> {
        validate_id(account)?;
        self.store.get(account)
    }
}
