//! In-memory account store
//!
//! [`InMemoryStore`] keeps every account in a `DashMap`, which gives
//! thread-safe access to individual entries through internal sharding.
//! Accounts live for the lifetime of the process; nothing is persisted.
//!
//! # Thread Safety
//!
//! Each single call is atomic with respect to the entry it touches. There
//! is no atomicity across calls: a `get` followed by a `put` can interleave
//! with other writers unless the caller holds the account's lock.

use crate::core::traits::{AccountStore, WriteMode};
use crate::types::{Account, AccountId, LedgerError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Thread-safe in-memory account store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: DashMap<AccountId, Account>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account has been stored yet
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryStore {
    fn list(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn get(&self, id: &str) -> Result<Account, LedgerError> {
        self.accounts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::not_found(id))
    }

    fn put(&self, account: Account, mode: WriteMode) -> Result<(), LedgerError> {
        match mode {
            WriteMode::Overwrite => {
                self.accounts.insert(account.id.clone(), account);
                Ok(())
            }
            WriteMode::CreateOnly => match self.accounts.entry(account.id.clone()) {
                Entry::Occupied(_) => Err(LedgerError::already_exists(&account.id)),
                Entry::Vacant(entry) => {
                    entry.insert(account);
                    Ok(())
                }
            },
        }
    }
}
