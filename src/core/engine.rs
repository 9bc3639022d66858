//! Ledger engine
//!
//! This module provides the [`Ledger`], which wires the account store and the
//! lock table into the read, write and transfer operations and exposes them
//! as one thread-safe handle.
//!
//! The ledger enforces:
//! - Validation of every input before any lock is requested
//! - At most one successful creation per account id
//! - Conservation of funds across transfers
//! - Release of every acquired lock, whatever the outcome

use crate::config::LedgerConfig;
use crate::core::lock_table::LockTable;
use crate::core::store::InMemoryStore;
use crate::core::traits::AccountStore;
use crate::operation::{ReadOperation, TransferOperation, WriteOperation};
use crate::types::{Account, LedgerCommand, LedgerError};
use std::sync::Arc;

/// Thread-safe account ledger
///
/// Share it between threads behind an `Arc`; every method takes `&self`.
pub struct Ledger<S = InMemoryStore> {
    store: Arc<S>,
    locks: Arc<LockTable>,
    read: ReadOperation<S>,
    write: WriteOperation<S>,
    transfer: TransferOperation<S>,
}

impl Ledger<InMemoryStore> {
    /// Create an empty in-memory ledger
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }
}

impl Default for Ledger<InMemoryStore> {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl<S: AccountStore> Ledger<S> {
    /// Create a ledger on top of an existing store
    pub fn with_store(store: Arc<S>, config: LedgerConfig) -> Self {
        let locks = Arc::new(LockTable::new());
        Self {
            read: ReadOperation::new(Arc::clone(&store)),
            write: WriteOperation::new(
                Arc::clone(&store),
                Arc::clone(&locks),
                config.lock_timeout,
            ),
            transfer: TransferOperation::new(
                Arc::clone(&store),
                Arc::clone(&locks),
                config.lock_timeout,
            ),
            store,
            locks,
        }
    }

    /// Snapshot of all accounts
    pub fn list_accounts(&self) -> Vec<Account> {
        self.read.read_accounts()
    }

    /// Look up one account
    pub fn get_account(&self, account: &str) -> Result<Account, LedgerError> {
        self.read.read_account(account)
    }

    /// Create an account, with a zero balance when `initial_balance` is absent
    pub fn create_account(
        &self,
        account: &str,
        initial_balance: Option<i64>,
    ) -> Result<Account, LedgerError> {
        self.write.create_account(account, initial_balance)
    }

    /// Atomically move `amount` from `from` to `to`
    pub fn transfer(&self, from: &str, to: &str, amount: i64) -> Result<(), LedgerError> {
        self.transfer.execute(from, to, amount)
    }

    /// Apply a replayed command
    pub fn apply(&self, command: &LedgerCommand) -> Result<(), LedgerError> {
        match command {
            LedgerCommand::Create {
                account,
                initial_balance,
            } => self.create_account(account, *initial_balance).map(|_| ()),
            LedgerCommand::Transfer { from, to, amount } => self.transfer(from, to, *amount),
        }
    }

    /// Sum of all balances in the current snapshot
    ///
    /// Widened to `i128` so the sum of many large balances cannot overflow.
    pub fn total_balance(&self) -> i128 {
        self.store
            .list()
            .iter()
            .map(|account| i128::from(account.balance()))
            .sum()
    }

    /// The lock table guarding this ledger's accounts
    pub fn locks(&self) -> &LockTable {
        &self.locks
    }
}
