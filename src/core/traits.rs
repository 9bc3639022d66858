//! Core traits for account storage
//!
//! The ledger operations talk to storage through [`AccountStore`] so the
//! in-memory map can be swapped for an instrumented or alternative backend.

use crate::types::{Account, LedgerError};

/// How [`AccountStore::put`] treats an id that is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail with `AlreadyExists` if the id is present
    CreateOnly,
    /// Replace whatever is stored under the id
    Overwrite,
}

/// Trait for the authoritative id -> account map
///
/// Implementations provide no cross-call atomicity. Callers that need a
/// read-modify-write to be atomic serialize it through the lock table.
pub trait AccountStore: Send + Sync {
    /// Snapshot of every stored account
    ///
    /// Consistent only at the instant each entry is copied.
    fn list(&self) -> Vec<Account>;

    /// Get a copy of one account
    fn get(&self, id: &str) -> Result<Account, LedgerError>;

    /// Store an account according to `mode`
    fn put(&self, account: Account, mode: WriteMode) -> Result<(), LedgerError>;
}
