//! Error types for the account ledger
//!
//! Every core call reports failure as a [`LedgerError`]. The set of kinds is
//! fixed so a transport layer can map each one to exactly one response:
//!
//! - **InvalidRequest**: malformed input, carries the specific [`InvalidRequest`] reason
//! - **NotFound**: the referenced account does not exist
//! - **AlreadyExists**: account creation conflicted with an existing id
//! - **InsufficientFunds**: business-rule rejection of a transfer
//! - **LockTimeout**: the account lock could not be obtained in time
//!
//! Only `LockTimeout` is transient. Everything else will fail again on retry.

use crate::types::AccountId;
use thiserror::Error;

/// Main error type for ledger operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The request was malformed and must be fixed by the caller
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequest),

    /// No account with the given id exists
    #[error("Account {account} not found")]
    NotFound {
        /// The id that was looked up
        account: AccountId,
    },

    /// An account with the given id already exists
    #[error("Account {account} already exists")]
    AlreadyExists {
        /// The id that was being created
        account: AccountId,
    },

    /// The source account cannot cover the transfer
    ///
    /// Both balances are left unchanged when this is returned.
    #[error(
        "Insufficient funds for account {account}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// Source account id
        account: AccountId,
        /// Balance at the time of the check
        available: i64,
        /// Transfer amount
        requested: i64,
    },

    /// The lock for an account was not acquired before the timeout elapsed
    ///
    /// This is the only transient error: retrying may succeed once
    /// contention drops.
    #[error("Could not acquire lock for account {account}")]
    LockTimeout {
        /// The id whose lock timed out
        account: AccountId,
    },
}

/// Reasons a request is rejected as malformed
///
/// Each validation failure has its own variant so callers can report
/// the precise cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    /// Account ids must be non-empty
    #[error("malformed account id '{0}'")]
    MalformedAccountId(String),

    /// Transfer amounts must be strictly positive
    #[error("invalid transfer amount {0}")]
    InvalidTransferAmount(i64),

    /// Initial balances must not be negative
    #[error("invalid initial balance {0}")]
    InvalidInitialBalance(i64),

    /// Source and destination of a transfer must differ
    #[error("transfer from account {0} to itself")]
    SameAccountTransfer(AccountId),

    /// Crediting the account would overflow its balance
    #[error("crediting {amount} to account {account} with balance {balance} overflows")]
    BalanceOverflow {
        account: AccountId,
        balance: i64,
        amount: i64,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a NotFound error
    pub fn not_found(account: &str) -> Self {
        LedgerError::NotFound {
            account: account.to_string(),
        }
    }

    /// Create an AlreadyExists error
    pub fn already_exists(account: &str) -> Self {
        LedgerError::AlreadyExists {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, available: i64, requested: i64) -> Self {
        LedgerError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    /// Create a LockTimeout error
    pub fn lock_timeout(account: &str) -> Self {
        LedgerError::LockTimeout {
            account: account.to_string(),
        }
    }

    /// Whether retrying the same call could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::LockTimeout { .. })
    }
}
