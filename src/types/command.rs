//! Ledger command types
//!
//! A [`LedgerCommand`] is one replayable call into the ledger, as read from
//! a command file. Values are carried raw; the ledger validates them.

use crate::types::AccountId;

/// A single write against the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    /// Open a new account, optionally with an initial balance
    Create {
        account: AccountId,
        initial_balance: Option<i64>,
    },

    /// Move `amount` from one account to another
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: i64,
    },
}

impl LedgerCommand {
    /// Short lowercase name of the command kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerCommand::Create { .. } => "create",
            LedgerCommand::Transfer { .. } => "transfer",
        }
    }
}
