//! Account-related types for the account ledger
//!
//! An [`Account`] is a value snapshot: an id plus a balance. Two accounts
//! compare equal when both fields match, so a copy read from the store is
//! interchangeable with the stored value at that instant.

use crate::types::{InvalidRequest, LedgerError};
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// An opaque, non-empty string chosen by the caller at creation time.
pub type AccountId = String;

/// Named balance record
///
/// The balance is private: it can only be raised through [`Account::credit`]
/// and only lowered through [`Account::withdraw`], which refuses to take
/// more than is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account id, immutable after creation
    pub id: AccountId,

    balance: i64,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self::with_balance(id, 0)
    }

    /// Create a new account holding `balance`
    pub fn with_balance(id: impl Into<AccountId>, balance: i64) -> Self {
        Account {
            id: id.into(),
            balance,
        }
    }

    /// Current balance
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Whether the balance covers `amount`
    pub fn has_sufficient_funds(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Add `amount` to the balance
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest(BalanceOverflow)` if the new balance would not
    /// fit in an `i64`. The account is unchanged in that case.
    pub(crate) fn credit(&mut self, amount: i64) -> Result<(), LedgerError> {
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            InvalidRequest::BalanceOverflow {
                account: self.id.clone(),
                balance: self.balance,
                amount,
            }
        })?;
        Ok(())
    }

    /// Take `amount` out of the balance
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` if the balance does not cover `amount`.
    /// The account is unchanged in that case.
    pub(crate) fn withdraw(&mut self, amount: i64) -> Result<(), LedgerError> {
        if !self.has_sufficient_funds(amount) {
            return Err(LedgerError::insufficient_funds(
                &self.id,
                self.balance,
                amount,
            ));
        }
        self.balance -= amount;
        Ok(())
    }
}
