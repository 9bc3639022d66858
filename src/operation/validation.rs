//! Input checks shared by the write and transfer operations
//!
//! Each check is pure and reports its own [`InvalidRequest`] variant.

use crate::types::InvalidRequest;

/// Account ids must be non-empty
pub fn validate_id(account: &str) -> Result<(), InvalidRequest> {
    if account.is_empty() {
        return Err(InvalidRequest::MalformedAccountId(account.to_string()));
    }
    Ok(())
}

/// Transfer amounts must be strictly positive
pub fn validate_amount(amount: i64) -> Result<(), InvalidRequest> {
    if amount <= 0 {
        return Err(InvalidRequest::InvalidTransferAmount(amount));
    }
    Ok(())
}

/// Resolve an optional initial balance, which defaults to zero and must not be negative
pub fn validate_balance(balance: Option<i64>) -> Result<i64, InvalidRequest> {
    let balance = balance.unwrap_or(0);
    if balance < 0 {
        return Err(InvalidRequest::InvalidInitialBalance(balance));
    }
    Ok(balance)
}

/// A transfer must move funds between two different accounts
pub fn validate_distinct(from: &str, to: &str) -> Result<(), InvalidRequest> {
    if from == to {
        return Err(InvalidRequest::SameAccountTransfer(from.to_string()));
    }
    Ok(())
}
