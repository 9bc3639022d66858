//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: the Account entity and its id type
//! - `command`: replayable ledger commands
//! - `error`: error types for the ledger

pub mod account;
pub mod command;
pub mod error;

pub use account::{Account, AccountId};
pub use command::LedgerCommand;
pub use error::{InvalidRequest, LedgerError};
