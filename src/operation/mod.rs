//! Ledger operations
//!
//! - `read` - unlocked snapshot lookups
//! - `write` - race-free account creation
//! - `transfer` - deadlock-free two-account transfers
//! - `validation` - input checks shared by write and transfer

pub mod read;
pub mod transfer;
pub mod validation;
pub mod write;

pub use read::ReadOperation;
pub use transfer::{lock_order, TransferOperation};
pub use write::WriteOperation;
