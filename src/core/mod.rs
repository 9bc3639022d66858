//! Core ledger module
//!
//! This module contains the ledger's concurrency and storage components:
//! - `traits` - the account store abstraction
//! - `store` - the in-memory account store
//! - `lock_table` - per-account owned locks with timeouts
//! - `engine` - the ledger facade wiring operations together
//! - `batch_processor` - concurrent batch replay on the blocking pool

pub mod batch_processor;
pub mod engine;
pub mod lock_table;
pub mod store;
pub mod traits;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::Ledger;
pub use lock_table::{LockGuard, LockTable, LockToken, DEFAULT_LOCK_TIMEOUT};
pub use store::InMemoryStore;
pub use traits::{AccountStore, WriteMode};
