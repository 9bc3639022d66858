//! Account Ledger Library
//! # Overview
//!
//! This library provides a concurrent in-memory ledger of named accounts with
//! integer balances. Any number of threads may create accounts, read them and
//! transfer funds between them. Each account is guarded by an owned lock with
//! a bounded wait, and transfers take their two locks in a canonical order so
//! opposing transfers cannot deadlock.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, LedgerCommand, LedgerError)
//! - [`core`] - Storage and concurrency:
//!   - [`core::lock_table`] - Per-account owned locks with timeouts
//!   - [`core::store`] - In-memory account store
//!   - [`core::engine`] - The [`Ledger`] facade
//!   - [`core::batch_processor`] - Concurrent batch replay
//! - [`operation`] - Read, write and transfer business logic
//! - [`io`] - CSV command input and account output
//! - [`strategy`] - Sequential and concurrent replay pipelines
//! - [`api`] - HTTP surface
//! - [`cli`] - CLI arguments parsing
//!
//! # Guarantees
//!
//! - At most one creation per account id succeeds
//! - A transfer either moves the full amount or changes nothing
//! - The total of all balances changes only through account creation
//! - No balance is ever negative

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod logging;
pub mod operation;
pub mod strategy;
pub mod types;

pub use config::LedgerConfig;
pub use crate::core::{AccountStore, InMemoryStore, Ledger, LockTable};
pub use io::write_accounts_csv;
pub use types::{Account, AccountId, InvalidRequest, LedgerCommand, LedgerError};
