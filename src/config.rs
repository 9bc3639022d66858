//! Configuration for the ledger

use crate::core::lock_table::DEFAULT_LOCK_TIMEOUT;
use std::time::Duration;

/// Ledger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Upper bound on how long an operation waits for a single account lock
    pub lock_timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}

impl LedgerConfig {
    /// Configuration with a custom lock timeout
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self { lock_timeout }
    }
}
