//! Replay strategy module
//!
//! This module defines the Strategy pattern for complete command replay
//! pipelines, covering both CSV parsing and applying commands to a ledger.
//! The implementation (sequential or concurrent batches) is selected at
//! runtime.

use crate::cli::StrategyType;
use crate::config::LedgerConfig;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Replay strategy trait for complete command pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the commands in `input_path` and write the final accounts to `output`
    ///
    /// Rejected commands and malformed rows are logged and skipped; they never
    /// cause this method to fail.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - A runtime needed for processing cannot be built
    /// - Output cannot be written
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Counters for one replay run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands the ledger accepted
    pub applied: usize,
    /// Commands the ledger rejected
    pub rejected: usize,
    /// Rows that could not be turned into a command
    pub skipped: usize,
}

impl ReplaySummary {
    pub(crate) fn log(&self, accounts: usize) {
        info!(
            applied = self.applied,
            rejected = self.rejected,
            skipped = self.skipped,
            accounts,
            "replay finished"
        );
    }
}

/// Create a replay strategy of the given type
///
/// `batch_config` is only used by the async strategy and falls back to its
/// defaults when absent.
pub fn create_strategy(
    strategy_type: StrategyType,
    batch_config: Option<BatchConfig>,
    ledger_config: LedgerConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(ledger_config)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(
            batch_config.unwrap_or_default(),
            ledger_config,
        )),
    }
}
