//! Batch processing for concurrent command replay
//!
//! This module provides the `BatchProcessor` struct, which applies one batch
//! of replayed commands against a shared [`Ledger`] with as much concurrency
//! as the ledger's locking allows.
//!
//! # Design
//!
//! A batch is split by command kind. All creations run concurrently first,
//! then all transfers run concurrently, so a transfer never races the
//! creation of an account from the same batch. Ordering between transfers
//! of one batch is not preserved; the per-account locks keep every transfer
//! atomic and the total balance unchanged regardless of interleaving.
//!
//! Ledger operations block on account locks, so each command runs on the
//! blocking thread pool through `spawn_blocking`.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<Ledger>  (shared ledger)
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::error;

use super::Ledger;
use crate::types::{LedgerCommand, LedgerError};

/// Result of applying a single command
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The command that was applied
    pub command: LedgerCommand,

    /// The outcome of applying it
    pub result: Result<(), LedgerError>,
}

/// Batch processor for replayed ledger commands
///
/// Cheap to clone; every clone shares the same ledger.
#[derive(Clone)]
pub struct BatchProcessor {
    ledger: Arc<Ledger>,
}

impl BatchProcessor {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Split a batch into creations and transfers, keeping input order in each
    pub fn partition_by_kind(
        &self,
        batch: Vec<LedgerCommand>,
    ) -> (Vec<LedgerCommand>, Vec<LedgerCommand>) {
        batch
            .into_iter()
            .partition(|command| matches!(command, LedgerCommand::Create { .. }))
    }

    /// Apply a batch of commands
    ///
    /// Returns one result per command that ran to completion. Results may be
    /// in a different order than the input. Failed commands are reported in
    /// their result and never stop the rest of the batch.
    pub async fn process_batch(&self, batch: Vec<LedgerCommand>) -> Vec<ProcessingResult> {
        let (creates, transfers) = self.partition_by_kind(batch);

        let mut results = self.run_concurrently(creates).await;
        results.extend(self.run_concurrently(transfers).await);
        results
    }

    async fn run_concurrently(&self, commands: Vec<LedgerCommand>) -> Vec<ProcessingResult> {
        let tasks: Vec<JoinHandle<ProcessingResult>> = commands
            .into_iter()
            .map(|command| {
                let ledger = Arc::clone(&self.ledger);
                tokio::task::spawn_blocking(move || {
                    let result = ledger.apply(&command);
                    ProcessingResult { command, result }
                })
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(result) => results.push(result),
                Err(e) => error!(error = %e, "ledger task failed"),
            }
        }

        results
    }
}
