//! Sequential replay strategy
//!
//! Applies commands one at a time in file order, coordinating the
//! `SyncReader` (CSV input), the `Ledger` (business logic) and
//! `csv_format::write_accounts_csv` (output).
//!
//! Records are streamed, so memory use is O(accounts) rather than
//! O(commands).

use crate::config::LedgerConfig;
use crate::core::Ledger;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ReplaySummary};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Sequential replay strategy
///
/// ```no_run
/// use account_ledger::config::LedgerConfig;
/// use account_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let strategy = SyncProcessingStrategy::new(LedgerConfig::default());
/// let mut output = std::io::stdout();
///
/// if let Err(e) = strategy.process(Path::new("commands.csv"), &mut output) {
///     eprintln!("Fatal error: {}", e);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    ledger_config: LedgerConfig,
}

impl SyncProcessingStrategy {
    pub fn new(ledger_config: LedgerConfig) -> Self {
        Self { ledger_config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let ledger = Ledger::new(self.ledger_config);
        let reader = SyncReader::new(input_path)?;
        let mut summary = ReplaySummary::default();

        for result in reader {
            match result {
                Ok(command) => match ledger.apply(&command) {
                    Ok(()) => summary.applied += 1,
                    Err(e) => {
                        warn!(command = command.kind(), error = %e, "command rejected");
                        summary.rejected += 1;
                    }
                },
                Err(e) => {
                    warn!(error = %e, "skipping malformed record");
                    summary.skipped += 1;
                }
            }
        }

        let accounts = ledger.list_accounts();
        summary.log(accounts.len());
        write_accounts_csv(&accounts, output)
    }
}
