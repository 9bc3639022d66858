//! Account Ledger CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- replay commands.csv > accounts.csv
//! cargo run -- replay --strategy async --batch-size 2000 --max-concurrent 8 commands.csv > accounts.csv
//! cargo run -- --lock-timeout-ms 1000 serve --listen 0.0.0.0:8080
//! ```
//!
//! `replay` applies every command in the input CSV and prints the final
//! accounts to stdout. `serve` exposes the ledger over HTTP until Ctrl-C.
//! Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad arguments, unreadable input, bind failure, etc.)

use account_ledger::cli::{self, Command};
use account_ledger::core::Ledger;
use account_ledger::{api, logging, strategy};
use std::process;
use std::sync::Arc;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logging::init_tracing(&args.log_level) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let ledger_config = args.to_ledger_config();
    let result = match &args.command {
        Command::Replay(replay) => {
            let strategy =
                strategy::create_strategy(replay.strategy, replay.to_batch_config(), ledger_config);
            let mut output = std::io::stdout();
            strategy.process(&replay.input_file, &mut output)
        }
        Command::Serve(serve) => {
            let ledger = Arc::new(Ledger::new(ledger_config));
            api::serve_blocking(serve.listen, ledger)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
