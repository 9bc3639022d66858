use crate::config::LedgerConfig;
use crate::strategy::BatchConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Concurrent account ledger with owned per-account locks
#[derive(Parser, Debug)]
#[command(name = "account-ledger")]
#[command(about = "Concurrent account ledger with owned per-account locks", long_about = None)]
pub struct CliArgs {
    /// Upper bound on the wait for a single account lock
    #[arg(
        long = "lock-timeout-ms",
        value_name = "MILLIS",
        default_value_t = 5000,
        global = true,
        help = "Lock acquisition timeout in milliseconds"
    )]
    pub lock_timeout_ms: u64,

    /// Default log filter when RUST_LOG is unset
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        global = true,
        help = "Log level used when RUST_LOG is not set (error, warn, info, debug, trace)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a CSV file of ledger commands and print the final accounts
    Replay(ReplayArgs),

    /// Serve the ledger over HTTP
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReplayArgs {
    /// Input CSV file path containing ledger commands
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Replay strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Replay strategy: 'sync' for file order or 'async' for concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of commands applied at once (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of commands applied concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP listener to
    #[arg(long = "listen", value_name = "ADDR", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,
}

/// Available replay strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Ledger configuration from the global options
    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig::with_lock_timeout(Duration::from_millis(self.lock_timeout_ms))
    }
}

impl ReplayArgs {
    /// Create a BatchConfig from the replay options, or `None` for the sync strategy
    pub fn to_batch_config(&self) -> Option<BatchConfig> {
        if self.strategy != StrategyType::Async {
            return None;
        }

        let default = BatchConfig::default();
        Some(BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.max_concurrent_batches
                .unwrap_or(default.max_concurrent_batches),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn replay_args(args: &[&str]) -> ReplayArgs {
        match CliArgs::try_parse_from(args).unwrap().command {
            Command::Replay(replay) => replay,
            other => panic!("Expected replay, got {:?}", other),
        }
    }

    #[rstest]
    #[case::default_strategy(&["program", "replay", "input.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "replay", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "replay", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        assert_eq!(replay_args(args).strategy, expected);
    }

    #[rstest]
    #[case::sync_has_no_batch_config(&["program", "replay", "input.csv"], None)]
    #[case::async_defaults(
        &["program", "replay", "--strategy", "async", "input.csv"],
        Some((1000, num_cpus::get()))
    )]
    #[case::async_custom(
        &["program", "replay", "--strategy", "async", "--batch-size", "2000", "--max-concurrent", "8", "input.csv"],
        Some((2000, 8))
    )]
    #[case::zero_values_fall_back(
        &["program", "replay", "--strategy", "async", "--batch-size", "0", "--max-concurrent", "0", "input.csv"],
        Some((1000, num_cpus::get()))
    )]
    fn test_batch_config_conversion(#[case] args: &[&str], #[case] expected: Option<(usize, usize)>) {
        let config = replay_args(args).to_batch_config();

        assert_eq!(
            config.map(|c| (c.batch_size, c.max_concurrent_batches)),
            expected
        );
    }

    #[rstest]
    #[case::default(&["program", "serve"], 5000)]
    #[case::before_subcommand(&["program", "--lock-timeout-ms", "250", "serve"], 250)]
    #[case::after_subcommand(&["program", "replay", "input.csv", "--lock-timeout-ms", "10"], 10)]
    fn test_lock_timeout_parsing(#[case] args: &[&str], #[case] expected_ms: u64) {
        let parsed = CliArgs::try_parse_from(args).unwrap();

        assert_eq!(
            parsed.to_ledger_config().lock_timeout,
            Duration::from_millis(expected_ms)
        );
    }

    #[rstest]
    #[case::default(&["program", "serve"], "127.0.0.1:8080")]
    #[case::custom(&["program", "serve", "--listen", "0.0.0.0:9000"], "0.0.0.0:9000")]
    fn test_listen_parsing(#[case] args: &[&str], #[case] expected: &str) {
        match CliArgs::try_parse_from(args).unwrap().command {
            Command::Serve(serve) => assert_eq!(serve.listen, expected.parse().unwrap()),
            other => panic!("Expected serve, got {:?}", other),
        }
    }

    #[rstest]
    #[case::missing_subcommand(&["program"])]
    #[case::missing_input(&["program", "replay"])]
    #[case::invalid_strategy(&["program", "replay", "--strategy", "invalid", "input.csv"])]
    #[case::invalid_listen(&["program", "serve", "--listen", "nowhere"])]
    #[case::negative_timeout(&["program", "--lock-timeout-ms", "-1", "serve"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
