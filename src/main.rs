//! Finance Ledger CLI
//!
//! Command-line interface for importing income/outcome transactions from a
//! CSV file into a fresh ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > balance.csv
//! cargo run -- --strategy sync transactions.csv
//! cargo run -- --mode best-effort --report transactions transactions.csv
//! cargo run -- --strategy async --max-concurrent 8 transactions.csv
//! ```
//!
//! The selected report is written to stdout. Logs go to stderr and are
//! filtered with `RUST_LOG` (default: `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid header, rejected row in fail-fast mode, etc.)

use finance_ledger::cli;
use finance_ledger::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = cli::parse_args();

    let strategy = strategy::create_strategy(args.strategy, Some(args.to_import_config()));

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, args.report, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
