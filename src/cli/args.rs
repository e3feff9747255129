use crate::strategy::{ImportConfig, ImportMode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Import transactions into a personal finance ledger and report the result
#[derive(Parser, Debug)]
#[command(name = "finance-ledger")]
#[command(
    about = "Import income/outcome transactions and report the ledger balance",
    long_about = None
)]
pub struct CliArgs {
    /// Import file with a `title,type,value,category` header
    #[arg(value_name = "INPUT", help = "Path to the import CSV file")]
    pub input_file: PathBuf,

    /// Import strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Import strategy: 'sync' for sequential or 'async' for concurrent submission"
    )]
    pub strategy: StrategyType,

    /// Failure handling for rejected rows
    #[arg(
        long = "mode",
        value_name = "MODE",
        default_value = "fail-fast",
        help = "'fail-fast' stops at the first rejected row, 'best-effort' imports what it can"
    )]
    pub mode: ImportMode,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads for async imports (default: CPU cores)"
    )]
    pub max_workers: Option<usize>,

    /// Report written to stdout
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "balance",
        help = "Report to write: 'balance' or 'transactions'"
    )]
    pub report: ReportKind,
}

/// Available import strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// `income,outcome,total`
    Balance,
    /// `id,title,type,value,category`
    Transactions,
}

impl CliArgs {
    /// Create an ImportConfig from CLI arguments
    ///
    /// # Returns
    ///
    /// An `ImportConfig` with values from CLI arguments or defaults.
    pub fn to_import_config(&self) -> ImportConfig {
        match self.max_workers {
            Some(max_workers) => ImportConfig::new(self.mode, max_workers),
            None => ImportConfig {
                mode: self.mode,
                ..ImportConfig::default()
            },
        }
    }
}
