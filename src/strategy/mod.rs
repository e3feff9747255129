//! Import strategy module
//!
//! This module defines the Strategy pattern for the bulk import pipeline:
//! reading import text, submitting its rows to the ledger engine, and writing a
//! report. Two implementations can be selected at runtime:
//!
//! - **sync**: rows are submitted one at a time, in input order
//! - **async**: the rows of each group are submitted concurrently on a tokio
//!   runtime
//!
//! Both strategies validate the header first, submit every income row before
//! any outcome row, and share the same failure handling (`ImportMode`).

use crate::cli::{ReportKind, StrategyType};
use crate::core::LedgerEngine;
use crate::io::{write_balance_csv, write_transactions_csv};
use crate::types::{LedgerError, Transaction};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncImportStrategy;
pub use sync::SyncImportStrategy;

/// How an import reacts to rows rejected by transaction creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImportMode {
    /// Stop at the first failing row and report the import as failed
    ///
    /// Rows committed before the failure stay committed. Rows not yet tried
    /// are never submitted.
    #[default]
    FailFast,

    /// Attempt every row and report all failures alongside the successes
    BestEffort,
}

/// Configuration for imports
#[derive(Clone, Debug)]
pub struct ImportConfig {
    /// Failure handling
    pub mode: ImportMode,

    /// Worker threads of the async runtime (async strategy only)
    pub max_workers: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            mode: ImportMode::default(),
            max_workers: num_cpus::get(),
        }
    }
}

impl ImportConfig {
    /// Create a new ImportConfig with custom values
    ///
    /// A worker count of zero falls back to the default.
    pub fn new(mode: ImportMode, max_workers: usize) -> Self {
        let default = Self::default();

        let max_workers = if max_workers == 0 {
            warn!(
                "Invalid max_workers ({}), using default ({})",
                max_workers, default.max_workers
            );
            default.max_workers
        } else {
            max_workers
        };

        Self { mode, max_workers }
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Created transactions, incomes first, each group in input order
    pub transactions: Vec<Transaction>,

    /// Rejected rows (`RowFailure`), only populated in best-effort mode
    pub failures: Vec<LedgerError>,

    /// Lines or rows dropped before submission
    pub skipped: usize,
}

impl ImportReport {
    /// Whether every submitted row was imported
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn log_summary(&self) {
        info!(
            imported = self.transactions.len(),
            failed = self.failures.len(),
            skipped = self.skipped,
            "Import finished"
        );
    }
}

/// Import strategy trait for complete import pipelines
pub trait ImportStrategy: Send + Sync {
    /// Import raw text into the ledger behind `engine`
    ///
    /// # Errors
    ///
    /// - `InvalidHeader` if the header is wrong; no row is submitted
    /// - `ImportFailed` in fail-fast mode if any row is rejected
    fn import(&self, engine: &LedgerEngine, raw_text: &str) -> Result<ImportReport, LedgerError>;

    /// Import the file at `input_path` into a new ledger and write a report
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the import fails, or the
    /// report cannot be written.
    fn process(
        &self,
        input_path: &Path,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<ImportReport, LedgerError>;
}

/// Import raw text with the synchronous, fail-fast pipeline
///
/// # Returns
///
/// The created transactions, incomes first, each group in input order.
pub fn import_transactions(
    engine: &LedgerEngine,
    raw_text: &str,
) -> Result<Vec<Transaction>, LedgerError> {
    SyncImportStrategy::new(ImportMode::FailFast)
        .import(engine, raw_text)
        .map(|report| report.transactions)
}

/// Create an import strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of import strategy to create (Sync or Async)
/// * `config` - Optional configuration, defaults apply when `None`
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ImportConfig>,
) -> Box<dyn ImportStrategy> {
    let config = config.unwrap_or_default();
    match strategy_type {
        StrategyType::Sync => Box::new(SyncImportStrategy::new(config.mode)),
        StrategyType::Async => Box::new(AsyncImportStrategy::new(config)),
    }
}

/// Write the requested report for a finished import
pub(crate) fn write_report(
    engine: &LedgerEngine,
    import: &ImportReport,
    report: ReportKind,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match report {
        ReportKind::Balance => write_balance_csv(&engine.balance()?, output),
        ReportKind::Transactions => {
            write_transactions_csv(&import.transactions, &engine.categories(), output)
        }
    }
}

/// Collects results of submitted rows according to the import mode
pub(crate) struct ImportCollector {
    mode: ImportMode,
    report: ImportReport,
}

impl ImportCollector {
    pub(crate) fn new(mode: ImportMode, skipped: usize) -> Self {
        Self {
            mode,
            report: ImportReport {
                skipped,
                ..ImportReport::default()
            },
        }
    }

    /// Record one row result, already wrapped as a `RowFailure` on error
    pub(crate) fn record(&mut self, result: Result<Transaction, LedgerError>) {
        match result {
            Ok(transaction) => self.report.transactions.push(transaction),
            Err(failure) => {
                warn!("Import row rejected: {}", failure);
                self.report.failures.push(failure);
            }
        }
    }

    /// Whether fail-fast mode requires the import to stop now
    pub(crate) fn should_abort(&self) -> bool {
        self.mode == ImportMode::FailFast && !self.report.failures.is_empty()
    }

    /// Finish the import
    ///
    /// In fail-fast mode any recorded failure turns into `ImportFailed`.
    pub(crate) fn finish(self) -> Result<ImportReport, LedgerError> {
        if self.should_abort() {
            return Err(LedgerError::import_failed(
                self.report.transactions.len(),
                self.report.failures,
            ));
        }
        self.report.log_summary();
        Ok(self.report)
    }
}
