//! Asynchronous import strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ImportStrategy trait. The rows of each group are submitted concurrently on
//! a tokio multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncImportStrategy
//!     ├── ImportConfig (mode, max_workers)
//!     ├── read_import_file_async (tokio file read)
//!     ├── plan_import (header check, filtering, grouping)
//!     └── BatchProcessor (one task per row)
//!         └── LedgerEngine (shared store, atomic create)
//! ```
//!
//! # Ordering
//!
//! - The income group is fully settled before any outcome row is submitted
//! - Within a group, rows race for the store lock; each create is atomic, so
//!   the balance can never go negative, but which outcome wins under scarce
//!   funds is not deterministic
//! - In fail-fast mode the group in flight always finishes; a failure in the
//!   income group means no outcome row is submitted

use crate::cli::ReportKind;
use crate::core::r#async::BatchProcessor;
use crate::core::LedgerEngine;
use crate::io::{plan_import, read_import_file_async};
use crate::strategy::{
    write_report, ImportCollector, ImportConfig, ImportReport, ImportStrategy,
};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Asynchronous import strategy
///
/// # Configuration
///
/// The strategy accepts an ImportConfig with:
/// - `mode`: fail-fast or best-effort failure handling
/// - `max_workers`: Number of runtime worker threads (default: CPU cores)
#[derive(Debug, Clone, Default)]
pub struct AsyncImportStrategy {
    config: ImportConfig,
}

impl AsyncImportStrategy {
    /// Create a new AsyncImportStrategy with the specified configuration
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Import raw text on the current tokio runtime
    ///
    /// # Errors
    ///
    /// - `InvalidHeader` if the header is wrong; no row is submitted
    /// - `ImportFailed` in fail-fast mode if any row is rejected
    pub async fn import_async(
        &self,
        engine: &LedgerEngine,
        raw_text: &str,
    ) -> Result<ImportReport, LedgerError> {
        let plan = plan_import(raw_text)?;
        debug!(
            income = plan.income.len(),
            outcome = plan.outcome.len(),
            skipped = plan.skipped(),
            "Planned async import"
        );

        let processor = BatchProcessor::new(engine.clone());
        let mut collector = ImportCollector::new(self.config.mode, plan.skipped());

        for group in [plan.income, plan.outcome] {
            if group.is_empty() {
                continue;
            }

            for submission in processor.submit_group(group).await {
                collector.record(submission.into_result());
            }

            if collector.should_abort() {
                break;
            }
        }

        collector.finish()
    }

    fn runtime(&self) -> Result<Runtime, LedgerError> {
        Builder::new_multi_thread()
            .worker_threads(self.config.max_workers)
            .enable_all()
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })
    }
}

impl ImportStrategy for AsyncImportStrategy {
    /// Import raw text on a dedicated runtime
    ///
    /// Blocks the calling thread; must not be called from within a tokio
    /// runtime. Use [`AsyncImportStrategy::import_async`] there.
    fn import(&self, engine: &LedgerEngine, raw_text: &str) -> Result<ImportReport, LedgerError> {
        self.runtime()?
            .block_on(self.import_async(engine, raw_text))
    }

    /// Import the file at `input_path` into a new ledger and write a report
    fn process(
        &self,
        input_path: &Path,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<ImportReport, LedgerError> {
        let engine = LedgerEngine::new();

        let import = self.runtime()?.block_on(async {
            let raw_text = read_import_file_async(input_path).await?;
            self.import_async(&engine, &raw_text).await
        })?;

        write_report(&engine, &import, report, output)?;
        Ok(import)
    }
}
