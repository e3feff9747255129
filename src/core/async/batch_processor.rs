//! Concurrent row submission for async imports
//!
//! This module provides the `BatchProcessor` struct, which submits a group of
//! import rows to the ledger engine concurrently, one tokio task per row.
//!
//! # Design
//!
//! Rows of the same group (all incomes, or all outcomes) are independent of
//! each other as far as ordering goes: every submission runs the engine's
//! atomic create path, so correctness never depends on which task wins the
//! store lock first. Groups themselves are sequenced by the caller.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── LedgerEngine (Arc-shared store, cloned into each task)
//! ```

use crate::core::LedgerEngine;
use crate::io::ImportRow;
use crate::types::{LedgerError, Transaction};
use futures::future::join_all;
use tracing::error;

/// Result of submitting a single import row
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    /// The row that was submitted
    pub row: ImportRow,

    /// The created transaction, or why the row was rejected
    pub result: Result<Transaction, LedgerError>,
}

impl SubmissionResult {
    /// Convert into the created transaction or a `RowFailure` naming the row
    pub fn into_result(self) -> Result<Transaction, LedgerError> {
        let SubmissionResult { row, result } = self;
        result.map_err(|reason| row.failure(reason))
    }
}

/// Concurrent submitter of import rows
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: LedgerEngine,
}

impl BatchProcessor {
    /// Create a new BatchProcessor over an engine
    pub fn new(engine: LedgerEngine) -> Self {
        Self { engine }
    }

    /// Submit a single row to the engine
    pub fn submit(&self, row: &ImportRow) -> Result<Transaction, LedgerError> {
        self.engine.create(row.to_request()?)
    }

    /// Submit every row of a group concurrently
    ///
    /// Spawns one tokio task per row and waits for all of them. Every row is
    /// attempted, even if some fail.
    ///
    /// # Returns
    ///
    /// One `SubmissionResult` per row, in the same order as `rows`.
    pub async fn submit_group(&self, rows: Vec<ImportRow>) -> Vec<SubmissionResult> {
        let tasks: Vec<_> = rows
            .iter()
            .cloned()
            .map(|row| {
                let processor = self.clone();
                tokio::spawn(async move { processor.submit(&row) })
            })
            .collect();

        let outcomes = join_all(tasks).await;

        rows.into_iter()
            .zip(outcomes)
            .map(|(row, outcome)| {
                let result = outcome.unwrap_or_else(|e| {
                    error!(line = row.line, "Row submission task failed: {}", e);
                    Err(LedgerError::TaskFailed {
                        message: e.to_string(),
                    })
                });
                SubmissionResult { row, result }
            })
            .collect()
    }
}
