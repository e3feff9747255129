//! Synchronous import strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ImportStrategy trait. Rows are submitted to the `LedgerEngine` one at a time
//! in input order, every income row before the first outcome row.
//!
//! # Design
//!
//! The SyncImportStrategy focuses on orchestration, delegating:
//! - Header validation, filtering and grouping to `io::plan_import`
//! - Validation and atomic creation to `LedgerEngine::create`
//! - Report output to `io::csv_format`
//!
//! Sequential submission makes every outcome see the balance left by all
//! rows before it, so results are fully deterministic.

use crate::cli::ReportKind;
use crate::core::LedgerEngine;
use crate::io::{plan_import, read_import_file};
use crate::strategy::{write_report, ImportCollector, ImportMode, ImportReport, ImportStrategy};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Synchronous import strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncImportStrategy {
    mode: ImportMode,
}

impl SyncImportStrategy {
    /// Create a new SyncImportStrategy with the given failure handling
    pub fn new(mode: ImportMode) -> Self {
        Self { mode }
    }
}

impl ImportStrategy for SyncImportStrategy {
    /// Import raw text into the ledger behind `engine`
    ///
    /// Fail-fast mode stops at the first rejected row. Earlier rows stay
    /// committed, later rows are never submitted.
    fn import(&self, engine: &LedgerEngine, raw_text: &str) -> Result<ImportReport, LedgerError> {
        let plan = plan_import(raw_text)?;
        debug!(
            income = plan.income.len(),
            outcome = plan.outcome.len(),
            skipped = plan.skipped(),
            "Planned sync import"
        );

        let mut collector = ImportCollector::new(self.mode, plan.skipped());

        for row in plan.income.iter().chain(plan.outcome.iter()) {
            let result = row
                .to_request()
                .and_then(|request| engine.create(request))
                .map_err(|reason| row.failure(reason));
            collector.record(result);

            if collector.should_abort() {
                break;
            }
        }

        collector.finish()
    }

    /// Import the file at `input_path` into a new ledger and write a report
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the import file
    /// * `report` - Which report to write
    /// * `output` - Writer receiving the report
    fn process(
        &self,
        input_path: &Path,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<ImportReport, LedgerError> {
        let engine = LedgerEngine::new();
        let raw_text = read_import_file(input_path)?;

        let import = self.import(&engine, &raw_text)?;
        write_report(&engine, &import, report, output)?;

        Ok(import)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_strategy_writes_balance() {
        let file = create_temp_csv(
            "title,type,value,category\nSalary,income,5000,Job\nRent,outcome,1200,Housing\n",
        );
        let mut output = Vec::new();

        let report = SyncImportStrategy::default()
            .process(file.path(), ReportKind::Balance, &mut output)
            .unwrap();

        assert_eq!(report.transactions.len(), 2);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "income,outcome,total\n5000.00,1200.00,3800.00\n"
        );
    }

    #[test]
    fn test_sync_strategy_imports_income_before_outcome() {
        let engine = LedgerEngine::new();
        let raw = "title,type,value,category\n\
                   Rent,outcome,1200,Housing\n\
                   Salary,income,5000,Job\n";

        let report = SyncImportStrategy::default().import(&engine, raw).unwrap();

        let titles: Vec<_> = report.transactions.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Salary", "Rent"]);
        assert_eq!(engine.balance().unwrap().total, Decimal::new(3800, 0));
    }

    #[test]
    fn test_sync_strategy_fail_fast_keeps_earlier_rows() {
        let engine = LedgerEngine::new();
        let raw = "title,type,value,category\n\
                   Salary,income,100,Job\n\
                   Rent,outcome,80,Housing\n\
                   Car,outcome,50,Auto\n\
                   Food,outcome,10,Food\n";

        let result = SyncImportStrategy::new(ImportMode::FailFast).import(&engine, raw);

        match result {
            Err(LedgerError::ImportFailed { imported, failures }) => {
                assert_eq!(imported, 2);
                assert_eq!(failures.len(), 1);
                assert!(matches!(&failures[0], LedgerError::RowFailure { line: 4, .. }));
            }
            other => panic!("Expected ImportFailed, got {:?}", other),
        }
        // Food was never submitted
        assert_eq!(engine.transactions().len(), 2);
        assert_eq!(engine.balance().unwrap().total, Decimal::new(20, 0));
    }

    #[test]
    fn test_sync_strategy_best_effort_continues() {
        let engine = LedgerEngine::new();
        let raw = "title,type,value,category\n\
                   Salary,income,100,Job\n\
                   Car,outcome,500,Auto\n\
                   Food,outcome,30,Food\n\
                   Typo,income,lots,Job\n";

        let report = SyncImportStrategy::new(ImportMode::BestEffort)
            .import(&engine, raw)
            .unwrap();

        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(engine.balance().unwrap().total, Decimal::new(70, 0));
    }

    #[test]
    fn test_sync_strategy_overflowing_income_is_a_row_failure() {
        let engine = LedgerEngine::new();
        let raw = "title,type,value,category\n\
                   A,income,79228162514264337593543950335,Job\n\
                   B,income,1,Gift\n\
                   C,outcome,5,Food\n";

        let report = SyncImportStrategy::new(ImportMode::BestEffort)
            .import(&engine, raw)
            .unwrap();

        let titles: Vec<_> = report.transactions.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        match &report.failures[..] {
            [LedgerError::RowFailure { line: 3, reason, .. }] => {
                assert!(matches!(**reason, LedgerError::BalanceOverflow { .. }));
            }
            other => panic!("Expected one RowFailure, got {:?}", other),
        }
        assert_eq!(
            engine.balance().unwrap().total,
            Decimal::MAX - Decimal::new(5, 0)
        );
    }

    #[test]
    fn test_sync_strategy_accepts_empty_category() {
        let engine = LedgerEngine::new();

        let report = SyncImportStrategy::default()
            .import(&engine, "title,type,value,category\nGift,income,5,\n")
            .unwrap();

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(engine.categories()[0].title, "");
    }

    #[test]
    fn test_sync_strategy_invalid_header_submits_nothing() {
        let engine = LedgerEngine::new();

        let result = SyncImportStrategy::default()
            .import(&engine, "name,type,value,category\nSalary,income,5000,Job\n");

        assert!(matches!(result, Err(LedgerError::InvalidHeader { .. })));
        assert!(engine.transactions().is_empty());
        assert!(engine.categories().is_empty());
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut output = Vec::new();

        let result = SyncImportStrategy::default().process(
            Path::new("nonexistent.csv"),
            ReportKind::Balance,
            &mut output,
        );

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncImportStrategy>();
    }
}
