//! Error types for the finance ledger
//!
//! This module defines all error types that can occur while recording,
//! deleting, or importing transactions. Errors carry the offending input so
//! callers can present an actionable message.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, unreadable input, unwritable output
//! - **Validation Errors**: Invalid type, invalid value, empty titles
//! - **Ledger Errors**: Insufficient funds, missing transactions, duplicate categories
//! - **Import Errors**: Invalid header, failed rows, aborted imports

use super::transaction::{TransactionId, TransactionType};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A report could not be written
    #[error("Failed to write output: {message}")]
    OutputError {
        /// Description of the write failure
        message: String,
    },

    /// Transaction type is neither `income` nor `outcome`
    #[error("Invalid transaction type '{tx_type}': expected 'income' or 'outcome'")]
    InvalidType {
        /// The rejected type text
        tx_type: String,
    },

    /// Value is negative or not a number
    #[error("Invalid value '{value}': must be a number greater than or equal to zero")]
    InvalidValue {
        /// The rejected value, as text
        value: String,
    },

    /// Transaction title is empty
    #[error("Transaction {field} cannot be empty")]
    EmptyTitle {
        /// Which field was empty
        field: &'static str,
    },

    /// Outcome would drive the balance total below zero
    ///
    /// The ledger is left unchanged.
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Balance total at the time of the check
        available: Decimal,
        /// Requested outcome value
        requested: Decimal,
    },

    /// A balance sum left the range of `Decimal`
    ///
    /// Raised by aggregation, and by creation for a transaction the ledger
    /// could no longer sum up. The ledger is left unchanged.
    #[error("Balance overflow: adding {tx_type} of {value} exceeds the supported range")]
    BalanceOverflow {
        /// Type of the transaction being added
        tx_type: TransactionType,
        /// Value of the transaction being added
        value: Decimal,
    },

    /// No transaction exists with the given ID
    #[error("Transaction {id} not found")]
    TransactionNotFound {
        /// The ID that was looked up
        id: TransactionId,
    },

    /// A category with this title already exists
    ///
    /// Raised by the store's unique title index. Category resolution treats it
    /// as "already exists" and re-fetches.
    #[error("Category '{title}' already exists")]
    DuplicateCategory {
        /// The conflicting title
        title: String,
    },

    /// Import header is not `title,type,value,category`
    ///
    /// Raised before any row is processed.
    #[error("Invalid header '{header}': expected columns title, type, value, category")]
    InvalidHeader {
        /// The header line as read
        header: String,
    },

    /// A single import row was rejected by transaction creation
    #[error("Line {line} '{row}': {reason}")]
    RowFailure {
        /// One-based line number in the import text
        line: usize,
        /// The row exactly as it appeared in the input
        row: String,
        /// Why the row was rejected
        reason: Box<LedgerError>,
    },

    /// A concurrent row submission did not complete
    #[error("Row submission did not complete: {message}")]
    TaskFailed {
        /// Description of the task failure
        message: String,
    },

    /// An import was aborted because one or more rows failed
    ///
    /// Rows imported before the failure stay committed.
    #[error(
        "Import aborted after {imported} transaction(s), {} row(s) failed{}",
        .failures.len(),
        .failures.first().map(|f| format!(": {}", f)).unwrap_or_default()
    )]
    ImportFailed {
        /// Number of transactions committed before the import stopped
        imported: usize,
        /// Every row failure observed, in input order
        failures: Vec<LedgerError>,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::OutputError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidType error
    pub fn invalid_type(tx_type: &str) -> Self {
        LedgerError::InvalidType {
            tx_type: tx_type.to_string(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(value: impl ToString) -> Self {
        LedgerError::InvalidValue {
            value: value.to_string(),
        }
    }

    /// Create an EmptyTitle error
    pub fn empty_title(field: &'static str) -> Self {
        LedgerError::EmptyTitle { field }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(tx_type: TransactionType, value: Decimal) -> Self {
        LedgerError::BalanceOverflow { tx_type, value }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: TransactionId) -> Self {
        LedgerError::TransactionNotFound { id }
    }

    /// Create a DuplicateCategory error
    pub fn duplicate_category(title: &str) -> Self {
        LedgerError::DuplicateCategory {
            title: title.to_string(),
        }
    }

    /// Create an InvalidHeader error
    pub fn invalid_header(header: &str) -> Self {
        LedgerError::InvalidHeader {
            header: header.to_string(),
        }
    }

    /// Create a RowFailure error
    pub fn row_failure(line: usize, row: &str, reason: LedgerError) -> Self {
        LedgerError::RowFailure {
            line,
            row: row.to_string(),
            reason: Box::new(reason),
        }
    }

    /// Create an ImportFailed error
    pub fn import_failed(imported: usize, failures: Vec<LedgerError>) -> Self {
        LedgerError::ImportFailed { imported, failures }
    }
}
