//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction records, requests and identifiers
//! - `category`: Categories and their identifiers
//! - `balance`: The derived balance and its aggregation
//! - `error`: Error types for the ledger

pub mod balance;
pub mod category;
pub mod error;
pub mod transaction;

pub use balance::{Balance, Statement};
pub use category::{Category, CategoryId};
pub use error::LedgerError;
pub use transaction::{NewTransaction, Transaction, TransactionId, TransactionType};
