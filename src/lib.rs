//! Finance Ledger Library
//! # Overview
//!
//! This library provides a personal finance ledger of income and outcome
//! transactions, each filed under a category, with a bulk CSV import
//! implemented as both a sync and an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, Category, Balance, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger_store`] - In-memory storage with atomic units of work
//!   - [`core::category_resolver`] - Category find-or-create by title
//!   - [`core::engine`] - Transaction creation, deletion and balance queries
//! - [`io`] - Import parsing and report output
//! - [`strategy`] - Sync and async import pipelines
//!
//! # Transaction Types
//!
//! - **Income**: Adds its value to the balance
//! - **Outcome**: Subtracts its value; rejected if it exceeds the current total
//!
//! # Balance
//!
//! The balance is never stored. It is derived from the transactions on every
//! read:
//! - `income`: Sum of all income values
//! - `outcome`: Sum of all outcome values
//! - `total`: `income - outcome`, never negative

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{LedgerEngine, LedgerStore};
pub use io::{write_balance_csv, write_transactions_csv};
pub use strategy::{create_strategy, import_transactions, ImportConfig, ImportMode, ImportReport};
pub use types::{
    Balance, Category, CategoryId, LedgerError, NewTransaction, Statement, Transaction,
    TransactionId, TransactionType,
};
