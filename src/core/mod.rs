//! Core business logic module
//!
//! This module contains the core ledger components:
//! - `traits` - Storage traits the engine is written against
//! - `ledger_store` - In-memory storage with atomic units of work
//! - `category_resolver` - Find-or-create of categories by title
//! - `engine` - Transaction creation, deletion and balance queries
//! - `async` - Concurrent row submission for async imports

pub mod r#async;
pub mod category_resolver;
pub mod engine;
pub mod ledger_store;
pub mod traits;

pub use category_resolver::{resolve_category, CategoryResolution};
pub use engine::LedgerEngine;
pub use ledger_store::{LedgerStore, UnitOfWork};
pub use r#async::{BatchProcessor, SubmissionResult};
pub use traits::{CategoryStore, TransactionStore};
