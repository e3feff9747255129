//! Core traits for category and transaction storage
//!
//! The ledger engine only talks to storage through these traits, always on a
//! unit of work handed out by [`crate::core::LedgerStore`]. This keeps the
//! creation and deletion logic independent of how changes are staged and
//! committed.

use crate::types::{Category, CategoryId, LedgerError, Transaction, TransactionId};

/// Trait for looking up and creating categories
pub trait CategoryStore {
    /// Find a category by exact title match
    fn find_category_by_title(&self, title: &str) -> Option<Category>;

    /// Find a category by ID
    fn find_category(&self, id: CategoryId) -> Option<Category>;

    /// Insert a new category
    ///
    /// Fails with `LedgerError::DuplicateCategory` if the title is taken.
    fn insert_category(&mut self, category: Category) -> Result<(), LedgerError>;
}

/// Trait for reading, appending and deleting transactions
pub trait TransactionStore {
    /// Full scan of every transaction, in insertion order
    fn all_transactions(&self) -> Vec<Transaction>;

    /// Find a transaction by ID
    fn find_transaction(&self, id: TransactionId) -> Option<Transaction>;

    /// Append a transaction
    fn insert_transaction(&mut self, transaction: Transaction);

    /// Delete a transaction by ID, returning the removed record
    ///
    /// Fails with `LedgerError::TransactionNotFound` if the ID is absent.
    fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction, LedgerError>;
}
