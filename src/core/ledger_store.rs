//! In-memory ledger storage with atomic units of work
//!
//! This module provides the `LedgerStore` component that owns every category
//! and transaction of the ledger. All mutations go through
//! [`LedgerStore::unit_of_work`], which:
//!
//! - Locks the committed state for the whole unit (serializable isolation)
//! - Stages inserts and deletes without touching committed state
//! - Applies the staged changes on success, drops them on failure
//!
//! A failed unit of work therefore never leaves partial state behind: a category
//! created for a transaction that was not persisted is discarded with it.
//!
//! # Thread Safety
//!
//! `LedgerStore` is `Send + Sync` and is shared across async tasks behind an
//! `Arc`. Two units of work never interleave, so a balance check and the insert
//! that depends on it always see the same state.

use crate::core::traits::{CategoryStore, TransactionStore};
use crate::types::{Category, CategoryId, LedgerError, Transaction, TransactionId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Committed ledger data
#[derive(Debug, Default)]
struct LedgerState {
    /// Categories by ID
    categories: HashMap<CategoryId, Category>,

    /// Unique index of category titles
    category_titles: HashMap<String, CategoryId>,

    /// Transactions in insertion order
    transactions: Vec<Transaction>,
}

/// Thread-safe ledger storage
#[derive(Debug, Default)]
pub struct LedgerStore {
    state: Mutex<LedgerState>,
}

impl LedgerStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` as one atomic unit of work
    ///
    /// The closure receives a [`UnitOfWork`] implementing both storage traits.
    /// If it returns `Ok`, every staged change is committed; if it returns
    /// `Err`, every staged change is discarded and the error is passed through.
    pub fn unit_of_work<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut UnitOfWork<'_>) -> Result<T, LedgerError>,
    {
        let mut unit = UnitOfWork::new(self.lock());

        match f(&mut unit) {
            Ok(value) => {
                unit.commit();
                Ok(value)
            }
            Err(e) => {
                unit.rollback();
                Err(e)
            }
        }
    }

    /// Snapshot of every committed transaction, in insertion order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock().transactions.clone()
    }

    /// Snapshot of every committed category, sorted by title
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.lock().categories.values().cloned().collect();
        categories.sort_by(|a, b| a.title.cmp(&b.title));
        categories
    }

    /// Look up a committed category by ID
    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.lock().categories.get(&id).cloned()
    }

    // Staged changes are only applied by an infallible commit, so the state
    // behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Staged changes over the locked ledger state
///
/// Reads see committed state overlaid with this unit's own staged changes.
pub struct UnitOfWork<'a> {
    state: MutexGuard<'a, LedgerState>,
    staged_categories: Vec<Category>,
    staged_transactions: Vec<Transaction>,
    staged_deletes: Vec<TransactionId>,
}

impl<'a> UnitOfWork<'a> {
    fn new(state: MutexGuard<'a, LedgerState>) -> Self {
        Self {
            state,
            staged_categories: Vec::new(),
            staged_transactions: Vec::new(),
            staged_deletes: Vec::new(),
        }
    }

    fn commit(mut self) {
        debug!(
            categories = self.staged_categories.len(),
            inserts = self.staged_transactions.len(),
            deletes = self.staged_deletes.len(),
            "Committing unit of work"
        );

        let deletes = std::mem::take(&mut self.staged_deletes);
        self.state
            .transactions
            .retain(|transaction| !deletes.contains(&transaction.id));

        for category in std::mem::take(&mut self.staged_categories) {
            self.state
                .category_titles
                .insert(category.title.clone(), category.id);
            self.state.categories.insert(category.id, category);
        }

        let inserts = std::mem::take(&mut self.staged_transactions);
        self.state.transactions.extend(inserts);
    }

    fn rollback(self) {
        debug!(
            categories = self.staged_categories.len(),
            inserts = self.staged_transactions.len(),
            deletes = self.staged_deletes.len(),
            "Rolling back unit of work"
        );
    }

    fn is_deleted(&self, id: TransactionId) -> bool {
        self.staged_deletes.contains(&id)
    }
}

impl CategoryStore for UnitOfWork<'_> {
    fn find_category_by_title(&self, title: &str) -> Option<Category> {
        self.state
            .category_titles
            .get(title)
            .and_then(|id| self.state.categories.get(id))
            .or_else(|| {
                self.staged_categories
                    .iter()
                    .find(|category| category.title == title)
            })
            .cloned()
    }

    fn find_category(&self, id: CategoryId) -> Option<Category> {
        self.state
            .categories
            .get(&id)
            .or_else(|| {
                self.staged_categories
                    .iter()
                    .find(|category| category.id == id)
            })
            .cloned()
    }

    fn insert_category(&mut self, category: Category) -> Result<(), LedgerError> {
        if self.find_category_by_title(&category.title).is_some() {
            return Err(LedgerError::duplicate_category(&category.title));
        }
        self.staged_categories.push(category);
        Ok(())
    }
}

impl TransactionStore for UnitOfWork<'_> {
    fn all_transactions(&self) -> Vec<Transaction> {
        self.state
            .transactions
            .iter()
            .filter(|transaction| !self.is_deleted(transaction.id))
            .chain(self.staged_transactions.iter())
            .cloned()
            .collect()
    }

    fn find_transaction(&self, id: TransactionId) -> Option<Transaction> {
        self.state
            .transactions
            .iter()
            .filter(|transaction| !self.is_deleted(transaction.id))
            .chain(self.staged_transactions.iter())
            .find(|transaction| transaction.id == id)
            .cloned()
    }

    fn insert_transaction(&mut self, transaction: Transaction) {
        self.staged_transactions.push(transaction);
    }

    fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        // Staged inserts are simply dropped again
        if let Some(position) = self
            .staged_transactions
            .iter()
            .position(|transaction| transaction.id == id)
        {
            return Ok(self.staged_transactions.remove(position));
        }

        let transaction = self
            .find_transaction(id)
            .ok_or_else(|| LedgerError::transaction_not_found(id))?;
        self.staged_deletes.push(id);
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;
    use rust_decimal::Decimal;

    fn income(value: i64, category_id: CategoryId) -> Transaction {
        Transaction::new("Salary", Decimal::new(value, 0), TransactionType::Income, category_id)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = LedgerStore::new();
        assert!(store.transactions().is_empty());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_committed_unit_is_visible() {
        let store = LedgerStore::new();
        let category = Category::new("Job");
        let transaction = income(100, category.id);

        store
            .unit_of_work(|unit| {
                unit.insert_category(category.clone())?;
                unit.insert_transaction(transaction.clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(store.transactions(), vec![transaction]);
        assert_eq!(store.categories(), vec![category.clone()]);
        assert_eq!(store.category(category.id), Some(category));
    }

    #[test]
    fn test_failed_unit_leaves_no_partial_state() {
        let store = LedgerStore::new();

        let result: Result<(), LedgerError> = store.unit_of_work(|unit| {
            let category = Category::new("Job");
            let category_id = category.id;
            unit.insert_category(category)?;
            unit.insert_transaction(income(100, category_id));
            Err(LedgerError::invalid_value("boom"))
        });

        assert_eq!(result, Err(LedgerError::invalid_value("boom")));
        assert!(store.transactions().is_empty());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_unit_reads_its_own_staged_changes() {
        let store = LedgerStore::new();

        store
            .unit_of_work(|unit| {
                let category = Category::new("Job");
                unit.insert_category(category.clone())?;
                assert_eq!(unit.find_category_by_title("Job"), Some(category.clone()));
                assert_eq!(unit.find_category(category.id), Some(category.clone()));

                let transaction = income(5, category.id);
                unit.insert_transaction(transaction.clone());
                assert_eq!(unit.all_transactions(), vec![transaction.clone()]);
                assert_eq!(unit.find_transaction(transaction.id), Some(transaction));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_duplicate_category_title_is_rejected() {
        let store = LedgerStore::new();
        store
            .unit_of_work(|unit| unit.insert_category(Category::new("Food")))
            .unwrap();

        let result = store.unit_of_work(|unit| unit.insert_category(Category::new("Food")));

        assert_eq!(result, Err(LedgerError::duplicate_category("Food")));
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn test_category_titles_are_case_sensitive() {
        let store = LedgerStore::new();
        store
            .unit_of_work(|unit| {
                unit.insert_category(Category::new("Food"))?;
                unit.insert_category(Category::new("food"))
            })
            .unwrap();

        assert_eq!(store.categories().len(), 2);
    }

    #[test]
    fn test_delete_committed_transaction() {
        let store = LedgerStore::new();
        let category_id = CategoryId::new();
        let keep = income(1, category_id);
        let remove = income(2, category_id);
        store
            .unit_of_work(|unit| {
                unit.insert_transaction(keep.clone());
                unit.insert_transaction(remove.clone());
                Ok(())
            })
            .unwrap();

        let deleted = store
            .unit_of_work(|unit| {
                let deleted = unit.delete_transaction(remove.id)?;
                assert!(unit.find_transaction(remove.id).is_none());
                Ok(deleted)
            })
            .unwrap();

        assert_eq!(deleted, remove);
        assert_eq!(store.transactions(), vec![keep]);
    }

    #[test]
    fn test_delete_missing_transaction_fails() {
        let store = LedgerStore::new();
        let id = TransactionId::new();

        let result = store.unit_of_work(|unit| unit.delete_transaction(id));

        assert_eq!(result, Err(LedgerError::transaction_not_found(id)));
    }

    #[test]
    fn test_delete_twice_in_one_unit_fails() {
        let store = LedgerStore::new();
        let transaction = income(1, CategoryId::new());
        store
            .unit_of_work(|unit| {
                unit.insert_transaction(transaction.clone());
                Ok(())
            })
            .unwrap();

        let result = store.unit_of_work(|unit| {
            unit.delete_transaction(transaction.id)?;
            unit.delete_transaction(transaction.id)
        });

        assert!(matches!(result, Err(LedgerError::TransactionNotFound { .. })));
        // The whole unit rolled back, including the first delete
        assert_eq!(store.transactions(), vec![transaction]);
    }

    #[test]
    fn test_delete_staged_transaction() {
        let store = LedgerStore::new();
        let transaction = income(1, CategoryId::new());

        store
            .unit_of_work(|unit| {
                unit.insert_transaction(transaction.clone());
                unit.delete_transaction(transaction.id)?;
                Ok(())
            })
            .unwrap();

        assert!(store.transactions().is_empty());
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LedgerStore>();
    }
}
