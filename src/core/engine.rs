//! Ledger engine
//!
//! This module provides the `LedgerEngine` that creates and deletes
//! transactions on a shared `LedgerStore` and answers balance queries.
//!
//! The engine enforces the ledger's business rules:
//! - Only `income` and `outcome` transactions exist
//! - Values are never negative
//! - Titles are never empty
//! - An outcome is only admitted if the current total covers it
//! - A transaction is only admitted if the balance can still be summed up
//!
//! The funds check, category resolution and insert run as one unit of work, so
//! concurrent outcomes can never jointly overdraw the ledger.

use crate::core::category_resolver::{resolve_category, CategoryResolution};
use crate::core::ledger_store::LedgerStore;
use crate::core::traits::TransactionStore;
use crate::types::{
    Balance, Category, CategoryId, LedgerError, NewTransaction, Statement, Transaction,
    TransactionId, TransactionType,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Ledger engine
///
/// Cheap to clone: clones share the same underlying store, so an engine can be
/// handed to as many tasks as needed.
#[derive(Debug, Clone, Default)]
pub struct LedgerEngine {
    store: Arc<LedgerStore>,
}

impl LedgerEngine {
    /// Create an engine over a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an existing store
    pub fn with_store(store: Arc<LedgerStore>) -> Self {
        LedgerEngine { store }
    }

    /// The store this engine writes to
    pub fn store(&self) -> &Arc<LedgerStore> {
        &self.store
    }

    /// Create a transaction
    ///
    /// Validation runs in this order and the first violation wins:
    /// 1. `tx_type` must be exactly `income` or `outcome`
    /// 2. `value` must not be negative
    /// 3. `title` must not be blank
    /// 4. For an outcome, the balance total must cover `value`
    /// 5. The balance including `value` must stay within the `Decimal` range
    ///
    /// The category title is taken as is, an empty one included. The balance
    /// checks, category resolution and insert run in one unit of work.
    ///
    /// # Returns
    ///
    /// The persisted transaction, including its generated ID and the resolved
    /// category ID.
    ///
    /// # Errors
    ///
    /// - `InvalidType`, `InvalidValue`, `EmptyTitle` for invalid requests
    /// - `InsufficientFunds` if an outcome exceeds the current total
    /// - `BalanceOverflow` if the income sum would leave the `Decimal` range
    ///
    /// On error nothing is persisted, not even a newly created category.
    pub fn create(&self, request: NewTransaction) -> Result<Transaction, LedgerError> {
        let tx_type = TransactionType::parse(&request.tx_type)?;

        if request.value < Decimal::ZERO {
            return Err(LedgerError::invalid_value(request.value));
        }
        if request.title.trim().is_empty() {
            return Err(LedgerError::empty_title("title"));
        }

        let NewTransaction {
            title,
            value,
            category,
            ..
        } = request;

        self.store.unit_of_work(|unit| {
            let balance = Balance::from_transactions(&unit.all_transactions())?;
            if tx_type == TransactionType::Outcome && !balance.covers(value) {
                return Err(LedgerError::insufficient_funds(balance.total, value));
            }
            balance.apply(tx_type, value)?;

            let resolution = resolve_category(unit, &category)?;
            if let CategoryResolution::Created(id) = resolution {
                debug!(%id, category = %category, "Created category");
            }

            let transaction = Transaction::new(title, value, tx_type, resolution.id());
            unit.insert_transaction(transaction.clone());

            debug!(
                id = %transaction.id,
                tx_type = %transaction.tx_type,
                value = %transaction.value,
                "Created transaction"
            );
            Ok(transaction)
        })
    }

    /// Delete a transaction by ID
    ///
    /// Categories are left untouched, even if no transaction references them
    /// any more.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if no transaction has this ID; the ledger
    /// is unchanged in that case.
    pub fn delete(&self, id: TransactionId) -> Result<(), LedgerError> {
        let deleted = self
            .store
            .unit_of_work(|unit| unit.delete_transaction(id))?;

        debug!(id = %deleted.id, title = %deleted.title, "Deleted transaction");
        Ok(())
    }

    /// Current balance, recomputed from every committed transaction
    ///
    /// # Errors
    ///
    /// `BalanceOverflow` only if the store was filled outside of `create`.
    pub fn balance(&self) -> Result<Balance, LedgerError> {
        Balance::from_transactions(&self.store.transactions())
    }

    /// Every committed transaction, in creation order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.store.transactions()
    }

    /// Every category, sorted by title
    pub fn categories(&self) -> Vec<Category> {
        self.store.categories()
    }

    /// Look up a category by ID
    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.store.category(id)
    }

    /// All transactions together with the balance they add up to
    ///
    /// Both halves are derived from the same snapshot.
    pub fn statement(&self) -> Result<Statement, LedgerError> {
        let transactions = self.store.transactions();
        let balance = Balance::from_transactions(&transactions)?;
        Ok(Statement {
            transactions,
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(tx_type: &str, value: i64, category: &str) -> NewTransaction {
        NewTransaction::new("Entry", Decimal::new(value, 0), tx_type, category)
    }

    fn funded_engine(amount: i64) -> LedgerEngine {
        let engine = LedgerEngine::new();
        engine.create(request("income", amount, "Job")).unwrap();
        engine
    }

    #[test]
    fn test_create_income_on_empty_ledger() {
        let engine = LedgerEngine::new();

        let transaction = engine
            .create(NewTransaction::new("Salary", Decimal::new(5000, 0), "income", "Job"))
            .unwrap();

        assert_eq!(transaction.title, "Salary");
        assert_eq!(transaction.value, Decimal::new(5000, 0));
        assert_eq!(transaction.tx_type, TransactionType::Income);
        assert_eq!(
            engine.category(transaction.category_id).map(|c| c.title),
            Some("Job".to_string())
        );
        assert_eq!(engine.transactions(), vec![transaction]);
    }

    #[test]
    fn test_create_outcome_within_balance() {
        let engine = funded_engine(100);

        let result = engine.create(request("outcome", 100, "Rent"));

        assert!(result.is_ok());
        assert_eq!(engine.balance().unwrap().total, Decimal::ZERO);
    }

    #[test]
    fn test_create_outcome_exceeding_balance_fails() {
        let engine = funded_engine(100);
        let before = engine.transactions();

        let result = engine.create(request("outcome", 101, "Rent"));

        assert_eq!(
            result,
            Err(LedgerError::insufficient_funds(
                Decimal::new(100, 0),
                Decimal::new(101, 0)
            ))
        );
        assert_eq!(engine.transactions(), before);
        // The category of the rejected outcome was never kept
        assert_eq!(engine.categories().len(), 1);
    }

    #[test]
    fn test_create_outcome_on_empty_ledger_fails() {
        let engine = LedgerEngine::new();

        let result = engine.create(request("outcome", 1, "Food"));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert!(engine.categories().is_empty());
    }

    #[test]
    fn test_zero_outcome_on_empty_ledger_succeeds() {
        let engine = LedgerEngine::new();
        assert!(engine.create(request("outcome", 0, "Food")).is_ok());
    }

    #[rstest]
    #[case::unknown_type("transfer", -5, "", LedgerError::invalid_type("transfer"))]
    #[case::uppercase_type("Income", 5, "Job", LedgerError::invalid_type("Income"))]
    #[case::negative_value("income", -5, "", LedgerError::invalid_value("-5"))]
    fn test_validation_order(
        #[case] tx_type: &str,
        #[case] value: i64,
        #[case] category: &str,
        #[case] expected: LedgerError,
    ) {
        let engine = LedgerEngine::new();

        let result = engine.create(request(tx_type, value, category));

        assert_eq!(result, Err(expected));
        assert!(engine.transactions().is_empty());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let engine = LedgerEngine::new();

        let result = engine.create(NewTransaction::new("", Decimal::ONE, "income", "Job"));

        assert_eq!(result, Err(LedgerError::empty_title("title")));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("  ")]
    fn test_blank_category_is_accepted(#[case] category: &str) {
        let engine = LedgerEngine::new();

        let transaction = engine
            .create(NewTransaction::new("Gift", Decimal::new(5, 0), "income", category))
            .unwrap();

        assert_eq!(
            engine.category(transaction.category_id).map(|c| c.title),
            Some(category.to_string())
        );
        assert_eq!(engine.balance().unwrap().income, Decimal::new(5, 0));
    }

    #[test]
    fn test_income_overflowing_balance_is_rejected() {
        let engine = LedgerEngine::new();
        engine
            .create(NewTransaction::new("A", Decimal::MAX, "income", "Job"))
            .unwrap();

        let result = engine.create(NewTransaction::new("B", Decimal::ONE, "income", "Gift"));

        assert_eq!(
            result,
            Err(LedgerError::balance_overflow(TransactionType::Income, Decimal::ONE))
        );
        assert_eq!(engine.transactions().len(), 1);
        assert_eq!(engine.categories().len(), 1);
        assert_eq!(engine.balance().unwrap().total, Decimal::MAX);
    }

    #[test]
    fn test_outcome_after_max_income_succeeds() {
        let engine = LedgerEngine::new();
        engine
            .create(NewTransaction::new("A", Decimal::MAX, "income", "Job"))
            .unwrap();

        engine
            .create(NewTransaction::new("C", Decimal::new(5, 0), "outcome", "Food"))
            .unwrap();

        assert_eq!(engine.balance().unwrap().total, Decimal::MAX - Decimal::new(5, 0));
    }

    #[test]
    fn test_invalid_type_checked_before_funds() {
        let engine = LedgerEngine::new();

        let result = engine.create(request("OUTCOME", 1_000_000, "Food"));

        assert!(matches!(result, Err(LedgerError::InvalidType { .. })));
    }

    #[test]
    fn test_category_is_reused_by_title() {
        let engine = LedgerEngine::new();

        let first = engine.create(request("income", 10, "Job")).unwrap();
        let second = engine.create(request("income", 20, "Job")).unwrap();
        let third = engine.create(request("income", 30, "Gift")).unwrap();

        assert_eq!(first.category_id, second.category_id);
        assert_ne!(first.category_id, third.category_id);
        assert_eq!(engine.categories().len(), 2);
    }

    #[test]
    fn test_delete_removes_only_that_transaction() {
        let engine = LedgerEngine::new();
        let keep = engine.create(request("income", 10, "Job")).unwrap();
        let remove = engine.create(request("income", 20, "Job")).unwrap();

        engine.delete(remove.id).unwrap();

        assert_eq!(engine.transactions(), vec![keep]);
        assert_eq!(engine.balance().unwrap().total, Decimal::new(10, 0));
    }

    #[test]
    fn test_delete_missing_transaction_fails() {
        let engine = funded_engine(10);
        let before = engine.transactions();
        let id = TransactionId::new();

        let result = engine.delete(id);

        assert_eq!(result, Err(LedgerError::transaction_not_found(id)));
        assert_eq!(engine.transactions(), before);
    }

    #[test]
    fn test_delete_keeps_orphaned_category() {
        let engine = LedgerEngine::new();
        let transaction = engine.create(request("income", 10, "Job")).unwrap();

        engine.delete(transaction.id).unwrap();

        assert!(engine.transactions().is_empty());
        assert_eq!(engine.categories().len(), 1);
    }

    #[test]
    fn test_statement_matches_balance() {
        let engine = funded_engine(5000);
        engine.create(request("outcome", 1200, "Housing")).unwrap();

        let statement = engine.statement().unwrap();

        assert_eq!(statement.transactions.len(), 2);
        assert_eq!(statement.balance, engine.balance().unwrap());
        assert_eq!(statement.balance.income, Decimal::new(5000, 0));
        assert_eq!(statement.balance.outcome, Decimal::new(1200, 0));
        assert_eq!(statement.balance.total, Decimal::new(3800, 0));
    }

    #[test]
    fn test_concurrent_outcomes_never_overdraw() {
        let engine = funded_engine(100);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.create(request("outcome", 30, "Food")))
            })
            .collect();

        let succeeded = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(succeeded, 3);
        assert_eq!(engine.balance().unwrap().total, Decimal::new(10, 0));
    }
}
