//! Balance aggregation for the finance ledger
//!
//! The balance is never stored. It is recomputed from the full transaction set
//! every time it is needed, so it can never drift from the transactions.

use super::error::LedgerError;
use super::transaction::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate of all ledger transactions
///
/// Invariant: `total == income - outcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Balance {
    /// Sum of all income values
    pub income: Decimal,

    /// Sum of all outcome values
    pub outcome: Decimal,

    /// Income minus outcome
    pub total: Decimal,
}

impl Balance {
    /// Aggregate a set of transactions
    ///
    /// Pure and deterministic. An empty set yields an all-zero balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceOverflow` if a sum leaves the `Decimal`
    /// range. The ledger rejects transactions that would cause this, so it
    /// only happens for sets built outside of it.
    pub fn from_transactions<'a, I>(transactions: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .try_fold(Balance::default(), |balance, transaction| {
                balance.apply(transaction.tx_type, transaction.value)
            })
    }

    /// The balance after adding one more transaction
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceOverflow` if a sum leaves the `Decimal`
    /// range.
    pub fn apply(self, tx_type: TransactionType, value: Decimal) -> Result<Self, LedgerError> {
        let overflow = || LedgerError::balance_overflow(tx_type, value);

        let (income, outcome) = match tx_type {
            TransactionType::Income => {
                (self.income.checked_add(value).ok_or_else(overflow)?, self.outcome)
            }
            TransactionType::Outcome => {
                (self.income, self.outcome.checked_add(value).ok_or_else(overflow)?)
            }
        };
        let total = income.checked_sub(outcome).ok_or_else(overflow)?;

        Ok(Balance {
            income,
            outcome,
            total,
        })
    }

    /// Whether the total covers an outcome of `value`
    pub fn covers(&self, value: Decimal) -> bool {
        self.total >= value
    }
}

/// Every transaction in the ledger together with the derived balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub transactions: Vec<Transaction>,
    pub balance: Balance,
}
