//! Transaction-related types for the finance ledger
//!
//! This module defines transaction identifiers, the income/outcome type, the
//! persisted transaction record and the request used to create one.

use super::category::CategoryId;
use super::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Transaction identifier
///
/// Generated once, when the transaction is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random transaction ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl From<Uuid> for TransactionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Transaction types supported by the ledger
///
/// The set is closed: any other spelling is rejected when a transaction is
/// created, so a stored transaction is always one of these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, adds to the balance total
    Income,

    /// Money going out, subtracts from the balance total
    ///
    /// Only admitted when the current total covers the value.
    Outcome,
}

impl TransactionType {
    /// Parse a transaction type from its exact lowercase spelling
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidType` for anything other than `income` or
    /// `outcome`. Matching is exact: callers that accept user input should
    /// normalise case and whitespace first.
    pub fn parse(tx_type: &str) -> Result<Self, LedgerError> {
        match tx_type {
            "income" => Ok(TransactionType::Income),
            "outcome" => Ok(TransactionType::Outcome),
            other => Err(LedgerError::invalid_type(other)),
        }
    }

    /// The lowercase name used in input and output files
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A persisted ledger transaction
///
/// Immutable once created; the only change the ledger allows is deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Unique identifier generated on creation
    pub id: TransactionId,

    /// Human readable description, never empty
    pub title: String,

    /// Non-negative amount
    pub value: Decimal,

    /// Income or outcome
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// The category this transaction is filed under
    pub category_id: CategoryId,
}

impl Transaction {
    /// Create a transaction with a freshly generated ID
    pub fn new(
        title: impl Into<String>,
        value: Decimal,
        tx_type: TransactionType,
        category_id: CategoryId,
    ) -> Self {
        Transaction {
            id: TransactionId::new(),
            title: title.into(),
            value,
            tx_type,
            category_id,
        }
    }
}

/// Request to create a transaction
///
/// Fields are kept as supplied by the caller; the ledger engine validates them
/// in a fixed order (type, value, titles, funds) before anything is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Transaction title
    pub title: String,

    /// Requested amount
    pub value: Decimal,

    /// Transaction type as text, must be exactly `income` or `outcome`
    pub tx_type: String,

    /// Title of the category to file the transaction under
    ///
    /// The category is created if no category with this exact title exists.
    pub category: String,
}

impl NewTransaction {
    /// Convenience constructor
    pub fn new(
        title: impl Into<String>,
        value: Decimal,
        tx_type: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        NewTransaction {
            title: title.into(),
            value,
            tx_type: tx_type.into(),
            category: category.into(),
        }
    }
}
