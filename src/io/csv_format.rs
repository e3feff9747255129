//! CSV output for import reports
//!
//! This module writes the two reports the CLI can produce:
//! - The ledger balance (`income,outcome,total`)
//! - The imported transactions (`id,title,type,value,category`)
//!
//! Amounts are written with two decimal places.

use crate::types::{Balance, Category, CategoryId, LedgerError, Transaction};
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// CSV row for a transaction, with its category title resolved
#[derive(Debug, Serialize)]
struct TransactionCsvRow<'a> {
    id: String,
    title: &'a str,
    #[serde(rename = "type")]
    tx_type: &'static str,
    value: String,
    category: &'a str,
}

/// Write the balance as a single-row CSV
///
/// # Errors
///
/// Returns `LedgerError::OutputError` if the output cannot be written.
pub fn write_balance_csv(balance: &Balance, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(["income", "outcome", "total"])?;
    writer.write_record(&[
        format!("{:.2}", balance.income),
        format!("{:.2}", balance.outcome),
        format!("{:.2}", balance.total),
    ])?;

    writer.flush().map_err(|e| LedgerError::OutputError {
        message: e.to_string(),
    })
}

/// Write transactions as CSV, resolving each category ID to its title
///
/// Transactions are written in the order given. A category ID missing from
/// `categories` is written as an empty category.
///
/// # Errors
///
/// Returns `LedgerError::OutputError` if the output cannot be written.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    categories: &[Category],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let titles: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id, category.title.as_str()))
        .collect();

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(["id", "title", "type", "value", "category"])?;

    for transaction in transactions {
        writer.serialize(TransactionCsvRow {
            id: transaction.id.to_string(),
            title: &transaction.title,
            tx_type: transaction.tx_type.as_str(),
            value: format!("{:.2}", transaction.value),
            category: titles
                .get(&transaction.category_id)
                .copied()
                .unwrap_or_default(),
        })?;
    }

    writer.flush().map_err(|e| LedgerError::OutputError {
        message: e.to_string(),
    })
}
