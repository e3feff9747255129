//! Import format handling
//!
//! This module turns raw import text into rows ready for submission:
//! - Header validation (`title,type,value,category`, case-insensitive)
//! - Structural filtering of data lines (exactly four comma-separated fields)
//! - Field parsing into `ImportRow`
//! - Partitioning into income and outcome groups
//!
//! Fields are split on every comma; there is no quoting. All functions are
//! pure (no I/O) for easy testing.

use crate::types::{LedgerError, NewTransaction, TransactionType};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Expected header columns, in order
pub const HEADER: [&str; 4] = ["title", "type", "value", "category"];

/// A structurally valid data line of an import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// One-based line number in the import text (the header is line 1)
    pub line: usize,

    /// The line exactly as it appeared in the input
    pub raw: String,

    /// Trimmed title field
    pub title: String,

    /// Trimmed, lowercased type field
    pub tx_type: String,

    /// Parsed value, `None` if the field is not a number
    pub value: Option<Decimal>,

    /// Trimmed value field as text
    pub raw_value: String,

    /// Trimmed category field
    pub category: String,
}

impl ImportRow {
    /// Build the creation request for this row
    ///
    /// Checks run in the same order as transaction creation, so an unparsable
    /// value surfaces as `InvalidValue` only once the type is known to be valid.
    pub fn to_request(&self) -> Result<NewTransaction, LedgerError> {
        TransactionType::parse(&self.tx_type)?;
        let value = self
            .value
            .ok_or_else(|| LedgerError::invalid_value(&self.raw_value))?;

        Ok(NewTransaction {
            title: self.title.clone(),
            value,
            tx_type: self.tx_type.clone(),
            category: self.category.clone(),
        })
    }

    /// Wrap a rejection of this row into a `RowFailure`
    pub fn failure(&self, reason: LedgerError) -> LedgerError {
        LedgerError::row_failure(self.line, &self.raw, reason)
    }
}

/// Rows of an import, grouped by type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPlan {
    /// Income rows, in input order
    pub income: Vec<ImportRow>,

    /// Outcome rows, in input order
    pub outcome: Vec<ImportRow>,

    /// Non-blank lines dropped for not having exactly four fields
    pub malformed_lines: usize,

    /// Rows dropped because their type is neither income nor outcome
    pub untyped_rows: usize,
}

impl ImportPlan {
    /// Number of lines or rows that will never reach transaction creation
    pub fn skipped(&self) -> usize {
        self.malformed_lines + self.untyped_rows
    }

    /// Number of rows that will be submitted
    pub fn len(&self) -> usize {
        self.income.len() + self.outcome.len()
    }

    /// Whether no row will be submitted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate the header line of an import
///
/// The line must split into exactly four columns which, trimmed and
/// lowercased, read `title, type, value, category`. A leading byte order mark
/// is ignored.
///
/// # Errors
///
/// Returns `LedgerError::InvalidHeader` carrying the header as read.
pub fn validate_header(header: &str) -> Result<(), LedgerError> {
    let columns: Vec<String> = header
        .trim_start_matches('\u{feff}')
        .split(',')
        .map(|column| column.trim().to_lowercase())
        .collect();

    if columns.len() == HEADER.len() && columns.iter().zip(HEADER).all(|(c, h)| c == h) {
        Ok(())
    } else {
        Err(LedgerError::invalid_header(header))
    }
}

/// Parse a value field
///
/// Accepts plain decimals (`12`, `12.50`, `-3`) and scientific notation
/// (`1e3`). Anything else, including an empty field or digit separators
/// (`1_000`), is not a number.
pub fn parse_value(field: &str) -> Option<Decimal> {
    if field.contains('_') {
        return None;
    }

    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .ok()
}

/// Parse a single data line
///
/// # Returns
///
/// * `Some(ImportRow)` - The line is non-blank and has exactly four fields
/// * `None` - The line is structurally invalid and must be dropped
pub fn parse_row(line_number: usize, line: &str) -> Option<ImportRow> {
    if line.trim().is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [title, tx_type, value, category] = fields.as_slice() else {
        return None;
    };

    Some(ImportRow {
        line: line_number,
        raw: line.to_string(),
        title: title.to_string(),
        tx_type: tx_type.to_lowercase(),
        value: parse_value(value),
        raw_value: value.to_string(),
        category: category.to_string(),
    })
}

/// Validate, parse and group raw import text
///
/// Lines may end in `\n` or `\r\n`. The first line is the header and is
/// validated before anything else. Malformed lines and rows whose type is
/// neither `income` nor `outcome` are dropped and counted, not reported.
///
/// # Errors
///
/// Returns `LedgerError::InvalidHeader` if the header is missing or wrong.
pub fn plan_import(raw_text: &str) -> Result<ImportPlan, LedgerError> {
    let mut lines = raw_text.lines().enumerate();

    let header = lines.next().map(|(_, line)| line).unwrap_or_default();
    validate_header(header)?;

    let mut plan = ImportPlan::default();

    for (index, line) in lines {
        let line_number = index + 1;

        let Some(row) = parse_row(line_number, line) else {
            if !line.trim().is_empty() {
                debug!(line = line_number, "Dropping malformed import line");
                plan.malformed_lines += 1;
            }
            continue;
        };

        match row.tx_type.as_str() {
            "income" => plan.income.push(row),
            "outcome" => plan.outcome.push(row),
            other => {
                debug!(
                    line = line_number,
                    tx_type = other,
                    "Dropping row without income/outcome type"
                );
                plan.untyped_rows += 1;
            }
        }
    }

    Ok(plan)
}
