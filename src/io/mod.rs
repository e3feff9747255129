//! I/O module
//!
//! Handles import parsing and report output.
//!
//! # Components
//!
//! - `import_format` - Header validation, row parsing and grouping of import text
//! - `csv_format` - Balance and transaction report serialization
//! - `sync_reader` - Blocking import file reader
//! - `async_reader` - tokio-based import file reader

pub mod async_reader;
pub mod csv_format;
pub mod import_format;
pub mod sync_reader;

pub use async_reader::read_import_file_async;
pub use csv_format::{write_balance_csv, write_transactions_csv};
pub use import_format::{parse_row, plan_import, validate_header, ImportPlan, ImportRow};
pub use sync_reader::read_import_file;
