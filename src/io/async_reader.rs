//! Asynchronous reading of import files
//!
//! Same contract as [`crate::io::sync_reader::read_import_file`], but reads
//! through tokio's file system API so it can run inside the async strategy's
//! runtime without blocking a worker.

use crate::io::sync_reader::file_error;
use crate::types::LedgerError;
use std::path::Path;

/// Read an import file into memory asynchronously
///
/// # Errors
///
/// * `LedgerError::FileNotFound` - The path does not exist
/// * `LedgerError::IoError` - The file could not be read or is not UTF-8
pub async fn read_import_file_async(path: &Path) -> Result<String, LedgerError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| file_error(path, e))
}
