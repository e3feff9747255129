//! Synchronous reading of import files
//!
//! The ledger core consumes already-decoded text. This module is the blocking
//! file source used by the synchronous import strategy: it reads the whole
//! file as UTF-8 and maps I/O failures onto `LedgerError`.

use crate::types::LedgerError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read an import file into memory
///
/// # Errors
///
/// * `LedgerError::FileNotFound` - The path does not exist
/// * `LedgerError::IoError` - The file could not be read or is not UTF-8
pub fn read_import_file(path: &Path) -> Result<String, LedgerError> {
    fs::read_to_string(path).map_err(|e| file_error(path, e))
}

/// Map an I/O error on `path` to a `LedgerError`
pub(crate) fn file_error(path: &Path, error: std::io::Error) -> LedgerError {
    if error.kind() == ErrorKind::NotFound {
        LedgerError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        LedgerError::IoError {
            message: format!("Failed to read '{}': {}", path.display(), error),
        }
    }
}
