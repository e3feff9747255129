//! Asynchronous components of the ledger core
//!
//! The ledger store already serializes every unit of work, so the async side
//! only needs a way to fan rows out to tokio tasks:
//!
//! - **BatchProcessor**: submits a group of import rows concurrently, one task
//!   per row, and collects the results in input order

pub mod batch_processor;

pub use batch_processor::{BatchProcessor, SubmissionResult};
