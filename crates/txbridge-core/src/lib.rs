//! Core types and traits for txbridge storage backends.
//!
//! This crate provides the `TransactionStore` and `IdentityStore` traits and
//! all associated types, enabling pluggable storage implementations in
//! separate crates, plus the CSV loaders and the cross-store query that run
//! on top of them.

pub mod amount;
pub mod dates;
pub mod ingest;
pub mod models;
pub mod query;
pub mod storage;

// Re-export key types at crate root for convenience
pub use amount::{parse_amount, AmountError};
pub use dates::{parse_dmy, DateError};
pub use ingest::{IdentityLoader, LoadError, LoadSummary, TransactionLoader, DEFAULT_BATCH_SIZE};
pub use models::{Person, Transaction};
pub use query::{retrieve_transactions, QueryError, TransactionReport};
pub use storage::{IdentityStore, StorageError, TransactionStore};
