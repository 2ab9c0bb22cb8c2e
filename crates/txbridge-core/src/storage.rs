use thiserror::Error;
use time::Date;

use crate::models::{Person, Transaction};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("duplicate IBAN: {0}")]
    DuplicateIban(String),
    #[error("{0}")]
    Backend(String),
}

/// Document store holding transactions keyed (implicitly) by IBAN.
///
/// There is no schema and no uniqueness: re-inserting the same record grows
/// the collection. The relational side is trusted for the name→IBAN mapping;
/// this store never verifies that an IBAN exists over there.
pub trait TransactionStore: Send + Sync {
    /// Unordered bulk insert: an individual document failure must not abort
    /// the rest of the batch. Returns the number of documents actually
    /// inserted.
    fn insert_batch(&self, batch: &[Transaction]) -> Result<usize, StorageError>;

    /// All transactions on `iban` dated within `[from, to]`, inclusive on
    /// both ends, in store (insertion) order.
    fn find_by_iban(
        &self,
        iban: &str,
        from: Date,
        to: Date,
    ) -> Result<Vec<Transaction>, StorageError>;
}

/// Relational store holding the person→IBAN identity mapping.
pub trait IdentityStore: Send + Sync {
    /// Idempotent schema creation ("create if not exists").
    fn init_schema(&self) -> Result<(), StorageError>;

    /// Insert one person, committed on return. A duplicate IBAN violates the
    /// uniqueness constraint and surfaces as [`StorageError::DuplicateIban`];
    /// rows inserted by earlier calls stay committed.
    fn insert(&self, person: &Person) -> Result<(), StorageError>;

    /// Exact-match point lookup of an IBAN by full name. An absent name is
    /// `Ok(None)`, not an error; when distinct rows share a full name the
    /// first match wins.
    fn find_iban(&self, full_name: &str) -> Result<Option<String>, StorageError>;
}
