//! In-memory storage backends, primarily for tests.
//!
//! Both stores mirror the semantics of the real backends: the transaction
//! store preserves insertion order and permits duplicates, the identity
//! store enforces IBAN uniqueness and resolves names first-match-wins.

use std::{
    collections::BTreeMap,
    sync::RwLock,
};

use time::Date;

use txbridge_core::{IdentityStore, Person, StorageError, Transaction, TransactionStore};

#[derive(Default)]
pub struct MemoryTransactionStore {
    documents: RwLock<Vec<Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn insert_batch(&self, batch: &[Transaction]) -> Result<usize, StorageError> {
        let mut documents = self.documents.write().unwrap();
        documents.extend_from_slice(batch);
        tracing::debug!(size = batch.len(), "batch inserted");
        Ok(batch.len())
    }

    fn find_by_iban(
        &self,
        iban: &str,
        from: Date,
        to: Date,
    ) -> Result<Vec<Transaction>, StorageError> {
        let documents = self.documents.read().unwrap();
        Ok(documents
            .iter()
            .filter(|t| t.iban == iban && t.date >= from && t.date <= to)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryIdentityStore {
    // Keyed by IBAN, the uniqueness constraint.
    rows: RwLock<BTreeMap<String, Person>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn init_schema(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn insert(&self, person: &Person) -> Result<(), StorageError> {
        let mut rows = self.rows.write().unwrap();
        if rows.contains_key(&person.iban) {
            return Err(StorageError::DuplicateIban(person.iban.clone()));
        }
        rows.insert(person.iban.clone(), person.clone());
        Ok(())
    }

    fn find_iban(&self, full_name: &str) -> Result<Option<String>, StorageError> {
        let rows = self.rows.read().unwrap();
        Ok(rows
            .values()
            .find(|p| p.full_name == full_name)
            .map(|p| p.iban.clone()))
    }
}
