//! CSV loaders for the two stores.

use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use crate::dates::{parse_dmy, DateError};
use crate::models::{Person, Transaction};
use crate::storage::{IdentityStore, StorageError, TransactionStore};

/// Documents per bulk insert into the transaction store.
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Counters reported by a completed loader run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_read: u64,
    pub rows_written: u64,
    pub batches: u64,
}

#[derive(Debug, Deserialize)]
struct TransactionRow {
    date: String,
    iban: String,
    amount: String,
}

#[derive(Debug, Deserialize)]
struct PersonRow {
    full_name: String,
    iban: String,
    email: String,
}

/// Streams a transactions CSV (`date`, `iban`, `amount`, header required)
/// into a [`TransactionStore`] in fixed-size unordered batches.
///
/// For N data rows this issues ceil(N / batch_size) bulk inserts, the last
/// covering the remainder. A malformed row (missing column, bad date) aborts
/// the whole run; batches flushed before it stay inserted.
pub struct TransactionLoader<'a, S: TransactionStore + ?Sized> {
    store: &'a S,
    batch_size: usize,
}

impl<'a, S: TransactionStore + ?Sized> TransactionLoader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(store: &'a S, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    pub fn load<R: Read>(&self, reader: R) -> Result<LoadSummary, LoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut summary = LoadSummary::default();
        let mut batch: Vec<Transaction> = Vec::with_capacity(self.batch_size);

        for row in csv_reader.deserialize::<TransactionRow>() {
            let row = row?;
            summary.rows_read += 1;
            batch.push(Transaction {
                date: parse_dmy(&row.date)?,
                iban: row.iban,
                amount: row.amount,
            });
            if batch.len() >= self.batch_size {
                self.flush(&mut batch, &mut summary)?;
            }
        }
        // Remainder after the source is exhausted.
        if !batch.is_empty() {
            self.flush(&mut batch, &mut summary)?;
        }

        Ok(summary)
    }

    fn flush(
        &self,
        batch: &mut Vec<Transaction>,
        summary: &mut LoadSummary,
    ) -> Result<(), LoadError> {
        let inserted = self.store.insert_batch(batch)?;
        summary.rows_written += inserted as u64;
        summary.batches += 1;
        tracing::debug!(size = batch.len(), inserted, "batch flushed");
        batch.clear();
        Ok(())
    }
}

/// Streams an identity CSV (`full_name`, `iban`, `email`, header required)
/// into an [`IdentityStore`], one committed insert per row.
///
/// Per-row commit is the deliberate choice here: a failure partway through
/// the file leaves every earlier row persisted and aborts on the offending
/// row. A duplicate IBAN is such a failure.
pub struct IdentityLoader<'a, S: IdentityStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: IdentityStore + ?Sized> IdentityLoader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn load<R: Read>(&self, reader: R) -> Result<LoadSummary, LoadError> {
        self.store.init_schema()?;

        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut summary = LoadSummary::default();

        for row in csv_reader.deserialize::<PersonRow>() {
            let row = row?;
            summary.rows_read += 1;
            self.store.insert(&Person {
                full_name: row.full_name,
                iban: row.iban,
                email: row.email,
            })?;
            summary.rows_written += 1;
        }
        tracing::debug!(rows = summary.rows_written, "identity rows inserted");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use time::Date;

    use super::*;

    /// Records the size of every batch it receives.
    struct RecordingStore {
        batch_sizes: Mutex<Vec<usize>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                batch_sizes: Mutex::new(Vec::new()),
            }
        }
    }

    impl TransactionStore for RecordingStore {
        fn insert_batch(&self, batch: &[Transaction]) -> Result<usize, StorageError> {
            self.batch_sizes.lock().unwrap().push(batch.len());
            Ok(batch.len())
        }

        fn find_by_iban(
            &self,
            _iban: &str,
            _from: Date,
            _to: Date,
        ) -> Result<Vec<Transaction>, StorageError> {
            Ok(Vec::new())
        }
    }

    fn transactions_csv(rows: usize) -> String {
        let mut s = String::from("date,iban,amount\n");
        for i in 0..rows {
            s.push_str(&format!("01/01/2024,DE{:08},\"1{},00€\"\n", i, i % 10));
        }
        s
    }

    #[test]
    fn batches_of_one_hundred_with_remainder() {
        let store = RecordingStore::new();
        let loader = TransactionLoader::new(&store);
        let summary = loader.load(transactions_csv(250).as_bytes()).unwrap();

        assert_eq!(summary.rows_read, 250);
        assert_eq!(summary.rows_written, 250);
        assert_eq!(summary.batches, 3);
        assert_eq!(*store.batch_sizes.lock().unwrap(), vec![100, 100, 50]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_batch() {
        let store = RecordingStore::new();
        let loader = TransactionLoader::new(&store);
        let summary = loader.load(transactions_csv(200).as_bytes()).unwrap();

        assert_eq!(summary.batches, 2);
        assert_eq!(*store.batch_sizes.lock().unwrap(), vec![100, 100]);
    }

    #[test]
    fn empty_source_issues_no_batches() {
        let store = RecordingStore::new();
        let loader = TransactionLoader::new(&store);
        let summary = loader.load(transactions_csv(0).as_bytes()).unwrap();

        assert_eq!(summary, LoadSummary::default());
    }

    #[test]
    fn custom_batch_size() {
        let store = RecordingStore::new();
        let loader = TransactionLoader::with_batch_size(&store, 3);
        loader.load(transactions_csv(7).as_bytes()).unwrap();

        assert_eq!(*store.batch_sizes.lock().unwrap(), vec![3, 3, 1]);
    }

    #[test]
    fn missing_column_aborts_the_run() {
        let store = RecordingStore::new();
        let loader = TransactionLoader::new(&store);
        let result = loader.load("date,iban\n01/01/2024,DE1\n".as_bytes());
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn bad_date_aborts_the_run() {
        let store = RecordingStore::new();
        let loader = TransactionLoader::new(&store);
        let result = loader.load("date,iban,amount\n2024-01-01,DE1,1€\n".as_bytes());
        assert!(matches!(result, Err(LoadError::Date(_))));
    }
}
