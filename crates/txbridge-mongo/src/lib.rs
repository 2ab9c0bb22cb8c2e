//! MongoDB document-store backend.
//!
//! Documents are exactly `{date, iban, amount}` with the date as
//! `YYYY-MM-DD` text, so the range filter compares lexicographically.
//! MongoDB adds its own `_id`; nothing else is injected.

use mongodb::{
    bson::{doc, Document},
    error::ErrorKind,
    options::InsertManyOptions,
    sync::{Client, Collection},
};
use time::Date;

use txbridge_core::{
    dates::{date_to_str, str_to_date},
    StorageError, Transaction, TransactionStore,
};

pub struct MongoTransactionStore {
    collection: Collection<Document>,
}

impl MongoTransactionStore {
    pub fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .map_err(|e| StorageError::Connection(format!("MongoDB connection failed: {}", e)))?;
        let collection = client.database(database).collection::<Document>(collection);
        Ok(Self { collection })
    }

    fn to_document(txn: &Transaction) -> Document {
        doc! {
            "date": date_to_str(txn.date),
            "iban": &txn.iban,
            "amount": &txn.amount,
        }
    }

    fn from_document(doc: &Document) -> Result<Transaction, StorageError> {
        let date = doc
            .get_str("date")
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let iban = doc
            .get_str("iban")
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let amount = doc
            .get_str("amount")
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(Transaction {
            date: str_to_date(date).map_err(|e| StorageError::Backend(e.to_string()))?,
            iban: iban.to_string(),
            amount: amount.to_string(),
        })
    }
}

impl TransactionStore for MongoTransactionStore {
    fn insert_batch(&self, batch: &[Transaction]) -> Result<usize, StorageError> {
        let documents: Vec<Document> = batch.iter().map(Self::to_document).collect();
        let options = InsertManyOptions::builder().ordered(false).build();

        match self.collection.insert_many(documents, options) {
            Ok(result) => Ok(result.inserted_ids.len()),
            // Unordered write: the remaining documents were still attempted,
            // report how many made it in.
            Err(e) => match &*e.kind {
                ErrorKind::BulkWrite(failure) => {
                    let failed = failure.write_errors.as_ref().map_or(0, |w| w.len());
                    tracing::warn!(failed, size = batch.len(), "bulk insert partially failed");
                    Ok(batch.len().saturating_sub(failed))
                }
                _ => Err(StorageError::Backend(e.to_string())),
            },
        }
    }

    fn find_by_iban(
        &self,
        iban: &str,
        from: Date,
        to: Date,
    ) -> Result<Vec<Transaction>, StorageError> {
        let filter = doc! {
            "iban": iban,
            "date": { "$gte": date_to_str(from), "$lte": date_to_str(to) },
        };

        let cursor = self
            .collection
            .find(filter, None)
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let mut transactions = Vec::new();
        for document in cursor {
            let document = document.map_err(|e| StorageError::Backend(e.to_string()))?;
            transactions.push(Self::from_document(&document)?);
        }
        tracing::debug!(iban, matches = transactions.len(), "range query complete");
        Ok(transactions)
    }
}
