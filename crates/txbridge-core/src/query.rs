//! Cross-store query: relational point lookup, then document range scan.

use std::fmt::Display;

use prettytable::{row, Table};
use rust_decimal::Decimal;
use thiserror::Error;
use time::Date;

use crate::amount::{parse_amount, AmountError};
use crate::models::Transaction;
use crate::storage::{IdentityStore, StorageError, TransactionStore};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Result of a cross-store query for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReport {
    pub full_name: String,
    /// `None` when the name has no row in the identity store.
    pub iban: Option<String>,
    /// Store order, date range inclusive on both ends.
    pub transactions: Vec<Transaction>,
    /// Sum of the normalized amounts, rescaled to 3 decimal places.
    pub total: Decimal,
}

/// Retrieve all transactions for `full_name` dated within `[from, to]`.
///
/// The IBAN is looked up in the identity store by exact full-name match and
/// then used to filter the transaction store; the join is performed here, in
/// application code, with no referential integrity between the stores. An
/// unknown name is not an error: it yields an empty report with a zero total.
pub fn retrieve_transactions(
    identities: &dyn IdentityStore,
    transactions: &dyn TransactionStore,
    full_name: &str,
    from: Date,
    to: Date,
) -> Result<TransactionReport, QueryError> {
    let iban = identities.find_iban(full_name)?;

    let found = match &iban {
        Some(iban) => transactions.find_by_iban(iban, from, to)?,
        None => Vec::new(),
    };

    let mut total = Decimal::ZERO;
    for txn in &found {
        total += parse_amount(&txn.amount)?;
    }
    let mut total = total.round_dp(3);
    total.rescale(3);

    tracing::debug!(
        full_name,
        matches = found.len(),
        %total,
        "cross-store query complete"
    );

    Ok(TransactionReport {
        full_name: full_name.to_string(),
        iban,
        transactions: found,
        total,
    })
}

impl Display for TransactionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Full name: {}", self.full_name)?;
        if let Some(iban) = &self.iban {
            writeln!(f, "IBAN: {}", iban)?;
        }
        writeln!(f, "--------------------------------------------------")?;

        let mut table = Table::new();
        table.add_row(row!["Date", "Amount"]);
        table.add_empty_row();
        for txn in &self.transactions {
            table.add_row(row![txn.date, txn.amount]);
        }
        writeln!(f, "{}", table)?;

        write!(f, "Total amount: {} €", self.total)
    }
}
