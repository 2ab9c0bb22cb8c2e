use txbridge_core::{
    dates::parse_dmy, retrieve_transactions, IdentityLoader, LoadError, StorageError,
    TransactionLoader,
};
use txbridge_memory::{MemoryIdentityStore, MemoryTransactionStore};

use rust_decimal_macros::dec;

const IDENTITIES_CSV: &str = "\
full_name,iban,email
Jane Doe,DE00IBANX,jane@x.com
John Roe,DE11IBANY,john@y.com
";

const TRANSACTIONS_CSV: &str = "\
date,iban,amount
01/01/2024,DE00IBANX,\"10,00€\"
05/01/2024,DE00IBANX,\"5,50€\"
03/01/2024,DE11IBANY,\"99,99€\"
";

fn loaded_stores() -> (MemoryIdentityStore, MemoryTransactionStore) {
    let identities = MemoryIdentityStore::new();
    IdentityLoader::new(&identities)
        .load(IDENTITIES_CSV.as_bytes())
        .expect("identity load failed");

    let transactions = MemoryTransactionStore::new();
    TransactionLoader::new(&transactions)
        .load(TRANSACTIONS_CSV.as_bytes())
        .expect("transaction load failed");

    (identities, transactions)
}

#[test]
fn jane_doe_scenario() {
    let (identities, transactions) = loaded_stores();

    let report = retrieve_transactions(
        &identities,
        &transactions,
        "Jane Doe",
        parse_dmy("01/01/2024").unwrap(),
        parse_dmy("05/01/2024").unwrap(),
    )
    .unwrap();

    assert_eq!(report.iban.as_deref(), Some("DE00IBANX"));
    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.total, dec!(15.500));
    assert_eq!(report.total.to_string(), "15.500");
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let (identities, transactions) = loaded_stores();

    // Exactly on the bounds: both rows included.
    let report = retrieve_transactions(
        &identities,
        &transactions,
        "Jane Doe",
        parse_dmy("01/01/2024").unwrap(),
        parse_dmy("05/01/2024").unwrap(),
    )
    .unwrap();
    assert_eq!(report.transactions.len(), 2);

    // One day inside either bound: the boundary rows fall out.
    let report = retrieve_transactions(
        &identities,
        &transactions,
        "Jane Doe",
        parse_dmy("02/01/2024").unwrap(),
        parse_dmy("04/01/2024").unwrap(),
    )
    .unwrap();
    assert!(report.transactions.is_empty());
    assert_eq!(report.total.to_string(), "0.000");
}

#[test]
fn absent_name_is_an_empty_report_not_an_error() {
    let (identities, transactions) = loaded_stores();

    let report = retrieve_transactions(
        &identities,
        &transactions,
        "Nobody Here",
        parse_dmy("01/01/2024").unwrap(),
        parse_dmy("31/12/2024").unwrap(),
    )
    .unwrap();

    assert_eq!(report.iban, None);
    assert!(report.transactions.is_empty());
    assert_eq!(report.total.to_string(), "0.000");
}

#[test]
fn query_filters_by_the_looked_up_iban_only() {
    let (identities, transactions) = loaded_stores();

    let report = retrieve_transactions(
        &identities,
        &transactions,
        "John Roe",
        parse_dmy("01/01/2024").unwrap(),
        parse_dmy("31/12/2024").unwrap(),
    )
    .unwrap();

    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.transactions[0].iban, "DE11IBANY");
    assert_eq!(report.total.to_string(), "99.990");
}

#[test]
fn transactions_come_back_in_insertion_order() {
    let (identities, transactions) = loaded_stores();

    let report = retrieve_transactions(
        &identities,
        &transactions,
        "Jane Doe",
        parse_dmy("01/01/2024").unwrap(),
        parse_dmy("31/12/2024").unwrap(),
    )
    .unwrap();

    let amounts: Vec<&str> = report
        .transactions
        .iter()
        .map(|t| t.amount.as_str())
        .collect();
    assert_eq!(amounts, vec!["10,00€", "5,50€"]);
}

#[test]
fn duplicate_iban_aborts_leaving_earlier_rows_committed() {
    let csv = "\
full_name,iban,email
Jane Doe,DE00IBANX,jane@x.com
John Roe,DE11IBANY,john@y.com
Jane Clone,DE00IBANX,clone@x.com
Never Reached,DE22IBANZ,never@z.com
";
    let identities = MemoryIdentityStore::new();
    let result = IdentityLoader::new(&identities).load(csv.as_bytes());

    match result {
        Err(LoadError::Storage(StorageError::DuplicateIban(iban))) => {
            assert_eq!(iban, "DE00IBANX");
        }
        other => panic!("expected duplicate IBAN error, got {:?}", other),
    }
    // The two rows before the offending one stay persisted.
    assert_eq!(identities.len(), 2);
}

#[test]
fn loader_counts_match_source_row_counts() {
    let (identities, transactions) = loaded_stores();
    assert_eq!(identities.len(), 2);
    assert_eq!(transactions.len(), 3);
}

#[test]
fn reloading_transactions_appends_duplicates() {
    let (_, transactions) = loaded_stores();
    TransactionLoader::new(&transactions)
        .load(TRANSACTIONS_CSV.as_bytes())
        .unwrap();
    assert_eq!(transactions.len(), 6);
}

#[test]
fn report_renders_name_iban_and_total() {
    let (identities, transactions) = loaded_stores();

    let report = retrieve_transactions(
        &identities,
        &transactions,
        "Jane Doe",
        parse_dmy("01/01/2024").unwrap(),
        parse_dmy("05/01/2024").unwrap(),
    )
    .unwrap();

    let rendered = report.to_string();
    assert!(rendered.contains("Full name: Jane Doe"));
    assert!(rendered.contains("IBAN: DE00IBANX"));
    assert!(rendered.contains("Total amount: 15.500 €"));
    // The iban column is omitted from the table body.
    assert!(rendered.contains("2024-01-01"));
}
