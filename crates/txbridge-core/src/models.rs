use time::Date;

/// A single financial transaction as held by the document store.
///
/// The amount is kept as the raw currency string from the source CSV
/// (e.g. `"1.234,56€"`); it is only parsed into a number at query time by
/// [`crate::amount::parse_amount`]. Duplicates are permitted and preserved,
/// and no identifier is injected beyond whatever the store assigns itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: Date,
    pub iban: String,
    pub amount: String,
}

/// Identity record mapping a person to their IBAN.
///
/// The IBAN is the uniqueness constraint and the join key linking a person
/// to their transactions in the document store. The relational store is the
/// source of truth for this mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub full_name: String,
    pub iban: String,
    pub email: String,
}
