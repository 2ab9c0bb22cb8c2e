//! Currency-string normalization.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("unparseable amount '{0}'")]
    Unparseable(String),
}

/// Parse a locale-formatted currency string into a [`Decimal`].
///
/// Amounts arrive as produced by the transaction source: a `€` symbol,
/// `,` as the decimal separator and `.` as the grouping separator, e.g.
/// `"1.234,56€"` parses to `1234.56`. When no comma is present the `.` is
/// taken as a plain decimal point, so `"10.50"` still parses as `10.50`.
/// Unparseable input is an explicit error, never a silent default.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let stripped = raw.replace('€', "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Err(AmountError::Empty);
    }

    let normalized = if stripped.contains(',') {
        // European format: drop grouping dots, comma is the decimal point.
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped.to_string()
    };

    Decimal::from_str(&normalized).map_err(|_| AmountError::Unparseable(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_grouped_european_amount() {
        assert_eq!(parse_amount("1.234,56€").unwrap(), dec!(1234.56));
    }

    #[test]
    fn parses_simple_amounts() {
        assert_eq!(parse_amount("10,00€").unwrap(), dec!(10.00));
        assert_eq!(parse_amount("5,50€").unwrap(), dec!(5.50));
        assert_eq!(parse_amount(" 2,50 € ").unwrap(), dec!(2.50));
    }

    #[test]
    fn parses_plain_decimal_point() {
        assert_eq!(parse_amount("10.50").unwrap(), dec!(10.50));
        assert_eq!(parse_amount("-3").unwrap(), dec!(-3));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_amount("€"), Err(AmountError::Empty));
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        assert_eq!(
            parse_amount("abc€"),
            Err(AmountError::Unparseable("abc€".to_string()))
        );
    }
}
