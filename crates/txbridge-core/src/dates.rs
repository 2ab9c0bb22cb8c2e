//! Date parsing and the ISO text form used by the storage backends.
//!
//! Dates are stored as `YYYY-MM-DD` text in both stores, so range
//! comparisons are lexicographic and still correct. User-facing input
//! (CSV rows, interactive prompts) uses `DD/MM/YYYY`.

use thiserror::Error;
use time::{Date, Month};

#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid date '{0}': expected DD/MM/YYYY")]
    InvalidInput(String),
    #[error("invalid stored date '{0}': expected YYYY-MM-DD")]
    InvalidStored(String),
}

/// Parse a `DD/MM/YYYY` date as found in the CSV sources and the
/// interactive prompts.
pub fn parse_dmy(s: &str) -> Result<Date, DateError> {
    let parts: Vec<&str> = s.trim().split('/').collect();
    if parts.len() != 3 {
        return Err(DateError::InvalidInput(s.to_string()));
    }
    let day = parts[0]
        .parse::<u8>()
        .map_err(|_| DateError::InvalidInput(s.to_string()))?;
    let month = parts[1]
        .parse::<u8>()
        .map_err(|_| DateError::InvalidInput(s.to_string()))?;
    let year = parts[2]
        .parse::<i32>()
        .map_err(|_| DateError::InvalidInput(s.to_string()))?;
    let month = Month::try_from(month).map_err(|_| DateError::InvalidInput(s.to_string()))?;
    Date::from_calendar_date(year, month, day).map_err(|_| DateError::InvalidInput(s.to_string()))
}

/// Render a date in the `YYYY-MM-DD` storage form.
pub fn date_to_str(d: Date) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month() as u8, d.day())
}

/// Parse a date back from the `YYYY-MM-DD` storage form.
pub fn str_to_date(s: &str) -> Result<Date, DateError> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(DateError::InvalidStored(s.to_string()));
    }
    let year = parts[0]
        .parse::<i32>()
        .map_err(|_| DateError::InvalidStored(s.to_string()))?;
    let month = parts[1]
        .parse::<u8>()
        .map_err(|_| DateError::InvalidStored(s.to_string()))?;
    let day = parts[2]
        .parse::<u8>()
        .map_err(|_| DateError::InvalidStored(s.to_string()))?;
    let month = Month::try_from(month).map_err(|_| DateError::InvalidStored(s.to_string()))?;
    Date::from_calendar_date(year, month, day).map_err(|_| DateError::InvalidStored(s.to_string()))
}
