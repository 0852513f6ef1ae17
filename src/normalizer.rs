// ==============================================================================
// normalizer.rs - Applicant Field Normalization
// ==============================================================================
// Description: Pure mappings from raw applicant fields to export codes/strings
// Author: Matt Barham
// Created: 2025-11-06
// Modified: 2026-10-19
// Version: 1.2.0
// ==============================================================================
// Rules:
//   Gender:  first char 'M' | 'F' → itself, anything else → 'E'
//   Race:    first char 'W' | 'B' → itself, 'H' → 'W', anything else → 'U'
//   Name:    "Last, First Middle" → "Last,First" (hyphens/apostrophes removed,
//            spaces/commas/periods removed from the last name)
//   SSN:     hyphens removed, 1-9 ASCII digits
//   DOB:     YYYYMMDD
// ==============================================================================

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

/// Unknown/error sentinel for gender
pub const GENDER_UNKNOWN: char = 'E';

/// Unknown sentinel for race
pub const RACE_UNKNOWN: char = 'U';

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

// chrono's %Y also accepts 1-3 digit years ("1/15/00" → year 0)
const MIN_YEAR: i32 = 1000;

/// Errors raised for malformed applicant fields
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("{field} is empty")]
    EmptyField { field: &'static str },

    #[error("Name '{0}' has no comma (expected \"Last, First\")")]
    MissingComma(String),

    #[error("Name '{0}' has no first name after \", \"")]
    MissingFirstName(String),

    #[error("Name '{0}' has an empty last name")]
    EmptyLastName(String),

    #[error("Invalid date of birth: '{0}'")]
    InvalidDate(String),

    #[error("Invalid social security number: '{0}' (expected up to 9 digits)")]
    InvalidSsn(String),
}

/// Map a gender string to its one-letter export code
///
/// Only the first character is inspected and matching is case-sensitive:
/// `"Male"` → `'M'`, `"female"` → `'E'`.
pub fn gender_code(gender: &str) -> Result<char, NormalizeError> {
    let first = gender
        .chars()
        .next()
        .ok_or(NormalizeError::EmptyField { field: "Gender" })?;

    let code = match first {
        'M' | 'F' => first,
        _ => GENDER_UNKNOWN,
    };
    debug!("Processed gender: {} -> {}", gender, code);
    Ok(code)
}

/// Map a race string to its one-letter export code
///
/// Hispanic is recorded as White in this format.
pub fn race_code(race: &str) -> Result<char, NormalizeError> {
    let first = race
        .chars()
        .next()
        .ok_or(NormalizeError::EmptyField { field: "Local Race" })?;

    let code = match first {
        'W' | 'B' => first,
        'H' => 'W',
        _ => RACE_UNKNOWN,
    };
    debug!("Processed race: {} -> {}", race, code);
    Ok(code)
}

/// Reduce a "Last, First [Middle...]" name to "Last,First"
///
/// # Algorithm
/// 1. Drop every `-` and `'` in the whole string
/// 2. Split on the first comma
/// 3. Drop spaces, commas and periods from the last-name part
/// 4. Split the first-name part on single spaces and take token 1
///    (token 0 is the empty string before the space that follows the comma)
///
/// The result is not padded; see [`crate::formatter::RecordFormatter`].
///
/// # Errors
/// * `MissingComma` - no comma at all
/// * `MissingFirstName` - nothing at token 1 (e.g. `"Smith,John"` or `"Smith,  John"`)
/// * `EmptyLastName` - last name reduces to nothing
///
/// # Examples
/// ```
/// use bgcheck_export::normalizer::format_name;
///
/// assert_eq!(format_name("Smith, John A").unwrap(), "Smith,John");
/// assert_eq!(format_name("O'Brien-Jones Jr., Mary-Kate").unwrap(), "OBrienJonesJr,MaryKate");
/// ```
pub fn format_name(name: &str) -> Result<String, NormalizeError> {
    let cleaned: String = name.chars().filter(|c| !matches!(c, '-' | '\'')).collect();

    let (last_part, first_part) = cleaned
        .split_once(',')
        .ok_or_else(|| NormalizeError::MissingComma(name.to_string()))?;

    let last_name: String = last_part
        .chars()
        .filter(|c| !matches!(c, ' ' | ',' | '.'))
        .collect();
    if last_name.is_empty() {
        return Err(NormalizeError::EmptyLastName(name.to_string()));
    }

    let first_name = first_part
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| NormalizeError::MissingFirstName(name.to_string()))?;

    let formatted = format!("{},{}", last_name, first_name);
    debug!("Formatted name: {} -> {}", cleaned, formatted);
    Ok(formatted)
}

/// Parse a date of birth as exported by common spreadsheet tools
///
/// Accepts ISO dates, US `M/D/YYYY`, compact `YYYYMMDD`, and date-times
/// (the time part is discarded), including the `M/D/YYYY H:MM` and AM/PM
/// shapes spreadsheet CSV exports produce. Years must have four digits.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, NormalizeError> {
    let value = raw.trim();

    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        return parse_compact_date(value).ok_or_else(|| NormalizeError::InvalidDate(raw.to_string()));
    }

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .chain(
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date()),
        )
        .find(|date| date.year() >= MIN_YEAR)
        .ok_or_else(|| NormalizeError::InvalidDate(raw.to_string()))
}

fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    let year = value.get(0..4)?.parse().ok()?;
    let month = value.get(4..6)?.parse().ok()?;
    let day = value.get(6..8)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render a birth date as YYYYMMDD
pub fn format_birth_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Strip separators from an SSN
///
/// Hyphens are removed and surrounding whitespace trimmed. What remains must
/// be 1-9 ASCII digits; shorter values are padded by the formatter.
pub fn strip_ssn(ssn: &str) -> Result<String, NormalizeError> {
    let stripped: String = ssn.trim().chars().filter(|c| *c != '-').collect();

    if stripped.is_empty() || stripped.len() > 9 || !stripped.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NormalizeError::InvalidSsn(ssn.to_string()));
    }

    Ok(stripped)
}
