// ==============================================================================
// applicants.rs - Applicant CSV Parser
// ==============================================================================
// Description: Loads applicant rows from the intake CSV export
// Author: Matt Barham
// Created: 2025-11-06
// Modified: 2026-10-19
// Version: 1.1.0
// ==============================================================================
// Format: CSV file with header, extra columns ignored
// Example:
//   Applicant Full Name,Gender,Local Race,Date of Birth,Social Security Number
//   "Smith, John A",Male,White,2000-01-15,123-45-6789
// ==============================================================================

use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ApplicantRow, InputRecord, REQUIRED_COLUMNS};
use crate::normalizer::parse_birth_date;

/// Errors that can occur during applicant file parsing
#[derive(Error, Debug)]
pub enum ApplicantParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    #[error("Invalid date of birth at row {row}: '{value}'")]
    InvalidDate { row: usize, value: String },
}

/// Applicant CSV parser
pub struct ApplicantParser;

impl ApplicantParser {
    /// Parse applicant records from a CSV file
    ///
    /// # Arguments
    /// * `path` - Path to the intake export (import.csv)
    ///
    /// # Returns
    /// * `Ok(Vec<InputRecord>)` - Records in file order
    /// * `Err(ApplicantParseError)` - Parse error
    ///
    /// Header names are trimmed; field values are not, since the name rule
    /// depends on the space after the comma.
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<InputRecord>, ApplicantParseError> {
        let path = path.as_ref();
        info!("Reading CSV file from {:?}", path);

        let file = std::fs::File::open(path)?;
        let records = Self::parse_reader(file)?;

        info!("Read {} rows from {:?}", records.len(), path);
        Ok(records)
    }

    /// Parse applicant records from any reader
    pub fn parse_reader<R: Read>(input: R) -> Result<Vec<InputRecord>, ApplicantParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ApplicantParseError::MissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<ApplicantRow>().enumerate() {
            let row = result?;
            let birth_date =
                parse_birth_date(&row.birth_date).map_err(|_| ApplicantParseError::InvalidDate {
                    row: idx + 1,
                    value: row.birth_date.clone(),
                })?;

            debug!("Loaded row {}: {}", idx + 1, row.full_name);
            records.push(InputRecord {
                full_name: row.full_name,
                gender: row.gender,
                local_race: row.local_race,
                birth_date,
                ssn: row.ssn,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "Applicant Full Name,Gender,Local Race,Date of Birth,Social Security Number";

    #[test]
    fn test_parse_reader() {
        let data = format!(
            "{}\n\"Smith, John A\",Male,White,2000-01-15,123-45-6789\n\"Doe, Jane\",Female,Black,3/7/1991,987654321\n",
            HEADER
        );

        let records = ApplicantParser::parse_reader(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].full_name, "Smith, John A");
        assert_eq!(records[0].gender, "Male");
        assert_eq!(records[0].local_race, "White");
        assert_eq!(records[0].birth_date, NaiveDate::from_ymd_opt(2000, 1, 15).unwrap());
        assert_eq!(records[0].ssn, "123-45-6789");
        assert_eq!(records[1].birth_date, NaiveDate::from_ymd_opt(1991, 3, 7).unwrap());
    }

    #[test]
    fn test_extra_columns_and_order() {
        let data = "Applicant ID,Social Security Number,Gender,Applicant Full Name,Local Race,Date of Birth,Status\n\
                    42,111-22-3333,F,\"Lee, Ann\",Hispanic,1980-12-31,Open\n";

        let records = ApplicantParser::parse_reader(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_name, "Lee, Ann");
        assert_eq!(records[0].local_race, "Hispanic");
        assert_eq!(records[0].ssn, "111-22-3333");
    }

    #[test]
    fn test_values_not_trimmed() {
        let data = format!("{}\n\"Smith, John\", Male,White,2000-01-15,123456789\n", HEADER);
        let records = ApplicantParser::parse_reader(data.as_bytes()).unwrap();
        assert_eq!(records[0].gender, " Male");
    }

    #[test]
    fn test_missing_column() {
        let data = "Applicant Full Name,Gender,Date of Birth,Social Security Number\n\
                    \"Smith, John\",M,2000-01-15,123456789\n";

        let err = ApplicantParser::parse_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ApplicantParseError::MissingColumn(ref c) if c == "Local Race"));
    }

    #[test]
    fn test_invalid_date_reports_row() {
        let data = format!(
            "{}\n\"Smith, John\",M,W,2000-01-15,123456789\n\"Doe, Jane\",F,B,someday,987654321\n",
            HEADER
        );

        let err = ApplicantParser::parse_reader(data.as_bytes()).unwrap_err();
        match err {
            ApplicantParseError::InvalidDate { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_two_digit_year_rejected() {
        let data = format!("{}\n\"Smith, John\",M,W,1/15/00,123456789\n", HEADER);

        let err = ApplicantParser::parse_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ApplicantParseError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn test_header_only() {
        let data = format!("{}\n", HEADER);
        let records = ApplicantParser::parse_reader(data.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", HEADER).unwrap();
        writeln!(temp_file, "\"Smith, John A\",Male,White,2000-01-15,123-45-6789").unwrap();
        temp_file.flush().unwrap();

        let records = ApplicantParser::parse(temp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = ApplicantParser::parse("/nonexistent/import.csv").unwrap_err();
        assert!(matches!(err, ApplicantParseError::Io(_)));
    }
}
