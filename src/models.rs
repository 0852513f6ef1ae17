// ==============================================================================
// models.rs - Applicant Export Data Models
// ==============================================================================
// Description: Input rows, fixed-width export records and layout constants
// Author: Matt Barham
// Created: 2025-11-12
// Modified: 2026-10-19
// Version: 2.1.0
// ==============================================================================
// Export layout (82 characters per line, no delimiters):
//   Name(30) Gender(1) LocalRace(1) BirthDate(8) DPSInfo(4)
//   Blank(9) SSN(9) Blank2(20)
// ==============================================================================

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

pub const NAME_WIDTH: usize = 30;
pub const GENDER_WIDTH: usize = 1;
pub const RACE_WIDTH: usize = 1;
pub const BIRTH_DATE_WIDTH: usize = 8;
pub const DPS_INFO_WIDTH: usize = 4;
pub const BLANK_WIDTH: usize = 9;
pub const SSN_WIDTH: usize = 9;
pub const BLANK2_WIDTH: usize = 20;

/// Total width of one export line
pub const RECORD_WIDTH: usize = NAME_WIDTH
    + GENDER_WIDTH
    + RACE_WIDTH
    + BIRTH_DATE_WIDTH
    + DPS_INFO_WIDTH
    + BLANK_WIDTH
    + SSN_WIDTH
    + BLANK2_WIDTH;

/// Program code embedded in every record
pub const DEFAULT_DPS_INFO: &str = "3455";

/// Column headers expected in the applicant CSV
pub const COL_FULL_NAME: &str = "Applicant Full Name";
pub const COL_GENDER: &str = "Gender";
pub const COL_LOCAL_RACE: &str = "Local Race";
pub const COL_BIRTH_DATE: &str = "Date of Birth";
pub const COL_SSN: &str = "Social Security Number";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_FULL_NAME,
    COL_GENDER,
    COL_LOCAL_RACE,
    COL_BIRTH_DATE,
    COL_SSN,
];

/// One raw CSV row, exactly as it appears in the applicant table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApplicantRow {
    #[serde(rename = "Applicant Full Name")]
    pub full_name: String,

    #[serde(rename = "Gender")]
    pub gender: String,

    #[serde(rename = "Local Race")]
    pub local_race: String,

    /// Unparsed; converted to a date by the loader
    #[serde(rename = "Date of Birth")]
    pub birth_date: String,

    #[serde(rename = "Social Security Number")]
    pub ssn: String,
}

/// Applicant record after loading (birth date parsed)
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    /// "Last, First [Middle...]"
    pub full_name: String,
    pub gender: String,
    pub local_race: String,
    pub birth_date: NaiveDate,
    /// May still contain hyphens
    pub ssn: String,
}

/// Fixed-width export record. Every field is already at its exact width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub name: String,
    pub gender: String,
    pub local_race: String,
    pub birth_date: String,
    pub dps_info: String,
    pub blank: String,
    pub ssn: String,
    pub blank2: String,
}

impl NormalizedRecord {
    /// Fields in export order
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.name,
            &self.gender,
            &self.local_race,
            &self.birth_date,
            &self.dps_info,
            &self.blank,
            &self.ssn,
            &self.blank2,
        ]
    }

    /// Concatenate all fields into one export line
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(RECORD_WIDTH);
        for field in self.fields() {
            line.push_str(field);
        }
        line
    }
}

impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in self.fields() {
            f.write_str(field)?;
        }
        Ok(())
    }
}

/// What to do when the formatted name does not fit its 30-character field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameOverflow {
    /// Fail the run
    #[default]
    Reject,
    /// Keep the first 30 characters
    Truncate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> NormalizedRecord {
        NormalizedRecord {
            name: format!("{:<30}", "SMITH,JOHN"),
            gender: "M".to_string(),
            local_race: "W".to_string(),
            birth_date: "20000115".to_string(),
            dps_info: "3455".to_string(),
            blank: " ".repeat(9),
            ssn: "123456789".to_string(),
            blank2: " ".repeat(20),
        }
    }

    #[test]
    fn test_record_width_constant() {
        assert_eq!(RECORD_WIDTH, 82);
    }

    #[test]
    fn test_to_line_concatenates_in_field_order() {
        let record = sample_record();
        let line = record.to_line();

        assert_eq!(line.len(), RECORD_WIDTH);
        assert_eq!(&line[0..30], record.name);
        assert_eq!(&line[30..31], "M");
        assert_eq!(&line[31..32], "W");
        assert_eq!(&line[32..40], "20000115");
        assert_eq!(&line[40..44], "3455");
        assert_eq!(&line[44..53], " ".repeat(9));
        assert_eq!(&line[53..62], "123456789");
        assert_eq!(&line[62..82], " ".repeat(20));
    }

    #[test]
    fn test_display_matches_to_line() {
        let record = sample_record();
        assert_eq!(record.to_string(), record.to_line());
    }

    #[test]
    fn test_name_overflow_default() {
        assert_eq!(NameOverflow::default(), NameOverflow::Reject);
    }
}
