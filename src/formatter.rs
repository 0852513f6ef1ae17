// ==============================================================================
// formatter.rs - Fixed-Width Record Assembly
// ==============================================================================
// Description: Builds one 82-character export record per applicant
// Author: Matt Barham
// Created: 2025-11-12
// Modified: 2026-10-19
// Version: 1.1.0
// ==============================================================================

use thiserror::Error;
use tracing::debug;

use crate::config::ExportConfig;
use crate::models::{
    InputRecord, NameOverflow, NormalizedRecord, BIRTH_DATE_WIDTH, BLANK2_WIDTH, BLANK_WIDTH,
    DPS_INFO_WIDTH, GENDER_WIDTH, NAME_WIDTH, RACE_WIDTH, SSN_WIDTH,
};
use crate::normalizer::{self, NormalizeError};

/// Errors that can occur while assembling a record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Name '{name}' is {len} characters (field width {width})")]
    NameTooLong { name: String, len: usize, width: usize },

    #[error("{field} value '{value}' exceeds field width {width}")]
    FieldOverflow {
        field: &'static str,
        value: String,
        width: usize,
    },
}

/// Left-justify `value` in a field of `width` characters
///
/// Returns `None` when the value is wider than the field.
pub fn fit(value: &str, width: usize) -> Option<String> {
    if value.chars().count() > width {
        return None;
    }
    Some(format!("{:<width$}", value, width = width))
}

fn fit_field(field: &'static str, value: &str, width: usize) -> Result<String, FormatError> {
    fit(value, width).ok_or_else(|| FormatError::FieldOverflow {
        field,
        value: value.to_string(),
        width,
    })
}

/// Assembles [`NormalizedRecord`]s from [`InputRecord`]s
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    dps_info: String,
    name_overflow: NameOverflow,
    uppercase_names: bool,
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

impl RecordFormatter {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            dps_info: config.dps_info.clone(),
            name_overflow: config.name_overflow,
            uppercase_names: config.uppercase_names,
        }
    }

    /// Format one applicant into a fixed-width record
    ///
    /// # Arguments
    /// * `record` - Loaded applicant row
    ///
    /// # Returns
    /// * `Ok(NormalizedRecord)` - Every field at its exact width
    /// * `Err(FormatError)` - Malformed field or a value that cannot fit
    pub fn format(&self, record: &InputRecord) -> Result<NormalizedRecord, FormatError> {
        let name = self.format_name_field(&record.full_name)?;
        let gender = normalizer::gender_code(&record.gender)?;
        let race = normalizer::race_code(&record.local_race)?;
        let birth_date = normalizer::format_birth_date(record.birth_date);
        let ssn = normalizer::strip_ssn(&record.ssn)?;

        let formatted = NormalizedRecord {
            name,
            gender: fit_field("Gender", &gender.to_string(), GENDER_WIDTH)?,
            local_race: fit_field("LocalRace", &race.to_string(), RACE_WIDTH)?,
            birth_date: fit_field("BirthDate", &birth_date, BIRTH_DATE_WIDTH)?,
            dps_info: fit_field("DPSInfo", &self.dps_info, DPS_INFO_WIDTH)?,
            blank: " ".repeat(BLANK_WIDTH),
            ssn: fit_field("SSN", &ssn, SSN_WIDTH)?,
            blank2: " ".repeat(BLANK2_WIDTH),
        };

        debug!("Processed row: {:?} -> {:?}", record.full_name, formatted.name);
        Ok(formatted)
    }

    fn format_name_field(&self, full_name: &str) -> Result<String, FormatError> {
        let mut name = normalizer::format_name(full_name)?;
        if self.uppercase_names {
            name = name.to_uppercase();
        }

        if let Some(padded) = fit(&name, NAME_WIDTH) {
            return Ok(padded);
        }

        match self.name_overflow {
            NameOverflow::Reject => Err(FormatError::NameTooLong {
                len: name.chars().count(),
                name,
                width: NAME_WIDTH,
            }),
            NameOverflow::Truncate => {
                let truncated: String = name.chars().take(NAME_WIDTH).collect();
                debug!("Truncated name: {} -> {}", name, truncated);
                Ok(truncated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RECORD_WIDTH;
    use chrono::NaiveDate;

    fn applicant(name: &str, gender: &str, race: &str, ssn: &str) -> InputRecord {
        InputRecord {
            full_name: name.to_string(),
            gender: gender.to_string(),
            local_race: race.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 15).unwrap(),
            ssn: ssn.to_string(),
        }
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("AB", 4).unwrap(), "AB  ");
        assert_eq!(fit("ABCD", 4).unwrap(), "ABCD");
        assert_eq!(fit("", 3).unwrap(), "   ");
        assert!(fit("ABCDE", 4).is_none());
    }

    #[test]
    fn test_end_to_end_record() {
        let formatter = RecordFormatter::default();
        let record = formatter
            .format(&applicant("Smith, John A", "Male", "White", "123-45-6789"))
            .unwrap();

        assert_eq!(record.name, format!("{:<30}", "SMITH,JOHN"));
        assert_eq!(record.gender, "M");
        assert_eq!(record.local_race, "W");
        assert_eq!(record.birth_date, "20000115");
        assert_eq!(record.dps_info, "3455");
        assert_eq!(record.blank, " ".repeat(9));
        assert_eq!(record.ssn, "123456789");
        assert_eq!(record.blank2, " ".repeat(20));

        let expected = [
            format!("{:<30}", "SMITH,JOHN"),
            "M".to_string(),
            "W".to_string(),
            "20000115".to_string(),
            "3455".to_string(),
            " ".repeat(9),
            "123456789".to_string(),
            " ".repeat(20),
        ]
        .concat();
        assert_eq!(record.to_line(), expected);
        assert_eq!(record.to_line().len(), RECORD_WIDTH);
    }

    #[test]
    fn test_preserve_case() {
        let config = ExportConfig {
            uppercase_names: false,
            ..ExportConfig::default()
        };
        let formatter = RecordFormatter::from_config(&config);
        let record = formatter
            .format(&applicant("Smith, John", "F", "B", "111223333"))
            .unwrap();
        assert_eq!(record.name.trim_end(), "Smith,John");
    }

    #[test]
    fn test_short_ssn_padded() {
        let formatter = RecordFormatter::default();
        let record = formatter
            .format(&applicant("Doe, Jane", "F", "B", "1234-5678"))
            .unwrap();
        assert_eq!(record.ssn, "12345678 ");
    }

    #[test]
    fn test_name_overflow_reject() {
        let formatter = RecordFormatter::default();
        let long = "Wolfeschlegelsteinhausenbergerdorff, Hubert";
        let err = formatter.format(&applicant(long, "M", "W", "123456789")).unwrap_err();
        assert!(matches!(err, FormatError::NameTooLong { width: 30, .. }));
    }

    #[test]
    fn test_name_overflow_truncate() {
        let config = ExportConfig {
            name_overflow: NameOverflow::Truncate,
            ..ExportConfig::default()
        };
        let formatter = RecordFormatter::from_config(&config);
        let long = "Wolfeschlegelsteinhausenbergerdorff, Hubert";
        let record = formatter.format(&applicant(long, "M", "W", "123456789")).unwrap();
        assert_eq!(record.name.len(), NAME_WIDTH);
        assert_eq!(record.name, "WOLFESCHLEGELSTEINHAUSENBERGER");
        assert_eq!(record.to_line().len(), RECORD_WIDTH);
    }

    #[test]
    fn test_malformed_fields_propagate() {
        let formatter = RecordFormatter::default();
        assert!(matches!(
            formatter.format(&applicant("Smith, John", "", "W", "123456789")),
            Err(FormatError::Normalize(NormalizeError::EmptyField { .. }))
        ));
        assert!(matches!(
            formatter.format(&applicant("Smith John", "M", "W", "123456789")),
            Err(FormatError::Normalize(NormalizeError::MissingComma(_)))
        ));
        assert!(matches!(
            formatter.format(&applicant("Smith, John", "M", "W", "12-AB")),
            Err(FormatError::Normalize(NormalizeError::InvalidSsn(_)))
        ));
    }

    #[test]
    fn test_dps_info_overflow() {
        let config = ExportConfig {
            dps_info: "34555".to_string(),
            ..ExportConfig::default()
        };
        let formatter = RecordFormatter::from_config(&config);
        let err = formatter
            .format(&applicant("Smith, John", "M", "W", "123456789"))
            .unwrap_err();
        assert!(matches!(err, FormatError::FieldOverflow { field: "DPSInfo", .. }));
    }
}
