// ==============================================================================
// config.rs - Export Run Configuration
// ==============================================================================
// Description: Input/output locations and formatting options for one run
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::Result;
use std::path::PathBuf;

use crate::models::{NameOverflow, DEFAULT_DPS_INFO, DPS_INFO_WIDTH};

pub const DEFAULT_INPUT_PATH: &str = "import.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "export.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Applicant CSV to read
    pub input_path: PathBuf,

    /// Fixed-width file to write
    pub output_path: PathBuf,

    /// Program code written into every record (max 4 characters)
    pub dps_info: String,

    pub name_overflow: NameOverflow,

    /// Upper-case the formatted name ("SMITH,JOHN")
    pub uppercase_names: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            dps_info: DEFAULT_DPS_INFO.to_string(),
            name_overflow: NameOverflow::Reject,
            uppercase_names: true,
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            anyhow::bail!("Input path must not be empty");
        }
        if self.output_path.as_os_str().is_empty() {
            anyhow::bail!("Output path must not be empty");
        }
        if self.dps_info.chars().count() > DPS_INFO_WIDTH {
            anyhow::bail!(
                "DPS info '{}' is longer than {} characters",
                self.dps_info,
                DPS_INFO_WIDTH
            );
        }
        if self.input_path == self.output_path {
            anyhow::bail!("Input and output paths must differ");
        }
        Ok(())
    }
}
