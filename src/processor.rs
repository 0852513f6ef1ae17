// ==============================================================================
// processor.rs - Applicant Export Pipeline
// ==============================================================================
// Description: Load → normalize → dedupe → sort → write, all-or-nothing
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-19
// Version: 3.0.0
// ==============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::config::ExportConfig;
use crate::formatter::RecordFormatter;
use crate::models::{InputRecord, NormalizedRecord};
use crate::output::{self, ExportWriter};
use crate::parsers::ApplicantParser;
use crate::validator::InputValidator;

/// Outcome of a successful export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub run_id: Uuid,
    pub input_path: PathBuf,
    pub input_sha256: String,
    pub output_path: PathBuf,
    pub output_sha256: String,
    pub rows_read: usize,
    pub duplicates_dropped: usize,
    pub rows_written: usize,
    pub completed_at: DateTime<Utc>,
}

pub struct ExportProcessor {
    run_id: Uuid,
    config: ExportConfig,
    formatter: RecordFormatter,
}

impl ExportProcessor {
    pub fn new(config: ExportConfig) -> Self {
        let formatter = RecordFormatter::from_config(&config);
        Self {
            run_id: Uuid::new_v4(),
            config,
            formatter,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Main processing pipeline
    ///
    /// Any malformed row aborts the whole run before the output file is
    /// touched.
    pub fn process(&self) -> Result<ExportSummary> {
        let span = info_span!("export", run_id = %self.run_id);
        let _guard = span.enter();

        self.config.validate().context("Invalid export configuration")?;

        // 1. Validate input file
        let validated = InputValidator::new()
            .validate(&self.config.input_path)
            .context("Input validation failed")?;

        // 2. Load applicant rows
        let inputs = ApplicantParser::parse(&self.config.input_path)
            .with_context(|| format!("Failed to load {:?}", self.config.input_path))?;
        let rows_read = inputs.len();

        // 3. Format every row
        info!("Processing rows...");
        let records = self.process_records(&inputs)?;

        // 4. Deduplicate and sort
        let (mut records, duplicates_dropped) = output::deduplicate_by_ssn(records);
        if duplicates_dropped > 0 {
            info!("Dropped {} duplicate SSN rows", duplicates_dropped);
        }
        output::sort_by_name(&mut records);

        // 5. Write
        let body = output::render(&records);
        let written = ExportWriter::write(&self.config.output_path, &body)?;
        info!(
            "Wrote {} lines to {:?}",
            records.len(),
            self.config.output_path
        );

        Ok(ExportSummary {
            run_id: self.run_id,
            input_path: validated.path,
            input_sha256: validated.hash_sha256,
            output_path: written.path,
            output_sha256: written.sha256,
            rows_read,
            duplicates_dropped,
            rows_written: records.len(),
            completed_at: Utc::now(),
        })
    }

    /// Format records in input order, stopping at the first bad row
    pub fn process_records(&self, inputs: &[InputRecord]) -> Result<Vec<NormalizedRecord>> {
        let records = inputs
            .iter()
            .enumerate()
            .map(|(idx, input)| {
                self.formatter.format(input).with_context(|| {
                    format!("Row {} ('{}') could not be formatted", idx + 1, input.full_name)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Formatted {} records", records.len());
        Ok(records)
    }
}
