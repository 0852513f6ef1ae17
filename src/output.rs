// ==============================================================================
// output.rs - Fixed-Width Export Output
// ==============================================================================
// Description: Deduplicates, sorts, serializes and writes export records
// Author: Matt Barham
// Created: 2025-11-06
// Modified: 2026-10-19
// Version: 3.0.0
// ==============================================================================
// Output contract:
//   - one 82-character record per line
//   - lines joined by "\n", no trailing newline, no header
//   - written atomically: a failed run never leaves a partial file behind
// ==============================================================================

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::models::NormalizedRecord;

/// Drop records whose SSN was already seen, keeping the first occurrence
///
/// # Returns
/// * Surviving records in input order, and the number dropped
pub fn deduplicate_by_ssn(records: Vec<NormalizedRecord>) -> (Vec<NormalizedRecord>, usize) {
    let mut seen = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());
    let mut dropped = 0;

    for record in records {
        if seen.insert(record.ssn.clone()) {
            kept.push(record);
        } else {
            debug!("Dropped duplicate SSN record: {}", record.name.trim_end());
            dropped += 1;
        }
    }

    (kept, dropped)
}

/// Sort ascending by the padded name field
///
/// Byte-wise comparison on the full 30-character field, so a name that is a
/// prefix of another sorts first (space < letters). Stable: equal names keep
/// input order.
pub fn sort_by_name(records: &mut [NormalizedRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Join records into the export body
pub fn render(records: &[NormalizedRecord]) -> String {
    records
        .iter()
        .map(NormalizedRecord::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of a completed export write
#[derive(Debug, Clone)]
pub struct WrittenExport {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

pub struct ExportWriter;

impl ExportWriter {
    /// Write the export body to `path`
    ///
    /// Content goes to a temporary file in the destination directory which is
    /// then renamed over `path`.
    pub fn write(path: &Path, body: &str) -> Result<WrittenExport> {
        info!("Writing processed data to {:?}", path);

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut temp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
        Self::write_to(&mut temp, body)?;
        temp.as_file()
            .sync_all()
            .context("Failed to sync export file")?;
        temp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write export file {:?}", path))?;

        let sha256 = format!("{:x}", Sha256::digest(body.as_bytes()));
        debug!("Export SHA-256: {}", sha256);

        Ok(WrittenExport {
            path: path.to_path_buf(),
            bytes: body.len(),
            sha256,
        })
    }

    /// Write the export body to any sink
    pub fn write_to<W: Write>(sink: &mut W, body: &str) -> Result<()> {
        sink.write_all(body.as_bytes())
            .context("Failed to write export data")?;
        sink.flush().context("Failed to flush export data")?;
        Ok(())
    }
}
