// ==============================================================================
// validator.rs - Input File Validation
// ==============================================================================
// Description: Pre-flight checks on the applicant CSV (size, type, digest)
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-19
// Version: 2.0.0
// Security: Allowlist-only file types, digest recorded for every run
// ==============================================================================

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024; // 50 MB
const ALLOWED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

#[derive(Debug)]
pub struct ValidatedInput {
    pub path: PathBuf,
    pub size: u64,
    pub hash_sha256: String,
    pub validated_at: chrono::DateTime<chrono::Utc>,
}

pub struct InputValidator {
    max_file_size: u64,
}

impl InputValidator {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn validate(&self, path: &Path) -> Result<ValidatedInput> {
        info!("Validating input file: {:?}", path);

        // 1. Exists and is a regular file
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Input file not found: {:?}", path))?;
        if !metadata.is_file() {
            anyhow::bail!("Input path is not a file: {:?}", path);
        }

        // 2. Size check
        let size = metadata.len();
        if size == 0 {
            anyhow::bail!("Input file is empty: {:?}", path);
        }
        if size > self.max_file_size {
            anyhow::bail!(
                "File too large: {} bytes (max: {} bytes)",
                size,
                self.max_file_size
            );
        }
        debug!("Size check passed: {} bytes", size);

        // 3. Extension check (allowlist)
        let ext = self.get_extension(path)?;
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            anyhow::bail!("Invalid file type: {}", ext);
        }
        debug!("Extension check passed: {}", ext);

        // 4. Compute SHA-256 hash
        let hash = self.compute_sha256(path)?;
        debug!("SHA-256: {}", hash);

        Ok(ValidatedInput {
            path: path.to_path_buf(),
            size,
            hash_sha256: hash,
            validated_at: chrono::Utc::now(),
        })
    }

    fn get_extension(&self, path: &Path) -> Result<String> {
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("No file extension found"))
    }

    fn compute_sha256(&self, path: &Path) -> Result<String> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; 8192];

        loop {
            let n = file.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}
