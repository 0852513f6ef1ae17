// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for applicant intake file formats
// Author: Matt Barham
// Created: 2025-11-03
// Modified: 2026-10-19
// Version: 1.3.0
// ==============================================================================

pub mod applicants;

pub use applicants::{ApplicantParseError, ApplicantParser};
