// ==============================================================================
// lib.rs - Background Check Export Library
// ==============================================================================
// Description: Library interface for the applicant fixed-width export
// Author: Matt Barham
// Created: 2025-11-03
// Modified: 2026-10-19
// Version: 2.0.0
// ==============================================================================

pub mod config;
pub mod formatter;
pub mod models;
pub mod normalizer;
pub mod output;
pub mod parsers;
pub mod processor;
pub mod validator;

pub use config::ExportConfig;
pub use processor::{ExportProcessor, ExportSummary};
