// ==============================================================================
// main.rs - Background Check Export Entry Point
// ==============================================================================
// Description: Converts the applicant CSV into the fixed-width DPS export
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-19
// Version: 2.0.0
// ==============================================================================

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bgcheck_export::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use bgcheck_export::models::{NameOverflow, DEFAULT_DPS_INFO};
use bgcheck_export::{ExportConfig, ExportProcessor};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OverflowArg {
    /// Abort the run
    Reject,
    /// Cut the name to 30 characters
    Truncate,
}

impl From<OverflowArg> for NameOverflow {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Reject => NameOverflow::Reject,
            OverflowArg::Truncate => NameOverflow::Truncate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Applicant CSV to read
    #[arg(short, long, env = "BGCHECK_INPUT", default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Fixed-width export to write
    #[arg(short, long, env = "BGCHECK_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Program code written into every record
    #[arg(long, env = "BGCHECK_DPS_INFO", default_value = DEFAULT_DPS_INFO)]
    dps_info: String,

    /// Handling of names longer than 30 characters
    #[arg(long, value_enum, default_value_t = OverflowArg::Reject)]
    name_overflow: OverflowArg,

    /// Keep name case as entered instead of upper-casing
    #[arg(long)]
    preserve_case: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bgcheck_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = ExportConfig {
        input_path: args.input,
        output_path: args.output,
        dps_info: args.dps_info,
        name_overflow: args.name_overflow.into(),
        uppercase_names: !args.preserve_case,
    };

    let processor = ExportProcessor::new(config);
    info!("Background check export starting (run {})", processor.run_id());

    match processor.process() {
        Ok(summary) => {
            info!(
                "Export complete: {} rows read, {} duplicates dropped, {} rows written",
                summary.rows_read, summary.duplicates_dropped, summary.rows_written
            );
            if args.summary_json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(())
        }
        Err(e) => {
            error!("Export failed: {:#}", e);
            Err(e)
        }
    }
}
