//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `utm_relay` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use utm_relay::initialization::init_logger_with;
use utm_relay::{run_pages, Config};

fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let dry_run = config.dry_run;
    match run_pages(config) {
        Ok(report) => {
            println!(
                "✅ Processed {} page{} ({} link{} {}) in {:.1}s",
                report.pages.len(),
                if report.pages.len() == 1 { "" } else { "s" },
                report.modified_links,
                if report.modified_links == 1 { "" } else { "s" },
                if dry_run { "would be rewritten" } else { "rewritten" },
                report.elapsed_seconds
            );
            for page in report.pages.iter().filter_map(|p| p.output.as_ref()) {
                println!("Wrote {}", page.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("utm_relay error: {:#}", e);
            process::exit(1);
        }
    }
}
