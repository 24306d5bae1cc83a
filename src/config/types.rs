//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::DEFAULT_OUTPUT_SUFFIX;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and library configuration.
///
/// Pages are processed in the order given. The first page is loaded at
/// `entry_url` (query string included); every following page is loaded at the
/// same location with its own file name and no query, so it has to recover the
/// campaign record from the session store.
///
/// # Examples
///
/// ```bash
/// # Tag a landing page and the pages it links to
/// utm_relay index.html open-jobs.html \
///     --entry-url "https://mlp.example.com/index.html?utm_source=WeChat&utm_medium=social"
///
/// # Share one session across invocations
/// utm_relay faq.html --entry-url https://mlp.example.com/faq.html --session-file .session.json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "utm_relay",
    about = "Propagates UTM campaign parameters into apply links and internal navigation."
)]
pub struct Config {
    /// HTML pages to rewrite, in navigation order
    #[arg(value_parser, required = true)]
    pub files: Vec<PathBuf>,

    /// URL the first page was opened at, including its query string
    #[arg(long)]
    pub entry_url: String,

    /// Directory for rewritten pages (default: next to the input with a suffix)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Suffix added to output file names when --out-dir is not set
    #[arg(long, default_value = DEFAULT_OUTPUT_SUFFIX)]
    pub suffix: String,

    /// JSON file holding session-scoped storage (default: in-memory for this run)
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Rewrite in memory and report, but do not write any page
    #[arg(long)]
    pub dry_run: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            entry_url: String::new(),
            out_dir: None,
            suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            session_file: None,
            dry_run: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
