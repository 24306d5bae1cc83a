//! Tests for command-line parsing.

use clap::Parser;
use std::path::PathBuf;
use utm_relay::config::{LogFormat, LogLevel};
use utm_relay::Config;

#[test]
fn test_minimal_arguments() {
    let config = Config::try_parse_from([
        "utm_relay",
        "index.html",
        "--entry-url",
        "https://mlp.example.com/?utm_source=WeChat",
    ])
    .unwrap();
    assert_eq!(config.files, vec![PathBuf::from("index.html")]);
    assert_eq!(config.suffix, "_UPDATED");
    assert!(!config.dry_run);
    assert!(config.out_dir.is_none());
    assert!(matches!(config.log_level, LogLevel::Info));
    assert!(matches!(config.log_format, LogFormat::Plain));
}

#[test]
fn test_all_arguments() {
    let config = Config::try_parse_from([
        "utm_relay",
        "index.html",
        "open-jobs.html",
        "--entry-url",
        "https://mlp.example.com/",
        "--out-dir",
        "dist",
        "--suffix",
        "_tagged",
        "--session-file",
        "session.json",
        "--dry-run",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .unwrap();
    assert_eq!(config.files.len(), 2);
    assert_eq!(config.out_dir, Some(PathBuf::from("dist")));
    assert_eq!(config.suffix, "_tagged");
    assert_eq!(config.session_file, Some(PathBuf::from("session.json")));
    assert!(config.dry_run);
    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
}

#[test]
fn test_files_are_required() {
    assert!(Config::try_parse_from(["utm_relay", "--entry-url", "https://mlp.example.com/"]).is_err());
}

#[test]
fn test_entry_url_is_required() {
    assert!(Config::try_parse_from(["utm_relay", "index.html"]).is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Config::try_parse_from([
        "utm_relay",
        "index.html",
        "--entry-url",
        "https://mlp.example.com/",
        "--log-level",
        "loud",
    ])
    .is_err());
}
