//! Logger initialization.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it, so
/// `RUST_LOG=debug` works for quick debugging while `--log-level` keeps
/// explicit control.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already set.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug utm_relay index.html open-jobs.html
/// utm_relay index.html --log-level info --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // html5ever reports recoverable parse errors on most real-world pages
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("utm_relay", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "🔗",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init so a second initialization (tests, embedding) is an error, not a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }
}
