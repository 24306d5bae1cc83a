//! Error type definitions.
//!
//! This module defines the error types and the rewrite event kinds used
//! throughout the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error opening the session store.
    #[error("Session store initialization error: {0}")]
    SessionStoreError(#[from] StorageError),
}

/// Error types for key-value storage operations.
///
/// Storage is best-effort: callers at the pipeline boundary log these and
/// carry on with an empty record.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage capability is disabled in this browsing context.
    #[error("storage is unavailable")]
    Unavailable,

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a flat JSON object of strings.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error types for document adapter operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// The link handle does not refer to an anchor of this document.
    #[error("no anchor with id {0}")]
    UnknownAnchor(usize),
}

/// Kinds of events counted while rewriting a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RewriteEvent {
    /// Application link received `iis`/`iisn`
    ApplicationTagged,
    /// Application link already carried both tracking keys
    ApplicationAlreadyTagged,
    /// Internal link received UTM parameters
    InternalForwarded,
    /// Internal link already carried `utm_source`
    InternalAlreadyTagged,
    /// A href could not be parsed and was rewritten by string concatenation
    FallbackConcatenation,
    /// A medium code was not in the label table
    UnknownMedium,
    /// Session storage read or write failed
    StorageFailure,
    /// A page had no actionable attribution
    PageSkipped,
}

impl std::fmt::Display for RewriteEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RewriteEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteEvent::ApplicationTagged => "Application links tagged",
            RewriteEvent::ApplicationAlreadyTagged => "Application links already tagged",
            RewriteEvent::InternalForwarded => "Internal links forwarded",
            RewriteEvent::InternalAlreadyTagged => "Internal links already tagged",
            RewriteEvent::FallbackConcatenation => "String concatenation fallbacks",
            RewriteEvent::UnknownMedium => "Unknown medium codes",
            RewriteEvent::StorageFailure => "Session storage failures",
            RewriteEvent::PageSkipped => "Pages without attribution",
        }
    }
}
