//! Application configuration and constants.
//!
//! This module provides:
//! - Fixed parameter names, storage keys and timings
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
