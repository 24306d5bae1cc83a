//! Utility functions.
//!
//! This module provides:
//! - CSS selector parsing for static selectors
//! - Regex compilation for static patterns

mod selector;

pub use selector::{compile_regex_unsafe, parse_selector_unsafe};
