//! Main application helpers.
//!
//! Entry URL validation, progress logging and statistics printing used by
//! the page driver and the binary.

pub mod logging;
pub mod statistics;
pub mod url;

pub use logging::log_progress;
pub use statistics::{print_rewrite_statistics, print_simple_summary};
pub use url::{page_url_for, validate_and_normalize_url};
