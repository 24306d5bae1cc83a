//! Application initialization.
//!
//! Sets up the shared resources of a run:
//! - The logger
//! - The session store holding the campaign record between pages

mod logger;
mod session;

pub use logger::init_logger_with;
pub use session::{init_session_store, SessionStore};
