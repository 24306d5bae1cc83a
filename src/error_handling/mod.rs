//! Error handling and rewrite statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, storage and document access
//! - Rewrite statistics keyed by [`RewriteEvent`]
//!
//! Nothing here is fatal to a page: storage and parse failures degrade to
//! "no attribution" or string concatenation and are only counted and logged.

mod stats;
mod types;

// Re-export public API
pub use stats::RewriteStats;
pub use types::{DocumentError, InitializationError, RewriteEvent, StorageError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rewrite_stats_initialization() {
        let stats = RewriteStats::new();
        for event in RewriteEvent::iter() {
            assert_eq!(stats.get(event), 0);
        }
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_rewrite_stats_increment_and_add() {
        let stats = RewriteStats::new();
        stats.increment(RewriteEvent::ApplicationTagged);
        stats.increment(RewriteEvent::ApplicationTagged);
        stats.add(RewriteEvent::InternalForwarded, 5);
        assert_eq!(stats.get(RewriteEvent::ApplicationTagged), 2);
        assert_eq!(stats.get(RewriteEvent::InternalForwarded), 5);
        assert_eq!(stats.get(RewriteEvent::PageSkipped), 0);
        assert_eq!(stats.total(), 7);
    }

    #[test]
    fn test_rewrite_stats_merge() {
        let total = RewriteStats::new();
        let page = RewriteStats::new();
        page.increment(RewriteEvent::FallbackConcatenation);
        page.add(RewriteEvent::InternalForwarded, 3);
        total.merge(&page);
        total.merge(&page);
        assert_eq!(total.get(RewriteEvent::FallbackConcatenation), 2);
        assert_eq!(total.get(RewriteEvent::InternalForwarded), 6);
    }

    #[test]
    fn test_rewrite_stats_debug_lists_every_event() {
        let stats = RewriteStats::new();
        let rendered = format!("{:?}", stats);
        for event in RewriteEvent::iter() {
            assert!(rendered.contains(&format!("{:?}", event)));
        }
    }
}
