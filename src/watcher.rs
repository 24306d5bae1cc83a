//! Re-tagging application links inserted after initial load.
//!
//! Another script may inject a floating "Apply" button once the page is up.
//! The watcher runs the application-link pass immediately and again for
//! every batch of body mutations, until a fixed window after page load has
//! passed.

use std::time::{Duration, Instant};

use log::debug;

use crate::attribution::TrackingPair;
use crate::config::WATCH_WINDOW;
use crate::document::Document;
use crate::error_handling::RewriteStats;
use crate::links::apply_application_tracking;

/// Bounded-lifetime subscription to document mutations.
#[derive(Debug, Clone)]
pub struct MutationWatcher {
    pair: TrackingPair,
    deadline: Instant,
    subscribed: bool,
    passes: usize,
    updated: usize,
}

impl MutationWatcher {
    /// Tags the current page and subscribes if the document can report
    /// mutations. The subscription ends [`WATCH_WINDOW`] after `loaded_at`.
    pub fn watch<D: Document + ?Sized>(
        doc: &mut D,
        pair: TrackingPair,
        loaded_at: Instant,
        stats: &RewriteStats,
    ) -> Self {
        Self::watch_for(doc, pair, loaded_at, WATCH_WINDOW, stats)
    }

    /// Like [`MutationWatcher::watch`] with a custom window.
    pub fn watch_for<D: Document + ?Sized>(
        doc: &mut D,
        pair: TrackingPair,
        loaded_at: Instant,
        window: Duration,
        stats: &RewriteStats,
    ) -> Self {
        let updated = apply_application_tracking(doc, &pair, stats);
        let subscribed = doc.supports_mutation_observation();
        if !subscribed {
            debug!("Mutation observation unavailable, apply links tagged once");
        }
        Self {
            pair,
            deadline: loaded_at + window,
            subscribed,
            passes: 1,
            updated,
        }
    }

    /// Handles one batch of additions/removals observed at `at`.
    ///
    /// Returns the number of links changed by this pass. The first batch at
    /// or after the deadline disconnects instead of running.
    pub fn on_mutations<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        at: Instant,
        stats: &RewriteStats,
    ) -> usize {
        if !self.subscribed {
            return 0;
        }
        if self.disconnect_if_expired(at) {
            return 0;
        }
        let updated = apply_application_tracking(doc, &self.pair, stats);
        self.passes += 1;
        self.updated += updated;
        updated
    }

    /// Drops the subscription once the window has closed. Returns `true`
    /// when the watcher is (now) disconnected.
    pub fn disconnect_if_expired(&mut self, at: Instant) -> bool {
        if self.subscribed && at >= self.deadline {
            debug!(
                "Mutation watcher disconnected after {} pass(es), {} link(s) updated",
                self.passes, self.updated
            );
            self.subscribed = false;
        }
        !self.subscribed
    }

    /// Whether the subscription is live at `at`. It lapses at the deadline
    /// even if no batch arrives to disconnect it.
    pub fn is_subscribed(&self, at: Instant) -> bool {
        self.subscribed && at < self.deadline
    }

    /// Full passes run so far, the initial one included.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Links changed across all passes.
    pub fn updated(&self) -> usize {
        self.updated
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlPage;

    const APPLY: &str = "https://careerseng-teleperformance.icims.com/jobs/search";

    fn pair() -> TrackingPair {
        TrackingPair {
            iis: "Social Media".into(),
            iisn: "WeChat".into(),
        }
    }

    fn page() -> HtmlPage {
        HtmlPage::parse(format!(
            r#"<html><body><a href="{}">Apply</a></body></html>"#,
            APPLY
        ))
        .with_mutation_observation(true)
    }

    #[test]
    fn test_watch_tags_existing_links_immediately() {
        let stats = RewriteStats::new();
        let mut doc = page();
        let watcher = MutationWatcher::watch(&mut doc, pair(), Instant::now(), &stats);
        assert_eq!(watcher.passes(), 1);
        assert_eq!(watcher.updated(), 1);
        assert_eq!(
            doc.href(0),
            Some("https://careerseng-teleperformance.icims.com/jobs/search?iis=Social+Media&iisn=WeChat")
        );
    }

    #[test]
    fn test_injected_link_is_tagged_within_window() {
        let stats = RewriteStats::new();
        let loaded = Instant::now();
        let mut doc = page();
        let mut watcher = MutationWatcher::watch(&mut doc, pair(), loaded, &stats);

        let id = doc.inject_anchor(APPLY);
        let updated = watcher.on_mutations(&mut doc, loaded + Duration::from_secs(3), &stats);
        assert_eq!(updated, 1);
        assert!(doc.href(id).unwrap().ends_with("?iis=Social+Media&iisn=WeChat"));
        assert_eq!(watcher.passes(), 2);
        assert!(watcher.is_subscribed(loaded + Duration::from_secs(3)));
    }

    #[test]
    fn test_repeated_batches_do_not_double_tag() {
        let stats = RewriteStats::new();
        let loaded = Instant::now();
        let mut doc = page();
        let mut watcher = MutationWatcher::watch(&mut doc, pair(), loaded, &stats);
        let before = doc.href(0).map(str::to_string);
        for secs in 1..5 {
            assert_eq!(
                watcher.on_mutations(&mut doc, loaded + Duration::from_secs(secs), &stats),
                0
            );
        }
        assert_eq!(doc.href(0).map(str::to_string), before);
    }

    #[test]
    fn test_disconnects_after_window() {
        let stats = RewriteStats::new();
        let loaded = Instant::now();
        let mut doc = page();
        let mut watcher = MutationWatcher::watch(&mut doc, pair(), loaded, &stats);
        assert_eq!(watcher.deadline(), loaded + WATCH_WINDOW);

        let id = doc.inject_anchor(APPLY);
        let updated = watcher.on_mutations(&mut doc, loaded + WATCH_WINDOW, &stats);
        assert_eq!(updated, 0);
        assert!(!watcher.is_subscribed(loaded + Duration::from_secs(1)));
        assert_eq!(doc.href(id), Some(APPLY));
        // Stays disconnected
        assert_eq!(
            watcher.on_mutations(&mut doc, loaded + Duration::from_secs(1), &stats),
            0
        );
    }

    #[test]
    fn test_no_subscription_without_observation_support() {
        let stats = RewriteStats::new();
        let loaded = Instant::now();
        let mut doc = page().with_mutation_observation(false);
        let mut watcher = MutationWatcher::watch(&mut doc, pair(), loaded, &stats);
        assert!(!watcher.is_subscribed(loaded));
        doc.inject_anchor(APPLY);
        assert_eq!(
            watcher.on_mutations(&mut doc, loaded + Duration::from_secs(1), &stats),
            0
        );
        assert_eq!(watcher.passes(), 1);
    }

    #[test]
    fn test_subscription_lapses_without_batches() {
        let stats = RewriteStats::new();
        let loaded = Instant::now();
        let mut doc = page();
        let watcher = MutationWatcher::watch(&mut doc, pair(), loaded, &stats);
        assert!(watcher.is_subscribed(loaded + Duration::from_secs(1)));
        assert!(!watcher.is_subscribed(loaded + WATCH_WINDOW));
        assert!(!watcher.is_subscribed(loaded + WATCH_WINDOW * 6));
    }

    #[test]
    fn test_custom_window() {
        let stats = RewriteStats::new();
        let loaded = Instant::now();
        let mut doc = page();
        let mut watcher =
            MutationWatcher::watch_for(&mut doc, pair(), loaded, Duration::from_millis(500), &stats);
        assert!(!watcher.disconnect_if_expired(loaded + Duration::from_millis(499)));
        assert!(watcher.disconnect_if_expired(loaded + Duration::from_millis(500)));
    }
}
