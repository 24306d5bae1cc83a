//! Attribution pipeline, run once per page load.
//!
//! ```text
//! Start -> FreshCapture | Recovered -> Mapped -> Rewriting -> Done
//!                                             \-> Skipped
//! ```
//!
//! Storage failures are collapsed here: a failed save is ignored and a
//! failed load counts as "nothing stored".

use std::time::Instant;

use log::{debug, info};
use url::Url;

use crate::attribution::{known_medium_label, AttributionRecord, TrackingPair};
use crate::config::ARRIVAL_EVENT_CATEGORY;
use crate::document::{Document, ReadyState};
use crate::error_handling::{RewriteEvent, RewriteStats};
use crate::events::{EventSink, SiteEvent};
use crate::links::forward_to_internal_links;
use crate::storage::{AttributionStore, KeyValueStore};
use crate::watcher::MutationWatcher;

/// States visited by one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    FreshCapture,
    Recovered,
    Mapped,
    Rewriting,
    Skipped,
    Done,
}

/// Where the page's record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrigin {
    /// The page URL carried a source or medium.
    Fresh,
    /// Recovered from session storage.
    Recovered,
    /// Neither the URL nor the session had attribution.
    Empty,
}

/// Result of one page's run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub record: AttributionRecord,
    pub origin: RecordOrigin,
    pub tracking: Option<TrackingPair>,
    /// Every state entered, in order
    pub trace: Vec<PipelineState>,
    /// Application links changed by the initial pass
    pub outbound_updated: usize,
    /// Internal links changed
    pub internal_updated: usize,
    /// Live watcher for later mutations; `None` when the page was skipped
    pub watcher: Option<MutationWatcher>,
    pub stats: RewriteStats,
}

impl PipelineOutcome {
    pub fn final_state(&self) -> PipelineState {
        self.trace.last().copied().unwrap_or(PipelineState::Start)
    }

    /// Whether any link rewriting was attempted.
    pub fn is_rewritten(&self) -> bool {
        self.trace.contains(&PipelineState::Rewriting)
    }
}

/// Capture, persist or recover, map, rewrite and report for one page.
pub struct AttributionPipeline<'a, S> {
    store: &'a mut AttributionStore<S>,
    sink: &'a mut dyn EventSink,
    ran: bool,
}

impl<'a, S: KeyValueStore> AttributionPipeline<'a, S> {
    pub fn new(store: &'a mut AttributionStore<S>, sink: &'a mut dyn EventSink) -> Self {
        Self {
            store,
            sink,
            ran: false,
        }
    }

    /// Runs the pipeline the first time it is told the markup is parsed.
    ///
    /// Returns `None` while the document is still loading and on every call
    /// after the run has happened.
    pub fn on_ready_state<D: Document + ?Sized>(
        &mut self,
        state: ReadyState,
        page_url: &Url,
        doc: &mut D,
        loaded_at: Instant,
    ) -> Option<PipelineOutcome> {
        if self.ran || !state.is_parsed() {
            return None;
        }
        Some(self.run(page_url, doc, loaded_at))
    }

    /// Runs the pipeline unconditionally.
    pub fn run<D: Document + ?Sized>(
        &mut self,
        page_url: &Url,
        doc: &mut D,
        loaded_at: Instant,
    ) -> PipelineOutcome {
        self.ran = true;
        let stats = RewriteStats::new();
        let mut trace = vec![PipelineState::Start];

        let (record, origin) = self.capture_or_recover(page_url, &mut trace, &stats);

        if !record.medium.is_empty() && known_medium_label(&record.medium).is_none() {
            stats.increment(RewriteEvent::UnknownMedium);
        }
        let tracking = TrackingPair::from_record(&record);
        trace.push(PipelineState::Mapped);

        let Some(pair) = tracking.clone() else {
            info!("No UTM parameters detected, apply links unchanged");
            stats.increment(RewriteEvent::PageSkipped);
            trace.push(PipelineState::Skipped);
            return PipelineOutcome {
                record,
                origin,
                tracking,
                trace,
                outbound_updated: 0,
                internal_updated: 0,
                watcher: None,
                stats,
            };
        };

        trace.push(PipelineState::Rewriting);
        let watcher = MutationWatcher::watch(doc, pair, loaded_at, &stats);
        let outbound_updated = watcher.updated();
        let internal_updated = forward_to_internal_links(doc, &record, page_url, &stats);

        self.sink.emit(SiteEvent::UtmArrival {
            event_category: ARRIVAL_EVENT_CATEGORY.to_string(),
            utm_source: record.source.clone(),
            utm_medium: record.medium.clone(),
            utm_campaign: record.campaign.clone(),
            page_title: doc.title(),
        });
        trace.push(PipelineState::Done);

        PipelineOutcome {
            record,
            origin,
            tracking,
            trace,
            outbound_updated,
            internal_updated,
            watcher: Some(watcher),
            stats,
        }
    }

    fn capture_or_recover(
        &mut self,
        page_url: &Url,
        trace: &mut Vec<PipelineState>,
        stats: &RewriteStats,
    ) -> (AttributionRecord, RecordOrigin) {
        let fresh = AttributionRecord::from_url(page_url);
        if fresh.is_actionable() {
            trace.push(PipelineState::FreshCapture);
            if let Err(e) = self.store.save(&fresh) {
                debug!("Session storage unavailable, UTM not persisted: {}", e);
                stats.increment(RewriteEvent::StorageFailure);
            }
            info!("Captured from URL: {:?}", fresh);
            return (fresh, RecordOrigin::Fresh);
        }

        trace.push(PipelineState::Recovered);
        match self.store.load() {
            Ok(record) if record.is_actionable() => {
                info!("Recovered from session: {:?}", record);
                (record, RecordOrigin::Recovered)
            }
            Ok(record) => (record, RecordOrigin::Empty),
            Err(e) => {
                debug!("Session storage unavailable, nothing recovered: {}", e);
                stats.increment(RewriteEvent::StorageFailure);
                (AttributionRecord::default(), RecordOrigin::Empty)
            }
        }
    }
}
