//! Analytics event sink.
//!
//! The analytics platform is an opaque, possibly absent collaborator. Events
//! are fire-and-forget: sinks never report failure back to the caller.

use serde::Serialize;

use crate::ui::LanguageMode;

/// Events sent to the analytics platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SiteEvent {
    /// The visitor picked a language mode.
    LanguageSwitch { language_version: LanguageMode },
    /// The visitor arrived with (or carried over) campaign attribution.
    UtmArrival {
        event_category: String,
        utm_source: String,
        utm_medium: String,
        utm_campaign: String,
        page_title: String,
    },
}

impl SiteEvent {
    /// Event name as the analytics platform knows it.
    pub fn name(&self) -> &'static str {
        match self {
            SiteEvent::LanguageSwitch { .. } => "language_switch",
            SiteEvent::UtmArrival { .. } => "utm_arrival",
        }
    }
}

/// Receiver of [`SiteEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: SiteEvent);
}

/// Analytics not loaded; every event is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: SiteEvent) {}
}

/// Writes each event as one JSON line to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: SiteEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => log::info!("analytics event {}", json),
            Err(e) => log::debug!("Dropping analytics event {}: {}", event.name(), e),
        }
    }
}

/// Keeps every event, for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<SiteEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: SiteEvent) {
        self.events.push(event);
    }
}
