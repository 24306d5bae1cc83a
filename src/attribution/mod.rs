//! Campaign attribution records.
//!
//! This module holds the one entity of the pipeline, the campaign attribution
//! record, along with:
//! - The medium mapper (`utm_medium` code to `iis` label)
//! - The URL query reader (landing URL to record)
//! - The derived tracking pair written to application links

mod medium;
mod query;

use serde::{Deserialize, Serialize};

pub use medium::{known_medium_label, map_medium, MEDIUM_LABELS};
pub use query::read_query;

/// Campaign parameters captured for one page load.
///
/// Empty strings mean "absent". Once built for a page the record is not
/// modified again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRecord {
    /// Free-text origin label, e.g. a channel name (`utm_source`)
    pub source: String,
    /// Medium code from the label table, or free text (`utm_medium`)
    pub medium: String,
    /// Carried unchanged (`utm_campaign`)
    pub campaign: String,
    /// Carried unchanged (`utm_content`)
    pub content: String,
    /// Carried unchanged (`utm_term`)
    pub term: String,
}

impl AttributionRecord {
    /// A record only drives rewriting when it names a source or a medium.
    pub fn is_actionable(&self) -> bool {
        !self.source.is_empty() || !self.medium.is_empty()
    }

    /// Fields paired with their `utm_*` query parameter names, in forwarding order.
    pub fn utm_pairs(&self) -> [(&'static str, &str); 5] {
        use crate::config::{UTM_CAMPAIGN, UTM_CONTENT, UTM_MEDIUM, UTM_SOURCE, UTM_TERM};
        [
            (UTM_SOURCE, self.source.as_str()),
            (UTM_MEDIUM, self.medium.as_str()),
            (UTM_CAMPAIGN, self.campaign.as_str()),
            (UTM_CONTENT, self.content.as_str()),
            (UTM_TERM, self.term.as_str()),
        ]
    }
}

/// Values written to application links: `iis` (medium label) and `iisn` (source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingPair {
    pub iis: String,
    pub iisn: String,
}

impl TrackingPair {
    /// Derives the pair from a record, or `None` when the record carries no
    /// actionable attribution.
    pub fn from_record(record: &AttributionRecord) -> Option<Self> {
        if !record.is_actionable() {
            return None;
        }
        let pair = TrackingPair {
            iis: map_medium(&record.medium).into_owned(),
            iisn: record.source.clone(),
        };
        if pair.iis.is_empty() && pair.iisn.is_empty() {
            return None;
        }
        Some(pair)
    }
}
