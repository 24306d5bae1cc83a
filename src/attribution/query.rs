//! Reading campaign parameters from the landing URL.

use url::{form_urlencoded, Url};

use super::AttributionRecord;
use crate::config::{UTM_CAMPAIGN, UTM_CONTENT, UTM_MEDIUM, UTM_SOURCE, UTM_TERM};

impl AttributionRecord {
    /// Builds a record from the query string of a parsed page URL.
    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or(""))
    }

    /// Builds a record from a raw query string (without the leading `?`).
    ///
    /// The first occurrence of each parameter wins. Bad percent escapes are
    /// decoded lossily, so a malformed field never blanks its neighbours.
    pub fn from_query(query: &str) -> Self {
        let mut record = AttributionRecord::default();
        let mut seen = [false; 5];
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                UTM_SOURCE => 0,
                UTM_MEDIUM => 1,
                UTM_CAMPAIGN => 2,
                UTM_CONTENT => 3,
                UTM_TERM => 4,
                _ => continue,
            };
            if seen[slot] {
                continue;
            }
            seen[slot] = true;
            let field = match slot {
                0 => &mut record.source,
                1 => &mut record.medium,
                2 => &mut record.campaign,
                3 => &mut record.content,
                _ => &mut record.term,
            };
            *field = value.into_owned();
        }
        record
    }
}

/// Reads the five `utm_*` parameters from a page URL.
///
/// Never fails: when the URL itself does not parse, the text between `?` and
/// `#` is still decoded as a query string.
pub fn read_query(page_url: &str) -> AttributionRecord {
    match Url::parse(page_url) {
        Ok(url) => AttributionRecord::from_url(&url),
        Err(e) => {
            log::debug!("Reading query from unparseable URL {}: {}", page_url, e);
            let without_fragment = page_url.split('#').next().unwrap_or("");
            match without_fragment.split_once('?') {
                Some((_, query)) => AttributionRecord::from_query(query),
                None => AttributionRecord::default(),
            }
        }
    }
}
