//! Application link tagging (`iis`/`iisn`).

use log::{debug, info, warn};
use url::Url;

use super::{raw_query_keys, replace_query_text, set_query_params, LinkAction};
use crate::attribution::TrackingPair;
use crate::config::{APPLICATION_DOMAIN, PARAM_IIS, PARAM_IISN};
use crate::document::Document;
use crate::error_handling::{RewriteEvent, RewriteStats};

/// Whether a href points at the applicant-tracking host.
///
/// Parseable URLs must have exactly that host; anything else is matched by
/// substring, the same way a `a[href*=...]` selector would.
pub fn is_application_link(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => url
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(APPLICATION_DOMAIN)),
        Err(_) => href.contains(APPLICATION_DOMAIN),
    }
}

/// Whether a href already carries both `iis` and `iisn`.
pub fn has_application_tracking(href: &str) -> bool {
    let keys: Vec<String> = match Url::parse(href) {
        Ok(url) => url.query_pairs().map(|(k, _)| k.into_owned()).collect(),
        Err(_) => raw_query_keys(href),
    };
    keys.iter().any(|k| k == PARAM_IIS) && keys.iter().any(|k| k == PARAM_IISN)
}

/// Decides the new href for one application link.
///
/// Existing `iis`/`iisn` values are replaced, whether or not the href
/// parses as a URL.
pub fn tag_application_href(href: &str, pair: &TrackingPair) -> LinkAction {
    if !is_application_link(href) {
        return LinkAction::Ignore;
    }
    if has_application_tracking(href) {
        return LinkAction::AlreadyTagged;
    }

    let params: Vec<(&str, &str)> = [(PARAM_IIS, pair.iis.as_str()), (PARAM_IISN, pair.iisn.as_str())]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect();
    if params.is_empty() {
        return LinkAction::Ignore;
    }

    match Url::parse(href) {
        Ok(mut url) => {
            set_query_params(&mut url, &params);
            LinkAction::Rewrite {
                href: url.to_string(),
                fallback: false,
            }
        }
        Err(e) => {
            debug!("Apply link {} is not a URL ({}), editing its query as text", href, e);
            LinkAction::Rewrite {
                href: replace_query_text(href, &params),
                fallback: true,
            }
        }
    }
}

/// Tags every application link on the page once.
///
/// Returns the number of links whose href changed.
pub fn apply_application_tracking<D: Document + ?Sized>(
    doc: &mut D,
    pair: &TrackingPair,
    stats: &RewriteStats,
) -> usize {
    let mut updated = 0;
    for anchor in doc.anchors() {
        match tag_application_href(&anchor.href, pair) {
            LinkAction::Rewrite { href, fallback } => {
                if href == anchor.href {
                    continue;
                }
                if let Err(e) = doc.set_href(anchor.id, href) {
                    warn!("Could not update apply link {}: {}", anchor.href, e);
                    continue;
                }
                if fallback {
                    stats.increment(RewriteEvent::FallbackConcatenation);
                }
                stats.increment(RewriteEvent::ApplicationTagged);
                updated += 1;
            }
            LinkAction::AlreadyTagged => stats.increment(RewriteEvent::ApplicationAlreadyTagged),
            LinkAction::Ignore => {}
        }
    }

    if updated > 0 {
        info!(
            "Updated {} apply link(s) with iis=\"{}\" iisn=\"{}\"",
            updated, pair.iis, pair.iisn
        );
    }
    updated
}
