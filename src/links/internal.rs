//! Forwarding campaign parameters to internal navigation links.

use log::{debug, info, warn};
use url::Url;

use super::{append_query_text, set_query_params, LinkAction};
use crate::attribution::AttributionRecord;
use crate::config::{APPLICATION_HOST_MARKER, EXTERNAL_DENYLIST, UTM_SOURCE};
use crate::document::Document;
use crate::error_handling::{RewriteEvent, RewriteStats};

const PAGE_EXTENSION: &str = ".html";
const SKIPPED_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:"];

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Resolves a href against the page's origin (not its path).
///
/// Pages with an opaque origin, such as `file://`, cannot resolve anything.
fn resolve_against_origin(href: &str, page_url: &Url) -> Option<Url> {
    let origin = page_url.origin();
    if !origin.is_tuple() {
        return None;
    }
    let base = Url::parse(&origin.ascii_serialization()).ok()?;
    base.join(href).ok()
}

fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str().is_some()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

/// Classifies a href as a link to another page of this site.
///
/// Root-relative paths, `.html` pages (with or without a fragment) and
/// anything that resolves to the page's own host count as internal.
/// Extension-less relative links on a page without a host, e.g.
/// `open-jobs` under `file://`, are therefore treated as external.
pub fn is_internal_link(href: &str, page_url: &Url) -> bool {
    let root_relative = href.starts_with('/') && !href.starts_with("//");
    if root_relative
        || href.ends_with(PAGE_EXTENSION)
        || href.contains(&format!("{}#", PAGE_EXTENSION))
    {
        return true;
    }
    resolve_against_origin(href, page_url).is_some_and(|url| same_host(&url, page_url))
}

/// Keeps only the last path segment plus query and fragment.
fn collapse_to_relative(url: &Url) -> String {
    let file = url.path().rsplit('/').next().unwrap_or("");
    let query = url
        .query()
        .filter(|q| !q.is_empty())
        .map(|q| format!("?{}", q))
        .unwrap_or_default();
    let fragment = url
        .fragment()
        .filter(|f| !f.is_empty())
        .map(|f| format!("#{}", f))
        .unwrap_or_default();
    format!("{}{}{}", file, query, fragment)
}

/// Decides the new href for one navigation link.
pub fn forward_internal_href(href: &str, record: &AttributionRecord, page_url: &Url) -> LinkAction {
    if !record.is_actionable() || href.is_empty() || href.starts_with('#') {
        return LinkAction::Ignore;
    }
    if SKIPPED_SCHEMES
        .iter()
        .any(|scheme| starts_with_ignore_case(href, scheme))
    {
        return LinkAction::Ignore;
    }
    if href.contains(APPLICATION_HOST_MARKER)
        || EXTERNAL_DENYLIST.iter().any(|domain| href.contains(domain))
    {
        return LinkAction::Ignore;
    }
    if !is_internal_link(href, page_url) {
        return LinkAction::Ignore;
    }
    if href.contains(&format!("{}=", UTM_SOURCE)) {
        return LinkAction::AlreadyTagged;
    }

    let params: Vec<(&str, &str)> = record
        .utm_pairs()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect();

    match resolve_against_origin(href, page_url) {
        Some(mut url) => {
            set_query_params(&mut url, &params);
            let rewritten = if starts_with_ignore_case(href, "http") {
                url.to_string()
            } else {
                collapse_to_relative(&url)
            };
            LinkAction::Rewrite {
                href: rewritten,
                fallback: false,
            }
        }
        None => {
            debug!("Internal link {} could not be resolved, appending as text", href);
            // Only the three primary fields travel on the text path
            let fields = record.utm_pairs();
            LinkAction::Rewrite {
                href: append_query_text(href, &fields[..3]),
                fallback: true,
            }
        }
    }
}

/// Forwards the record to every internal link on the page once.
///
/// Returns the number of links whose href changed.
pub fn forward_to_internal_links<D: Document + ?Sized>(
    doc: &mut D,
    record: &AttributionRecord,
    page_url: &Url,
    stats: &RewriteStats,
) -> usize {
    if !record.is_actionable() {
        return 0;
    }

    let mut updated = 0;
    for anchor in doc.anchors() {
        match forward_internal_href(&anchor.href, record, page_url) {
            LinkAction::Rewrite { href, fallback } => {
                if href == anchor.href {
                    continue;
                }
                if let Err(e) = doc.set_href(anchor.id, href) {
                    warn!("Could not update internal link {}: {}", anchor.href, e);
                    continue;
                }
                if fallback {
                    stats.increment(RewriteEvent::FallbackConcatenation);
                }
                stats.increment(RewriteEvent::InternalForwarded);
                updated += 1;
            }
            LinkAction::AlreadyTagged => stats.increment(RewriteEvent::InternalAlreadyTagged),
            LinkAction::Ignore => {}
        }
    }

    if updated > 0 {
        info!("Forwarded UTM parameters to {} internal link(s)", updated);
    }
    updated
}
