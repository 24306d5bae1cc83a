//! Link rewriting.
//!
//! Two independent passes over a page's anchors:
//! - Application links (the external applicant-tracking host) receive the
//!   derived `iis`/`iisn` pair.
//! - Internal navigation links receive the raw `utm_*` fields so the next
//!   page can capture them again.
//!
//! Both prefer structured URL manipulation with `url` and fall back to
//! string concatenation when a href cannot be parsed.

mod internal;
mod outbound;

pub use internal::{forward_internal_href, forward_to_internal_links, is_internal_link};
pub use outbound::{
    apply_application_tracking, has_application_tracking, is_application_link,
    tag_application_href,
};

use url::{form_urlencoded, Url};

/// What a rewrite rule decided for one href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Replace the href. `fallback` is set when string concatenation was used.
    Rewrite { href: String, fallback: bool },
    /// The link already carries the parameters this rule would add.
    AlreadyTagged,
    /// The rule does not apply to this link.
    Ignore,
}

impl LinkAction {
    /// The new href, if the link is to be rewritten.
    pub fn href(&self) -> Option<&str> {
        match self {
            LinkAction::Rewrite { href, .. } => Some(href),
            _ => None,
        }
    }
}

/// Sets query parameters with `URLSearchParams.set` semantics.
///
/// The first existing occurrence of a key is replaced in place, later
/// duplicates are dropped and keys not yet present are appended.
pub(crate) fn set_query_params(url: &mut Url, params: &[(&str, &str)]) {
    let existing: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut written = vec![false; params.len()];
    let mut merged: Vec<(String, String)> = Vec::with_capacity(existing.len() + params.len());

    for (key, value) in existing {
        match params.iter().position(|(k, _)| *k == key) {
            Some(i) if written[i] => continue,
            Some(i) => {
                written[i] = true;
                merged.push((key, params[i].1.to_string()));
            }
            None => merged.push((key, value)),
        }
    }
    for (i, (key, value)) in params.iter().enumerate() {
        if !written[i] {
            merged.push((key.to_string(), value.to_string()));
        }
    }

    url.query_pairs_mut().clear().extend_pairs(merged.iter());
}

/// Query keys present in a href that could not be parsed as a URL.
pub(crate) fn raw_query_keys(href: &str) -> Vec<String> {
    let without_fragment = href.split('#').next().unwrap_or("");
    match without_fragment.split_once('?') {
        Some((_, query)) => form_urlencoded::parse(query.as_bytes())
            .map(|(k, _)| k.into_owned())
            .collect(),
        None => Vec::new(),
    }
}

fn encode_pair((key, value): (&str, &str)) -> String {
    format!(
        "{}={}",
        key,
        form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>()
    )
}

fn split_fragment(href: &str) -> (&str, &str) {
    match href.find('#') {
        Some(i) => href.split_at(i),
        None => (href, ""),
    }
}

/// Appends parameters to a href by string concatenation.
///
/// `?` or `&` is chosen by whether the href already has a query, values are
/// form-encoded, keys the href already carries are left alone, and the
/// result keeps any `#fragment` at the end.
pub(crate) fn append_query_text(href: &str, params: &[(&str, &str)]) -> String {
    let present = raw_query_keys(href);
    let encoded: Vec<String> = params
        .iter()
        .filter(|(key, value)| !value.is_empty() && !present.iter().any(|p| p == key))
        .map(|param| encode_pair(*param))
        .collect();
    if encoded.is_empty() {
        return href.to_string();
    }

    let (base, fragment) = split_fragment(href);
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}{}", base, separator, encoded.join("&"), fragment)
}

/// Sets parameters on a href by editing its query text, the way
/// [`set_query_params`] does for parsed URLs.
///
/// The first pair with a given key takes the new value, later pairs with
/// that key are dropped, and missing keys are appended. Other pairs keep
/// their original text.
pub(crate) fn replace_query_text(href: &str, params: &[(&str, &str)]) -> String {
    let params: Vec<(&str, &str)> = params
        .iter()
        .copied()
        .filter(|(_, value)| !value.is_empty())
        .collect();
    let (base, fragment) = split_fragment(href);
    let Some((path, query)) = base.split_once('?') else {
        return append_query_text(href, &params);
    };

    let mut written = vec![false; params.len()];
    let mut pairs = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let key = form_urlencoded::parse(pair.as_bytes())
            .next()
            .map(|(k, _)| k.into_owned())
            .unwrap_or_default();
        match params.iter().position(|(k, _)| *k == key) {
            Some(i) if written[i] => {}
            Some(i) => {
                written[i] = true;
                pairs.push(encode_pair(params[i]));
            }
            None => pairs.push(pair.to_string()),
        }
    }
    for (i, param) in params.iter().enumerate() {
        if !written[i] {
            pairs.push(encode_pair(*param));
        }
    }
    format!("{}?{}{}", path, pairs.join("&"), fragment)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
