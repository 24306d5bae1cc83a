//! Entry URL validation and per-page URLs.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes the URL the first page is loaded at.
///
/// Adds `https://` when no scheme is given, then requires an `http`,
/// `https` or `file` URL no longer than [`MAX_URL_LENGTH`]. Logs a warning
/// and returns `None` otherwise.
pub fn validate_and_normalize_url(url: &str) -> Option<Url> {
    let url = url.trim();
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting entry URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting normalized entry URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match Url::parse(&normalized) {
        Ok(parsed) => {
            let supported = match parsed.scheme() {
                "http" | "https" => parsed.host_str().is_some(),
                "file" => true,
                _ => false,
            };
            if supported {
                Some(parsed)
            } else {
                warn!("Rejecting entry URL with unsupported scheme: {url}");
                None
            }
        }
        Err(e) => {
            warn!("Rejecting invalid entry URL {url}: {e}");
            None
        }
    }
}

/// URL a later page is loaded at: `file_name` in the entry page's
/// directory, without query or fragment.
pub fn page_url_for(entry: &Url, file_name: &str) -> Result<Url, url::ParseError> {
    let mut url = entry.join(file_name)?;
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
