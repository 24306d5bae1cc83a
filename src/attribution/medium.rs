//! Medium code to attribution label mapping.

use std::borrow::Cow;

use log::warn;

/// Known `utm_medium` codes and the `iis` label each one maps to.
pub const MEDIUM_LABELS: &[(&str, &str)] = &[
    ("social", "Social Media"),
    ("career", "Career Fair"),
    ("digital", "Digital Ad"),
    ("mobile", "Mobile Stand"),
    ("university", "University"),
    ("poster", "Poster"),
    ("flyers", "Flyers"),
    ("physical", "Physical QR"),
    ("fotg", "FoTG"),
    ("banner1", "Banner 1"),
    ("banner2", "Banner 2"),
    ("email", "Email Blast"),
    ("public", "Public Stands"),
    ("grab", "Grab"),
    ("linkedin", "LinkedIn Recruiter"),
    ("broadcast", "Broadcast Comms"),
    ("wechat", "WeChat"),
    ("line", "LINE"),
    ("xiaohongshu", "Xiaohongshu"),
    ("xhs", "Xiaohongshu"),
    ("website", "MLP Website"),
    ("referral", "Referral"),
    ("qr", "QR Code"),
];

/// Looks up the label for a medium code, ignoring case.
pub fn known_medium_label(code: &str) -> Option<&'static str> {
    let lowered = code.to_lowercase();
    MEDIUM_LABELS
        .iter()
        .find(|(known, _)| *known == lowered)
        .map(|(_, label)| *label)
}

/// Maps a `utm_medium` code to the label sent as `iis`.
///
/// Unknown non-empty codes are passed through unchanged with a warning, and
/// an empty code maps to an empty label.
pub fn map_medium(code: &str) -> Cow<'_, str> {
    if code.is_empty() {
        return Cow::Borrowed("");
    }
    match known_medium_label(code) {
        Some(label) => Cow::Borrowed(label),
        None => {
            warn!("Unknown utm_medium \"{}\", using as-is", code);
            Cow::Borrowed(code)
        }
    }
}
