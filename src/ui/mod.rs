//! Page micro-interactions.
//!
//! Each widget is a small state machine. The embedding runtime feeds it
//! clicks, scroll positions, visibility ratios and timer expiries, and reads
//! back what to display. Widgets whose element is missing from the page are
//! simply never constructed.

mod counter;
mod language;
mod navigation;
mod site;
mod typewriter;

pub use counter::{parse_int_prefix, CounterAnimation};
pub use language::{LanguageController, ModeCallback, EXPAT_BODY_CLASS};
pub use navigation::{smooth_scroll_top, BackToTop, FaqAccordion, MobileMenu, RevealTracker};
pub use site::{ClickTarget, PageFeatures, SiteController};
pub use typewriter::{Typewriter, TypewriterSource};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Content variant shown to the visitor.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LanguageMode {
    /// Local Chinese-Malaysian audience
    #[default]
    Local,
    /// Expatriate audience from mainland China
    Expat,
}

impl LanguageMode {
    /// Label of the language dropdown's current-selection element.
    pub fn label(self) -> &'static str {
        match self {
            LanguageMode::Local => "🇲🇾 本地华人版",
            LanguageMode::Expat => "🇨🇳 中国外派版",
        }
    }

    /// Any stored or requested value other than `expat` means local.
    pub fn from_stored(value: &str) -> Self {
        if value == "expat" {
            LanguageMode::Expat
        } else {
            LanguageMode::Local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_mode_strings() {
        assert_eq!(LanguageMode::Expat.to_string(), "expat");
        assert_eq!(LanguageMode::from_str("local").unwrap(), LanguageMode::Local);
        assert!(LanguageMode::from_str("fr").is_err());
        assert_eq!(LanguageMode::iter().count(), 2);
    }

    #[test]
    fn test_from_stored_defaults_to_local() {
        assert_eq!(LanguageMode::from_stored("expat"), LanguageMode::Expat);
        assert_eq!(LanguageMode::from_stored("EXPAT"), LanguageMode::Local);
        assert_eq!(LanguageMode::from_stored(""), LanguageMode::Local);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LanguageMode::Expat.label(), "🇨🇳 中国外派版");
        assert_eq!(LanguageMode::Local.label(), "🇲🇾 本地华人版");
    }
}
