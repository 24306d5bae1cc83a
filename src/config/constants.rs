//! Configuration constants.
//!
//! Fixed names and limits shared by the attribution pipeline, the link
//! rewriter and the UI state machines.

use std::time::Duration;

/// Host of the external application-tracking system that receives `iis`/`iisn`.
pub const APPLICATION_DOMAIN: &str = "careerseng-teleperformance.icims.com";

/// Substring that marks any link into the application-tracking system.
/// Internal forwarding never touches these; the outbound pass owns them.
pub const APPLICATION_HOST_MARKER: &str = "icims.com";

/// Known third-party destinations that must never receive forwarded UTM parameters.
pub const EXTERNAL_DENYLIST: &[&str] = &[
    "line.me",
    "forms.office.com",
    "youtube.com",
    "vtour.cloud",
    "linkedin.com",
    "hallo.ai",
    "outlook.office.com",
];

// Query parameters read from the landing URL
pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CAMPAIGN: &str = "utm_campaign";
pub const UTM_CONTENT: &str = "utm_content";
pub const UTM_TERM: &str = "utm_term";

// Query parameters written to application links
/// Mapped medium label
pub const PARAM_IIS: &str = "iis";
/// Raw source
pub const PARAM_IISN: &str = "iisn";

// Session-scoped storage keys
pub const SESSION_KEY_SOURCE: &str = "mlp_utm_source";
pub const SESSION_KEY_MEDIUM: &str = "mlp_utm_medium";
pub const SESSION_KEY_CAMPAIGN: &str = "mlp_utm_campaign";
pub const SESSION_KEY_CONTENT: &str = "mlp_utm_content";
pub const SESSION_KEY_TERM: &str = "mlp_utm_term";

/// Local persistent storage key for the language mode.
pub const LANGUAGE_STORAGE_KEY: &str = "mlpLang";

/// Analytics category attached to the arrival event.
pub const ARRIVAL_EVENT_CATEGORY: &str = "MLP_Tracking";

/// How long the mutation watcher stays subscribed after page load.
pub const WATCH_WINDOW: Duration = Duration::from_secs(10);

/// Maximum entry URL length accepted by the CLI driver.
pub const MAX_URL_LENGTH: usize = 2048;

/// Suffix appended to rewritten page file names when no output directory is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_UPDATED";

// Typewriter timings
pub const TYPE_DELAY: Duration = Duration::from_millis(80);
pub const HOLD_DELAY: Duration = Duration::from_millis(2000);
pub const DELETE_DELAY: Duration = Duration::from_millis(40);
pub const NEXT_TEXT_DELAY: Duration = Duration::from_millis(300);

// Counter animation
/// Counter target when `data-target` is missing, zero or not a number.
pub const DEFAULT_COUNTER_TARGET: u32 = 6;
pub const COUNTER_STEP_DELAY: Duration = Duration::from_millis(300);
/// Fraction of the counter that must be visible before it starts.
pub const COUNTER_VISIBILITY_THRESHOLD: f64 = 0.5;

// Scroll effects
/// Fraction of an element that must be visible before it animates in.
pub const REVEAL_VISIBILITY_THRESHOLD: f64 = 0.1;
/// Scroll position (px) past which the back-to-top button shows.
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
/// Fixed header height (px) subtracted from smooth-scroll targets.
pub const SMOOTH_SCROLL_OFFSET: f64 = 80.0;
