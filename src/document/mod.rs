//! Document adapter.
//!
//! The link rewriter only sees a page through [`Document`]: a list of anchors
//! with their `href`, a way to replace one, and the page title. Element
//! lookups and markup patching stay behind this seam.

mod html;

pub use html::HtmlPage;

use crate::error_handling::DocumentError;

/// Loading phase of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Markup is still being parsed.
    Loading,
    /// Markup is parsed; sub-resources may still be loading.
    Interactive,
    /// Everything has loaded.
    Complete,
}

impl ReadyState {
    /// Whether initial markup parsing has finished.
    pub fn is_parsed(self) -> bool {
        !matches!(self, ReadyState::Loading)
    }
}

/// Stable handle of an anchor within one document.
pub type AnchorId = usize;

/// An `<a>` element that has an `href` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub id: AnchorId,
    pub href: String,
}

/// A mutable page as seen by the attribution pipeline.
pub trait Document {
    /// All anchors with an `href`, in document order.
    fn anchors(&self) -> Vec<Anchor>;

    /// Replaces the `href` of one anchor.
    fn set_href(&mut self, id: AnchorId, href: String) -> Result<(), DocumentError>;

    /// The page title, empty when there is none.
    fn title(&self) -> String;

    /// Whether the runtime can report later insertions into the body.
    fn supports_mutation_observation(&self) -> bool {
        false
    }
}
