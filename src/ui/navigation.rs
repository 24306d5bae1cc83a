//! Navigation widgets and scroll effects.

use crate::config::{BACK_TO_TOP_THRESHOLD, REVEAL_VISIBILITY_THRESHOLD, SMOOTH_SCROLL_OFFSET};

/// Mobile navigation drawer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Closes the menu on a click that hit neither the menu nor its toggle.
    pub fn on_document_click(&mut self, inside_menu: bool, inside_toggle: bool) {
        if self.open && !inside_menu && !inside_toggle {
            self.open = false;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Back-to-top button visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackToTop {
    visible: bool,
}

impl BackToTop {
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.visible = scroll_y > BACK_TO_TOP_THRESHOLD;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Scroll position for an in-page anchor, leaving room for the fixed header.
///
/// `target_top` is the target's top relative to the viewport.
pub fn smooth_scroll_top(target_top: f64, scroll_y: f64) -> f64 {
    target_top + scroll_y - SMOOTH_SCROLL_OFFSET
}

/// FAQ list where at most one answer is open.
#[derive(Debug, Clone, Default)]
pub struct FaqAccordion {
    items: usize,
    open: Option<usize>,
}

impl FaqAccordion {
    pub fn new(items: usize) -> Self {
        Self { items, open: None }
    }

    /// Clicking an open question closes it; any other question opens and
    /// closes the rest.
    pub fn click(&mut self, index: usize) {
        if index >= self.items {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }
}

/// Elements that animate in the first time they scroll into view.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(elements: usize) -> Self {
        Self {
            revealed: vec![false; elements],
        }
    }

    /// Returns `true` when this report reveals the element; it is not
    /// watched afterwards.
    pub fn on_intersection(&mut self, index: usize, ratio: f64) -> bool {
        match self.revealed.get_mut(index) {
            Some(revealed) if !*revealed && ratio >= REVEAL_VISIBILITY_THRESHOLD => {
                *revealed = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Elements still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }
}
