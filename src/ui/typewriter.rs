//! Hero typewriter: types a phrase, holds it, deletes it, moves on.

use std::time::Duration;

use log::warn;

use super::LanguageMode;
use crate::config::{DELETE_DELAY, HOLD_DELAY, NEXT_TEXT_DELAY, TYPE_DELAY};

/// Raw `data-texts-local` / `data-texts-expat` attribute values.
#[derive(Debug, Clone, Default)]
pub struct TypewriterSource {
    pub local: Option<String>,
    pub expat: Option<String>,
}

impl TypewriterSource {
    fn texts_for(&self, mode: LanguageMode) -> Option<Vec<String>> {
        let raw = match mode {
            LanguageMode::Local => self.local.as_deref(),
            LanguageMode::Expat => self.expat.as_deref(),
        }?;
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(texts) if !texts.is_empty() => Some(texts),
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring malformed typewriter texts for {} mode: {}", mode, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    source: TypewriterSource,
    texts: Vec<String>,
    text_index: usize,
    char_index: usize,
    deleting: bool,
    display: String,
    next_delay: Duration,
}

impl Typewriter {
    /// Builds the animation for the given mode, or `None` when that mode
    /// has no usable texts.
    pub fn new(source: TypewriterSource, mode: LanguageMode) -> Option<Self> {
        let texts = source.texts_for(mode)?;
        Some(Self {
            source,
            texts,
            text_index: 0,
            char_index: 0,
            deleting: false,
            display: String::new(),
            next_delay: Duration::ZERO,
        })
    }

    /// Advances one character and returns the delay before the next tick.
    pub fn tick(&mut self) -> Duration {
        let current: Vec<char> = self.texts[self.text_index].chars().collect();

        self.next_delay = if !self.deleting {
            self.char_index += 1;
            self.display = current.iter().take(self.char_index).collect();
            if self.char_index >= current.len() {
                self.deleting = true;
                HOLD_DELAY
            } else {
                TYPE_DELAY
            }
        } else {
            self.char_index = self.char_index.saturating_sub(1);
            self.display = current.iter().take(self.char_index).collect();
            if self.char_index == 0 {
                self.deleting = false;
                self.text_index = (self.text_index + 1) % self.texts.len();
                NEXT_TEXT_DELAY
            } else {
                DELETE_DELAY
            }
        };
        self.next_delay
    }

    /// Restarts from the first text of `mode` and runs the first tick.
    ///
    /// Keeps the current texts when `mode` has none.
    pub fn switch_texts(&mut self, mode: LanguageMode) -> Duration {
        if let Some(texts) = self.source.texts_for(mode) {
            self.texts = texts;
        }
        self.text_index = 0;
        self.char_index = 0;
        self.deleting = false;
        self.display.clear();
        self.tick()
    }

    /// Text currently shown.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Delay returned by the most recent tick.
    pub fn next_delay(&self) -> Duration {
        self.next_delay
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }
}
