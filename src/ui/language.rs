//! Language mode switching.

use log::debug;

use super::LanguageMode;
use crate::config::LANGUAGE_STORAGE_KEY;
use crate::events::{EventSink, SiteEvent};
use crate::storage::KeyValueStore;

/// Body class present while the expat variant is shown.
pub const EXPAT_BODY_CLASS: &str = "expat-mode";

/// Called with the new mode after every switch.
pub type ModeCallback = Box<dyn FnMut(LanguageMode)>;

/// Current language mode plus the language dropdown.
///
/// The preference is kept in persistent local storage under `mlpLang`.
pub struct LanguageController<S> {
    store: S,
    mode: LanguageMode,
    dropdown_open: bool,
    listeners: Vec<ModeCallback>,
}

impl<S: KeyValueStore> LanguageController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            mode: LanguageMode::Local,
            dropdown_open: false,
            listeners: Vec::new(),
        }
    }

    /// Re-applies a saved `expat` preference. Any other value, a missing
    /// key or unavailable storage leaves the page in local mode.
    pub fn restore(&mut self, sink: &mut dyn EventSink) -> LanguageMode {
        match self.store.get(LANGUAGE_STORAGE_KEY) {
            Ok(Some(saved)) if LanguageMode::from_stored(&saved) == LanguageMode::Expat => {
                self.set_mode(LanguageMode::Expat, sink);
            }
            Ok(_) => {}
            Err(e) => debug!("Language preference unavailable: {}", e),
        }
        self.mode
    }

    /// Switches mode, closes the dropdown, saves the preference, reports the
    /// switch and notifies listeners.
    pub fn set_mode(&mut self, mode: LanguageMode, sink: &mut dyn EventSink) {
        self.mode = mode;
        self.dropdown_open = false;
        if let Err(e) = self.store.set(LANGUAGE_STORAGE_KEY, &mode.to_string()) {
            debug!("Language preference not saved: {}", e);
        }
        sink.emit(SiteEvent::LanguageSwitch {
            language_version: mode,
        });
        for listener in &mut self.listeners {
            listener(mode);
        }
    }

    /// Registers a listener for later switches.
    pub fn on_change(&mut self, listener: impl FnMut(LanguageMode) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn mode(&self) -> LanguageMode {
        self.mode
    }

    /// Class the body carries in the current mode, if any.
    pub fn body_class(&self) -> Option<&'static str> {
        match self.mode {
            LanguageMode::Expat => Some(EXPAT_BODY_CLASS),
            LanguageMode::Local => None,
        }
    }

    /// Whether a button or dropdown item with this `data-lang` is active.
    pub fn is_active(&self, data_lang: &str) -> bool {
        data_lang == self.mode.to_string()
    }

    pub fn dropdown_label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    /// Closes the dropdown on a click outside the language switcher.
    pub fn on_document_click(&mut self, inside_switcher: bool) {
        if self.dropdown_open && !inside_switcher {
            self.dropdown_open = false;
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use crate::storage::{MemoryStore, UnavailableStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_mode_updates_state_and_reports() {
        let mut sink = RecordingSink::new();
        let mut lang = LanguageController::new(MemoryStore::new());
        lang.toggle_dropdown();
        lang.set_mode(LanguageMode::Expat, &mut sink);

        assert_eq!(lang.body_class(), Some("expat-mode"));
        assert!(lang.is_active("expat"));
        assert!(!lang.is_active("local"));
        assert_eq!(lang.dropdown_label(), "🇨🇳 中国外派版");
        assert!(!lang.is_dropdown_open());
        assert_eq!(
            lang.store().get(LANGUAGE_STORAGE_KEY).unwrap().as_deref(),
            Some("expat")
        );
        assert_eq!(
            sink.events,
            vec![SiteEvent::LanguageSwitch {
                language_version: LanguageMode::Expat
            }]
        );

        lang.set_mode(LanguageMode::Local, &mut sink);
        assert_eq!(lang.body_class(), None);
        assert_eq!(lang.dropdown_label(), "🇲🇾 本地华人版");
    }

    #[test]
    fn test_restore_only_acts_on_expat() {
        let mut sink = RecordingSink::new();
        let mut store = MemoryStore::new();
        store.set(LANGUAGE_STORAGE_KEY, "expat").unwrap();
        let mut lang = LanguageController::new(store);
        assert_eq!(lang.restore(&mut sink), LanguageMode::Expat);
        assert_eq!(sink.events.len(), 1);

        let mut sink = RecordingSink::new();
        let mut store = MemoryStore::new();
        store.set(LANGUAGE_STORAGE_KEY, "local").unwrap();
        let mut lang = LanguageController::new(store);
        assert_eq!(lang.restore(&mut sink), LanguageMode::Local);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_unavailable_storage_still_switches() {
        let mut sink = RecordingSink::new();
        let mut lang = LanguageController::new(UnavailableStore);
        assert_eq!(lang.restore(&mut sink), LanguageMode::Local);
        lang.set_mode(LanguageMode::Expat, &mut sink);
        assert_eq!(lang.mode(), LanguageMode::Expat);
        assert_eq!(sink.events.len(), 1);
    }

    #[test]
    fn test_listeners_run_after_switch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut lang = LanguageController::new(MemoryStore::new());
        let log = Rc::clone(&seen);
        lang.on_change(move |mode| log.borrow_mut().push(mode));
        lang.set_mode(LanguageMode::Expat, &mut crate::events::NullSink);
        lang.set_mode(LanguageMode::Local, &mut crate::events::NullSink);
        assert_eq!(*seen.borrow(), vec![LanguageMode::Expat, LanguageMode::Local]);
    }

    #[test]
    fn test_dropdown_outside_click() {
        let mut lang = LanguageController::new(MemoryStore::new());
        lang.toggle_dropdown();
        lang.on_document_click(true);
        assert!(lang.is_dropdown_open());
        lang.on_document_click(false);
        assert!(!lang.is_dropdown_open());
    }
}
