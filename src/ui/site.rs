//! Page-level controller tying the widgets together.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;

use super::{
    BackToTop, CounterAnimation, FaqAccordion, LanguageController, LanguageMode, MobileMenu,
    RevealTracker, Typewriter, TypewriterSource,
};
use crate::document::ReadyState;
use crate::events::EventSink;
use crate::storage::KeyValueStore;

/// Which optional elements the page contains.
#[derive(Debug, Clone, Default)]
pub struct PageFeatures {
    /// `#typewriter` and its text attributes
    pub typewriter: Option<TypewriterSource>,
    /// `.gptw-counter` is present
    pub counter: bool,
    /// Its `data-target` attribute
    pub counter_target: Option<String>,
    pub mobile_menu: bool,
    pub back_to_top: bool,
    /// Number of `.faq-item`s
    pub faq_items: usize,
    /// Number of `.animate-on-scroll` elements
    pub reveal_elements: usize,
    /// The runtime can report element visibility
    pub intersection_observer: bool,
}

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    MobileToggle,
    MobileMenu,
    /// The language switcher, including its dropdown button
    LanguageSwitcher,
    FaqQuestion(usize),
    Elsewhere,
}

/// Owns every widget on the page.
///
/// The typewriter follows language switches through a listener registered
/// on the language controller.
pub struct SiteController<S> {
    features: PageFeatures,
    language: LanguageController<S>,
    typewriter: Option<Rc<RefCell<Typewriter>>>,
    counter: Option<CounterAnimation>,
    menu: Option<MobileMenu>,
    back_to_top: Option<BackToTop>,
    accordion: FaqAccordion,
    reveal: Option<RevealTracker>,
    initialized: bool,
}

impl<S: KeyValueStore> SiteController<S> {
    /// `store` is the persistent store holding the language preference.
    pub fn new(store: S, features: PageFeatures) -> Self {
        let observer = features.intersection_observer;
        Self {
            language: LanguageController::new(store),
            typewriter: None,
            counter: (features.counter && observer)
                .then(|| CounterAnimation::new(features.counter_target.as_deref())),
            menu: features.mobile_menu.then(MobileMenu::default),
            back_to_top: features.back_to_top.then(BackToTop::default),
            accordion: FaqAccordion::new(features.faq_items),
            reveal: observer.then(|| RevealTracker::new(features.reveal_elements)),
            features,
            initialized: false,
        }
    }

    /// Runs [`SiteController::init`] the first time the markup is parsed.
    pub fn on_ready_state(
        &mut self,
        state: ReadyState,
        sink: &mut dyn EventSink,
    ) -> Option<Duration> {
        if self.initialized || !state.is_parsed() {
            return None;
        }
        self.init(sink)
    }

    /// Restores the saved language, then starts the typewriter in that
    /// language. Returns the delay to the typewriter's second tick.
    pub fn init(&mut self, sink: &mut dyn EventSink) -> Option<Duration> {
        self.initialized = true;
        let mode = self.language.restore(sink);

        let source = self.features.typewriter.clone()?;
        let Some(mut typewriter) = Typewriter::new(source, mode) else {
            debug!("Typewriter has no texts for {} mode", mode);
            return None;
        };
        let delay = typewriter.tick();
        let typewriter = Rc::new(RefCell::new(typewriter));
        let listener = Rc::clone(&typewriter);
        self.language.on_change(move |mode| {
            listener.borrow_mut().switch_texts(mode);
        });
        self.typewriter = Some(typewriter);
        Some(delay)
    }

    /// Switches language. Returns the typewriter's next delay when it
    /// restarted.
    pub fn set_language(&mut self, mode: LanguageMode, sink: &mut dyn EventSink) -> Option<Duration> {
        self.language.set_mode(mode, sink);
        self.typewriter.as_ref().map(|tw| tw.borrow().next_delay())
    }

    /// Advances the typewriter; returns the delay to its next tick.
    pub fn tick_typewriter(&mut self) -> Option<Duration> {
        self.typewriter.as_ref().map(|tw| tw.borrow_mut().tick())
    }

    pub fn on_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::MobileToggle => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.toggle();
                }
            }
            ClickTarget::FaqQuestion(index) => self.accordion.click(index),
            _ => {}
        }

        if let Some(menu) = self.menu.as_mut() {
            menu.on_document_click(
                target == ClickTarget::MobileMenu,
                target == ClickTarget::MobileToggle,
            );
        }
        self.language
            .on_document_click(target == ClickTarget::LanguageSwitcher);
    }

    /// Opens or closes the language dropdown from its button.
    pub fn toggle_language_dropdown(&mut self) {
        self.language.toggle_dropdown();
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        if let Some(btn) = self.back_to_top.as_mut() {
            btn.on_scroll(scroll_y);
        }
    }

    /// Reports the counter's visible fraction; returns the delay to the first
    /// step when the animation starts.
    pub fn on_counter_visibility(&mut self, ratio: f64) -> Option<Duration> {
        self.counter.as_mut()?.on_visibility(ratio)
    }

    pub fn step_counter(&mut self) -> Option<Duration> {
        self.counter.as_mut()?.step()
    }

    pub fn on_reveal_intersection(&mut self, index: usize, ratio: f64) -> bool {
        self.reveal
            .as_mut()
            .is_some_and(|reveal| reveal.on_intersection(index, ratio))
    }

    pub fn language(&self) -> &LanguageController<S> {
        &self.language
    }

    pub fn typewriter_text(&self) -> Option<String> {
        self.typewriter
            .as_ref()
            .map(|tw| tw.borrow().display().to_string())
    }

    pub fn counter_text(&self) -> Option<&str> {
        self.counter.as_ref()?.text()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some_and(|menu| menu.is_open())
    }

    pub fn is_back_to_top_visible(&self) -> bool {
        self.back_to_top.is_some_and(|btn| btn.is_visible())
    }

    pub fn open_faq_item(&self) -> Option<usize> {
        self.accordion.open_item()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveal
            .as_ref()
            .is_some_and(|reveal| reveal.is_revealed(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LANGUAGE_STORAGE_KEY, TYPE_DELAY};
    use crate::events::{RecordingSink, SiteEvent};
    use crate::storage::MemoryStore;

    fn features() -> PageFeatures {
        PageFeatures {
            typewriter: Some(TypewriterSource {
                local: Some(r#"["Local"]"#.into()),
                expat: Some(r#"["Expat"]"#.into()),
            }),
            counter: true,
            counter_target: Some("2".into()),
            mobile_menu: true,
            back_to_top: true,
            faq_items: 2,
            reveal_elements: 1,
            intersection_observer: true,
        }
    }

    #[test]
    fn test_init_restores_language_before_typewriter() {
        let mut store = MemoryStore::new();
        store.set(LANGUAGE_STORAGE_KEY, "expat").unwrap();
        let mut sink = RecordingSink::new();
        let mut site = SiteController::new(store, features());

        assert_eq!(site.init(&mut sink), Some(TYPE_DELAY));
        assert_eq!(site.language().mode(), LanguageMode::Expat);
        assert_eq!(site.typewriter_text().as_deref(), Some("E"));
        assert_eq!(sink.events.len(), 1);
    }

    #[test]
    fn test_language_switch_restarts_typewriter() {
        let mut sink = RecordingSink::new();
        let mut site = SiteController::new(MemoryStore::new(), features());
        site.init(&mut sink);
        site.tick_typewriter();
        assert_eq!(site.typewriter_text().as_deref(), Some("Lo"));

        assert_eq!(site.set_language(LanguageMode::Expat, &mut sink), Some(TYPE_DELAY));
        assert_eq!(site.typewriter_text().as_deref(), Some("E"));
        assert_eq!(
            sink.events,
            vec![SiteEvent::LanguageSwitch {
                language_version: LanguageMode::Expat
            }]
        );
    }

    #[test]
    fn test_ready_state_initializes_once() {
        let mut sink = RecordingSink::new();
        let mut site = SiteController::new(MemoryStore::new(), features());
        assert_eq!(site.on_ready_state(ReadyState::Loading, &mut sink), None);
        assert!(site.typewriter_text().is_none());
        assert!(site.on_ready_state(ReadyState::Interactive, &mut sink).is_some());
        assert!(site.on_ready_state(ReadyState::Complete, &mut sink).is_none());
    }

    #[test]
    fn test_clicks() {
        let mut site = SiteController::new(MemoryStore::new(), features());
        site.on_click(ClickTarget::MobileToggle);
        assert!(site.is_menu_open());
        site.on_click(ClickTarget::MobileMenu);
        assert!(site.is_menu_open());
        site.on_click(ClickTarget::FaqQuestion(1));
        assert!(!site.is_menu_open());
        assert_eq!(site.open_faq_item(), Some(1));

        site.toggle_language_dropdown();
        site.on_click(ClickTarget::LanguageSwitcher);
        assert!(site.language().is_dropdown_open());
        site.on_click(ClickTarget::Elsewhere);
        assert!(!site.language().is_dropdown_open());
    }

    #[test]
    fn test_scroll_and_visibility() {
        let mut site = SiteController::new(MemoryStore::new(), features());
        site.on_scroll(400.0);
        assert!(site.is_back_to_top_visible());
        assert!(site.on_reveal_intersection(0, 0.2));
        assert!(site.is_revealed(0));

        assert!(site.on_counter_visibility(0.6).is_some());
        assert!(site.step_counter().is_some());
        assert_eq!(site.step_counter(), None);
        assert_eq!(site.counter_text(), Some("2"));
    }

    #[test]
    fn test_missing_elements_are_no_ops() {
        let mut sink = RecordingSink::new();
        let mut site = SiteController::new(MemoryStore::new(), PageFeatures::default());
        assert_eq!(site.init(&mut sink), None);
        site.on_click(ClickTarget::MobileToggle);
        assert!(!site.is_menu_open());
        site.on_scroll(1000.0);
        assert!(!site.is_back_to_top_visible());
        assert_eq!(site.on_counter_visibility(1.0), None);
        assert!(!site.on_reveal_intersection(0, 1.0));
        assert_eq!(site.set_language(LanguageMode::Expat, &mut sink), None);
        assert_eq!(site.language().mode(), LanguageMode::Expat);
    }

    #[test]
    fn test_no_observer_disables_counter_and_reveal() {
        let mut f = features();
        f.intersection_observer = false;
        let mut site = SiteController::new(MemoryStore::new(), f);
        assert_eq!(site.on_counter_visibility(1.0), None);
        assert!(!site.on_reveal_intersection(0, 1.0));
    }
}
