//! Page interaction engine coordinating all components.
//!
//! One `PageEngine` owns the page model and every stateful component wired
//! to it: the localization store, the scroll spy, the two reveal scheduler
//! instances, the mobile nav, and the preloader. It is the single writer of
//! the active language and the active section. Everything runs in one
//! execution context; event handlers delegate to named methods so tests can
//! drive the same logic without a real event source, and several engines
//! can coexist because no state is global.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::contact_form::{self, SubmitOutcome};
use crate::i18n::{Language, LocalizationStore};
use crate::nav_menu::MobileNav;
use crate::page::{Marker, NodeId, PageModel, Viewport};
use crate::parallax;
use crate::preloader::{Preloader, PreloaderPhase};
use crate::reveal::{ObserverConfig, RevealCounts, RevealEffect, RevealScheduler};
use crate::scroll_spy::ScrollSpy;

/// Serializable summary of the engine's observable state.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub active_language: String,
    pub active_section: String,
    pub navbar_scrolled: bool,
    pub mobile_nav_open: bool,
    pub scroll_locked: bool,
    pub grid_reveals: RevealCounts,
    pub title_reveals: RevealCounts,
    pub preloader: String,
}

pub struct PageEngine {
    config: EngineConfig,
    page: PageModel,
    store: LocalizationStore,
    spy: ScrollSpy,
    grid_reveals: RevealScheduler,
    title_reveals: RevealScheduler,
    nav: MobileNav,
    preloader: Preloader,
}

impl PageEngine {
    /// Build an engine over a page. The reveal target sets are fixed here:
    /// grid targets and section titles each get their own scheduler with
    /// its own tuning, sharing no state.
    pub fn new(config: EngineConfig, page: PageModel) -> Self {
        let mut grid_reveals =
            RevealScheduler::new(ObserverConfig::grid(&config), RevealEffect::InViewClass);
        grid_reveals.observe_targets(page.marked(|m| matches!(m, Marker::Reveal)));

        let mut title_reveals =
            RevealScheduler::new(ObserverConfig::titles(&config), RevealEffect::NaturalStyle);
        title_reveals.observe_targets(page.marked(|m| matches!(m, Marker::SectionTitle)));

        let spy = ScrollSpy::new(&config);
        let preloader = Preloader::new(&config);

        Self {
            config,
            page,
            store: LocalizationStore::new(),
            spy,
            grid_reveals,
            title_reveals,
            nav: MobileNav::new(),
            preloader,
        }
    }

    /// One-time startup pass: suppress the title styles, then run an eager
    /// scroll sample so a page opened mid-scroll (deep link) highlights the
    /// right section before any real scroll event arrives.
    pub fn startup(&mut self, viewport: Viewport, now_ms: u64) {
        self.title_reveals.prime(&mut self.page);
        self.handle_scroll(viewport, now_ms);
        info!(
            "engine started: language '{}', section '{}'",
            self.store.active().code(),
            self.spy.active_section()
        );
    }

    /// Process one scroll sample. Order matters and is fixed: navbar flag
    /// and section highlighting first, then the parallax transform, then
    /// the visibility pass feeding both reveal schedulers, then due timers.
    /// The spy and the schedulers read the same sample and never block each
    /// other.
    pub fn handle_scroll(&mut self, viewport: Viewport, now_ms: u64) {
        self.spy.handle_scroll(&mut self.page, viewport.scroll_y);
        self.apply_parallax(viewport.scroll_y);
        self.grid_reveals
            .visibility_pass(&self.page, viewport, now_ms);
        self.title_reveals
            .visibility_pass(&self.page, viewport, now_ms);
        self.tick(now_ms);
    }

    /// Visibility-only sample (the host's observer fired without a scroll
    /// position change, e.g. after a layout shift).
    pub fn handle_visibility(&mut self, viewport: Viewport, now_ms: u64) {
        self.grid_reveals
            .visibility_pass(&self.page, viewport, now_ms);
        self.title_reveals
            .visibility_pass(&self.page, viewport, now_ms);
        self.tick(now_ms);
    }

    /// Advance every clock-driven component.
    pub fn tick(&mut self, now_ms: u64) {
        self.grid_reveals.tick(&mut self.page, now_ms);
        self.title_reveals.tick(&mut self.page, now_ms);
        self.preloader.tick(&mut self.page, now_ms);
    }

    /// Switch the page language. Unregistered codes are ignored: no state
    /// change, no error surfaced.
    pub fn switch_language(&mut self, code: &str) {
        match Language::from_code(code) {
            Ok(lang) => self.store.switch(&mut self.page, lang),
            Err(err) => debug!("language switch ignored: {}", err),
        }
    }

    /// The page finished loading.
    pub fn page_loaded(&mut self, now_ms: u64) {
        self.preloader.page_loaded(now_ms);
    }

    pub fn toggle_mobile_nav(&mut self) -> bool {
        self.nav.toggle(&mut self.page)
    }

    pub fn close_mobile_nav(&mut self) {
        self.nav.close(&mut self.page);
    }

    /// A nav link was activated: the mobile menu closes and the caller gets
    /// the scroll position to animate to, if the section exists.
    pub fn nav_link_clicked(&mut self, section_id: &str) -> Option<f64> {
        self.nav.close(&mut self.page);
        self.anchor_scroll_target(section_id)
    }

    /// Scroll position for an in-page anchor: the section's top minus the
    /// fixed nav bar height. The host performs the smooth scrolling itself.
    pub fn anchor_scroll_target(&self, section_id: &str) -> Option<f64> {
        let section = self
            .page
            .first_marked(|m| matches!(m, Marker::Section(id) if id == section_id))?;
        let top = self.page.get(section)?.top;
        Some(top - self.page.nav_height().unwrap_or(0.0))
    }

    // ---- contact form ----

    pub fn set_field_value(&mut self, name: &str, value: &str) {
        contact_form::set_field_value(&mut self.page, name, value);
    }

    pub fn focus_field(&mut self, name: &str) {
        contact_form::focus_field(&mut self.page, name);
    }

    pub fn blur_field(&mut self, name: &str) {
        contact_form::blur_field(&mut self.page, name);
    }

    pub fn submit_form(&mut self) -> SubmitOutcome {
        contact_form::submit(&mut self.page, self.store.active())
    }

    // ---- reads ----

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    pub fn active_language(&self) -> Language {
        self.store.active()
    }

    pub fn active_section(&self) -> &str {
        self.spy.active_section()
    }

    pub fn preloader_phase(&self) -> PreloaderPhase {
        self.preloader.phase()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let navbar_scrolled = self
            .page
            .first_marked(|m| matches!(m, Marker::NavBar))
            .and_then(|id| self.page.get(id))
            .map(|n| n.has_class("scrolled"))
            .unwrap_or(false);

        EngineSnapshot {
            active_language: self.store.active().code().to_string(),
            active_section: self.spy.active_section().to_string(),
            navbar_scrolled,
            mobile_nav_open: self.nav.is_open(),
            scroll_locked: self.page.scroll_locked(),
            grid_reveals: self.grid_reveals.counts(),
            title_reveals: self.title_reveals.counts(),
            preloader: match self.preloader.phase() {
                PreloaderPhase::Loading => "loading".to_string(),
                PreloaderPhase::HidePending { .. } => "hide-pending".to_string(),
                PreloaderPhase::RemovePending { .. } => "remove-pending".to_string(),
                PreloaderPhase::Removed => "removed".to_string(),
            },
        }
    }

    /// Write the parallax transform onto the hero backdrop. Past the hero
    /// the last transform stays in place.
    fn apply_parallax(&mut self, scroll_y: f64) {
        let Some(backdrop) = self
            .page
            .first_marked(|m| matches!(m, Marker::HeroBackdrop))
        else {
            return;
        };
        let Some(hero_height) = self.enclosing_section_height(backdrop) else {
            return;
        };
        if let Some(transform) = parallax::hero_transform(
            scroll_y,
            hero_height,
            self.config.parallax_rate,
            self.config.parallax_scale_rate,
        ) {
            if let Some(style) = self.page.style_mut(backdrop) {
                style.translate_y = Some(transform.translate_y);
                style.scale = Some(transform.scale);
            }
        }
    }

    /// Height of the section enclosing `id`, falling back to the first
    /// section on the page.
    fn enclosing_section_height(&self, id: NodeId) -> Option<f64> {
        let mut current = self.page.parent_of(id);
        while let Some(ancestor) = current {
            if let Some(node) = self.page.get(ancestor) {
                if node.section_id().is_some() {
                    return Some(node.height);
                }
            }
            current = self.page.parent_of(ancestor);
        }
        self.page
            .first_marked(|m| matches!(m, Marker::Section(_)))
            .and_then(|s| self.page.get(s))
            .map(|n| n.height)
    }
}
