//! Scroll spy: derives the active section from the scroll position and keeps
//! the navigation bar in sync.
//!
//! Recomputation is stateless: every scroll sample rescans the sections and
//! rewrites the nav state from scratch. The handler is event-driven and must
//! stay cheap because the host registers it passively against the scroll
//! gesture.

use tracing::debug;

use crate::config::EngineConfig;
use crate::page::{Marker, PageModel};

pub struct ScrollSpy {
    /// Upward range correction compensating for the fixed nav bar height
    nav_offset: f64,
    /// Scroll depth past which the nav bar gets its "scrolled" treatment
    scrolled_threshold: f64,
    active_section: String,
}

impl ScrollSpy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            nav_offset: config.nav_offset,
            scrolled_threshold: config.scrolled_threshold,
            active_section: String::new(),
        }
    }

    /// Identifier of the section currently considered active; empty when the
    /// scroll position falls outside every section's corrected range.
    pub fn active_section(&self) -> &str {
        &self.active_section
    }

    /// Process one scroll sample: navbar scrolled flag, active-section
    /// recomputation, nav link highlighting.
    ///
    /// Sections are scanned in document order and the last one whose
    /// corrected range `[top - offset, top - offset + height)` contains
    /// `scroll_y` wins. Ranges are not supposed to overlap; if they ever do,
    /// last-match-wins is the accepted behavior, not a bug to fix here.
    pub fn handle_scroll(&mut self, page: &mut PageModel, scroll_y: f64) {
        for nav in page.marked(|m| matches!(m, Marker::NavBar)) {
            page.toggle_class(nav, "scrolled", scroll_y > self.scrolled_threshold);
        }

        let mut current = String::new();
        for id in page.marked(|m| matches!(m, Marker::Section(_))) {
            let Some(node) = page.get(id) else { continue };
            let section_top = node.top - self.nav_offset;
            if scroll_y >= section_top && scroll_y < section_top + node.height {
                if let Some(section_id) = node.section_id() {
                    current = section_id.to_string();
                }
            }
        }

        if current != self.active_section {
            debug!(
                "active section '{}' -> '{}' at scroll_y={}",
                self.active_section, current, scroll_y
            );
            self.active_section = current;
        }

        for link in page.marked(|m| matches!(m, Marker::NavLink(_))) {
            let matches = page
                .get(link)
                .and_then(|n| n.nav_link_target())
                .map(|target| !self.active_section.is_empty() && target == self.active_section)
                .unwrap_or(false);
            page.toggle_class(link, "active", matches);
        }
    }
}
