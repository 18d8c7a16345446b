//! Mobile navigation menu state.

use tracing::debug;

use crate::page::{Marker, PageModel};

/// Open/closed state of the slide-in mobile menu. Opening syncs the `open`
/// class onto the links container and hamburger, activates the overlay, and
/// locks body scrolling; closing clears all four.
#[derive(Debug, Default)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu and return the new state.
    pub fn toggle(&mut self, page: &mut PageModel) -> bool {
        if self.open {
            self.close(page);
        } else {
            self.open = true;
            self.sync(page);
            debug!("mobile nav opened");
        }
        self.open
    }

    /// Close the menu. Safe to call when already closed (overlay clicks and
    /// nav link clicks both funnel here).
    pub fn close(&mut self, page: &mut PageModel) {
        if self.open {
            debug!("mobile nav closed");
        }
        self.open = false;
        self.sync(page);
    }

    fn sync(&self, page: &mut PageModel) {
        for id in page.marked(|m| matches!(m, Marker::NavLinksContainer | Marker::Hamburger)) {
            page.toggle_class(id, "open", self.open);
        }
        for id in page.marked(|m| matches!(m, Marker::NavOverlay)) {
            page.toggle_class(id, "active", self.open);
        }
        page.set_scroll_locked(self.open);
    }
}
