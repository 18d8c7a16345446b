//! Page-load splash lifecycle.
//!
//! The splash sits over the page until the load signal arrives, fades out
//! after a short grace delay, and is removed from the tree once the fade
//! has had time to finish. Both delays run on the injected clock and are
//! not cancellable, matching the reveal timers.

use tracing::debug;

use crate::config::EngineConfig;
use crate::page::{Marker, PageModel};

/// Where the splash is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderPhase {
    /// Page still loading, splash fully visible
    Loading,
    /// Load signal received, fade scheduled
    HidePending { hide_at_ms: u64 },
    /// `hidden` class applied, removal scheduled
    RemovePending { remove_at_ms: u64 },
    /// Terminal: node removed from the tree
    Removed,
}

#[derive(Debug)]
pub struct Preloader {
    hide_delay_ms: u64,
    remove_delay_ms: u64,
    phase: PreloaderPhase,
}

impl Preloader {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            hide_delay_ms: config.preloader_hide_delay_ms,
            remove_delay_ms: config.preloader_remove_delay_ms,
            phase: PreloaderPhase::Loading,
        }
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    /// The page finished loading; schedule the fade. Later load signals are
    /// ignored.
    pub fn page_loaded(&mut self, now_ms: u64) {
        if self.phase == PreloaderPhase::Loading {
            self.phase = PreloaderPhase::HidePending {
                hide_at_ms: now_ms + self.hide_delay_ms,
            };
            debug!("preloader fade scheduled for {}ms", now_ms + self.hide_delay_ms);
        }
    }

    /// Advance the lifecycle against the clock.
    pub fn tick(&mut self, page: &mut PageModel, now_ms: u64) {
        match self.phase {
            PreloaderPhase::HidePending { hide_at_ms } if now_ms >= hide_at_ms => {
                for id in page.marked(|m| matches!(m, Marker::Preloader)) {
                    page.add_class(id, "hidden");
                }
                self.phase = PreloaderPhase::RemovePending {
                    remove_at_ms: hide_at_ms + self.remove_delay_ms,
                };
            }
            PreloaderPhase::RemovePending { remove_at_ms } if now_ms >= remove_at_ms => {
                for id in page.marked(|m| matches!(m, Marker::Preloader)) {
                    page.remove_subtree(id);
                }
                self.phase = PreloaderPhase::Removed;
                debug!("preloader removed at {}ms", now_ms);
            }
            _ => {}
        }
    }
}
