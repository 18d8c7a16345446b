//! Scripted page sessions.
//!
//! A session is a timeline of host events (load, scroll samples, clicks,
//! form input) with millisecond timestamps. Tests replay a script
//! synchronously against the injected clock; the previewer binary replays
//! the same script paced by `tokio::time` so the log output unfolds like a
//! real visit.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::PageEngine;
use crate::page::Viewport;

/// One host event the engine can receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The page finished loading
    PageLoaded,
    /// A scroll sample with the new vertical position
    Scroll { y: f64 },
    /// A language selector control was clicked
    LanguageClick { code: String },
    /// The mobile hamburger was clicked
    NavToggle,
    /// The overlay behind the mobile menu was clicked
    OverlayClick,
    /// A navigation link was activated
    NavLinkClick { section: String },
    /// Text was typed into a form field
    FieldInput { name: String, value: String },
    /// A form field gained focus
    FieldFocus { name: String },
    /// A form field lost focus
    FieldBlur { name: String },
    /// The contact form was submitted
    FormSubmit,
    /// No input; the clock just advances to this point
    Idle,
}

/// An event pinned to a point on the session clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub at_ms: u64,
    pub event: SessionEvent,
}

impl ScriptedEvent {
    pub fn new(at_ms: u64, event: SessionEvent) -> Self {
        Self { at_ms, event }
    }
}

/// Replay a script synchronously. Timers due at or before each step's
/// timestamp fire before the step's event is applied; events are assumed to
/// be in timestamp order.
pub fn replay(engine: &mut PageEngine, viewport_height: f64, script: &[ScriptedEvent]) {
    for step in script {
        apply(engine, viewport_height, step);
    }
}

/// Replay a script against the tokio clock, sleeping out the gaps between
/// events. Under a paused test runtime this is deterministic.
pub async fn replay_paced(
    engine: &mut PageEngine,
    viewport_height: f64,
    script: &[ScriptedEvent],
) {
    let mut elapsed = 0u64;
    for step in script {
        if step.at_ms > elapsed {
            tokio::time::sleep(Duration::from_millis(step.at_ms - elapsed)).await;
            elapsed = step.at_ms;
        }
        apply(engine, viewport_height, step);
    }
    info!("session replay finished at {}ms", elapsed);
}

fn apply(engine: &mut PageEngine, viewport_height: f64, step: &ScriptedEvent) {
    engine.tick(step.at_ms);
    match &step.event {
        SessionEvent::PageLoaded => engine.page_loaded(step.at_ms),
        SessionEvent::Scroll { y } => {
            engine.handle_scroll(Viewport::new(*y, viewport_height), step.at_ms)
        }
        SessionEvent::LanguageClick { code } => engine.switch_language(code),
        SessionEvent::NavToggle => {
            engine.toggle_mobile_nav();
        }
        SessionEvent::OverlayClick => engine.close_mobile_nav(),
        SessionEvent::NavLinkClick { section } => {
            engine.nav_link_clicked(section);
        }
        SessionEvent::FieldInput { name, value } => engine.set_field_value(name, value),
        SessionEvent::FieldFocus { name } => engine.focus_field(name),
        SessionEvent::FieldBlur { name } => engine.blur_field(name),
        SessionEvent::FormSubmit => {
            engine.submit_form();
        }
        SessionEvent::Idle => {}
    }
}
