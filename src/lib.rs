//! Interaction core for a trilingual single-page site.
//!
//! The engine owns the page's client-side state: the active language and
//! its propagation across the UI, scroll-derived navigation highlighting,
//! and the one-shot staggered reveal animations, plus the small
//! collaborators around them (mobile nav, simulated contact form, hero
//! parallax, load splash). The render tree and every event source are
//! injected, so the whole system runs headless.

pub mod config;
pub mod contact_form;
pub mod engine;
pub mod i18n;
pub mod nav_menu;
pub mod page;
pub mod parallax;
pub mod preloader;
pub mod reveal;
pub mod scroll_spy;
pub mod session;
