#[derive(Debug, Clone)]
pub struct EngineConfig {
    // Scroll spy
    pub nav_offset: f64,
    pub scrolled_threshold: f64,

    // Grid reveal observer
    pub grid_threshold: f64,
    pub grid_bottom_margin: f64,
    pub stagger_ms: u64,

    // Section title observer
    pub title_threshold: f64,
    pub title_bottom_margin: f64,

    // Preloader
    pub preloader_hide_delay_ms: u64,
    pub preloader_remove_delay_ms: u64,

    // Hero parallax
    pub parallax_rate: f64,
    pub parallax_scale_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nav_offset: 120.0,
            scrolled_threshold: 50.0,
            grid_threshold: 0.15,
            grid_bottom_margin: 80.0,
            stagger_ms: 150,
            title_threshold: 0.20,
            title_bottom_margin: 40.0,
            preloader_hide_delay_ms: 600,
            preloader_remove_delay_ms: 500,
            parallax_rate: 0.3,
            parallax_scale_rate: 0.0002,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to the
    /// page's stock tuning for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            nav_offset: std::env::var("PAGE_NAV_OFFSET")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.nav_offset),
            scrolled_threshold: std::env::var("PAGE_SCROLLED_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.scrolled_threshold),
            grid_threshold: std::env::var("PAGE_GRID_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.grid_threshold),
            grid_bottom_margin: std::env::var("PAGE_GRID_BOTTOM_MARGIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.grid_bottom_margin),
            stagger_ms: std::env::var("PAGE_STAGGER_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.stagger_ms),
            title_threshold: std::env::var("PAGE_TITLE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.title_threshold),
            title_bottom_margin: std::env::var("PAGE_TITLE_BOTTOM_MARGIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.title_bottom_margin),
            preloader_hide_delay_ms: std::env::var("PAGE_PRELOADER_HIDE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.preloader_hide_delay_ms),
            preloader_remove_delay_ms: std::env::var("PAGE_PRELOADER_REMOVE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.preloader_remove_delay_ms),
            parallax_rate: std::env::var("PAGE_PARALLAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.parallax_rate),
            parallax_scale_rate: std::env::var("PAGE_PARALLAX_SCALE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.parallax_scale_rate),
        }
    }
}
