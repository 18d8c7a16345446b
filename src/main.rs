use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use page_engine::config::EngineConfig;
use page_engine::engine::{EngineSnapshot, PageEngine};
use page_engine::i18n::Language;
use page_engine::page::{Marker, NodeSpec, PageModel, Viewport};
use page_engine::session::{self, ScriptedEvent, SessionEvent};

const VIEWPORT_HEIGHT: f64 = 800.0;

#[derive(Serialize)]
struct SessionReport {
    generated_at: DateTime<Utc>,
    snapshot: EngineSnapshot,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("page_engine=info".parse()?),
        )
        .init();

    info!("Starting page session preview");

    let config = EngineConfig::from_env();
    let mut engine = PageEngine::new(config, sample_page());

    // Eager pass, as the host would run on DOMContentLoaded
    engine.startup(Viewport::new(0.0, VIEWPORT_HEIGHT), 0);

    // Replay a representative visit in real time
    let script = demo_script();
    session::replay_paced(&mut engine, VIEWPORT_HEIGHT, &script).await;

    // Let trailing timers (stagger, preloader) fire
    let end_ms = script.last().map(|s| s.at_ms + 1000).unwrap_or(0);
    engine.tick(end_ms);
    engine.tick(end_ms);

    let report = SessionReport {
        generated_at: Utc::now(),
        snapshot: engine.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// A page shaped like the real site: fixed nav with three links and the
/// mobile controls, a hero with a parallax backdrop, an expertise section
/// with a staggered card grid, and a contact section with the form.
fn sample_page() -> PageModel {
    let mut page = PageModel::new();

    let navbar = page.insert(
        None,
        NodeSpec {
            height: 72.0,
            markers: vec![Marker::NavBar],
            ..Default::default()
        },
    );
    let links = page.insert(
        Some(navbar),
        NodeSpec {
            markers: vec![Marker::NavLinksContainer],
            ..Default::default()
        },
    );
    for target in ["hero", "expertise", "contact"] {
        page.insert(
            Some(links),
            NodeSpec {
                markers: vec![Marker::NavLink(target.to_string())],
                ..Default::default()
            },
        );
    }
    page.insert(
        Some(navbar),
        NodeSpec {
            markers: vec![Marker::Hamburger],
            ..Default::default()
        },
    );
    for (code, label) in [("fr", "FR"), ("de", "DE"), ("en", "EN")] {
        let lang = Language::from_code(code).expect("registered language");
        page.insert(
            Some(navbar),
            NodeSpec {
                text: label.to_string(),
                classes: if code == "fr" {
                    vec!["active".to_string()]
                } else {
                    Vec::new()
                },
                markers: vec![Marker::LanguageButton(lang)],
                ..Default::default()
            },
        );
    }
    page.insert(
        None,
        NodeSpec {
            markers: vec![Marker::NavOverlay],
            ..Default::default()
        },
    );
    page.insert(
        None,
        NodeSpec {
            classes: vec!["preloader".to_string()],
            markers: vec![Marker::Preloader],
            ..Default::default()
        },
    );

    // Hero
    let hero = page.insert(
        None,
        NodeSpec {
            top: 0.0,
            height: 900.0,
            markers: vec![Marker::Section("hero".to_string())],
            ..Default::default()
        },
    );
    page.insert(
        Some(hero),
        NodeSpec {
            top: 0.0,
            height: 900.0,
            markers: vec![Marker::HeroBackdrop],
            ..Default::default()
        },
    );
    page.insert(
        Some(hero),
        NodeSpec {
            top: 300.0,
            height: 120.0,
            text: "Conseil & accompagnement".to_string(),
            translations: vec![
                (Language::FRENCH, "Conseil & accompagnement".to_string()),
                (Language::GERMAN, "Beratung & Begleitung".to_string()),
                (Language::ENGLISH, "Consulting & support".to_string()),
            ],
            ..Default::default()
        },
    );
    for (code, text) in [
        ("fr", "Présentation détaillée en français."),
        ("de", "Ausführliche Vorstellung auf Deutsch."),
        ("en", "Detailed introduction in English."),
    ] {
        let lang = Language::from_code(code).expect("registered language");
        page.insert(
            Some(hero),
            NodeSpec {
                top: 450.0,
                height: 200.0,
                text: text.to_string(),
                classes: if code == "fr" {
                    vec!["active".to_string()]
                } else {
                    Vec::new()
                },
                markers: vec![Marker::ContentBlock(lang)],
                ..Default::default()
            },
        );
    }

    // Expertise: label, title, staggered card grid
    let expertise = page.insert(
        None,
        NodeSpec {
            top: 900.0,
            height: 900.0,
            markers: vec![Marker::Section("expertise".to_string())],
            ..Default::default()
        },
    );
    page.insert(
        Some(expertise),
        NodeSpec {
            top: 940.0,
            height: 24.0,
            text: "Expertise".to_string(),
            markers: vec![Marker::SectionTitle],
            ..Default::default()
        },
    );
    page.insert(
        Some(expertise),
        NodeSpec {
            top: 980.0,
            height: 56.0,
            text: "Nos domaines".to_string(),
            markers: vec![Marker::SectionTitle],
            translations: vec![
                (Language::FRENCH, "Nos domaines".to_string()),
                (Language::GERMAN, "Unsere Bereiche".to_string()),
                (Language::ENGLISH, "Our fields".to_string()),
            ],
            ..Default::default()
        },
    );
    let grid = page.insert(
        Some(expertise),
        NodeSpec {
            top: 1100.0,
            height: 600.0,
            ..Default::default()
        },
    );
    for i in 0..4 {
        page.insert(
            Some(grid),
            NodeSpec {
                top: 1100.0 + i as f64 * 150.0,
                height: 150.0,
                markers: vec![Marker::Reveal],
                ..Default::default()
            },
        );
    }

    // Contact: title and the form
    let contact = page.insert(
        None,
        NodeSpec {
            top: 1800.0,
            height: 800.0,
            markers: vec![Marker::Section("contact".to_string())],
            ..Default::default()
        },
    );
    page.insert(
        Some(contact),
        NodeSpec {
            top: 1840.0,
            height: 56.0,
            text: "Contact".to_string(),
            markers: vec![Marker::SectionTitle],
            ..Default::default()
        },
    );
    let form_wrap = page.insert(
        Some(contact),
        NodeSpec {
            top: 1950.0,
            height: 500.0,
            ..Default::default()
        },
    );
    let form = page.insert(
        Some(form_wrap),
        NodeSpec {
            markers: vec![Marker::ContactForm],
            ..Default::default()
        },
    );
    for name in ["name", "email", "message"] {
        let group = page.insert(
            Some(form),
            NodeSpec {
                classes: vec!["form-group".to_string()],
                ..Default::default()
            },
        );
        page.insert(
            Some(group),
            NodeSpec {
                markers: vec![Marker::FormField(name.to_string())],
                ..Default::default()
            },
        );
    }

    page
}

/// A representative visit: load, scroll down through the sections, switch
/// to German, open and use the mobile menu, fill in and submit the form.
fn demo_script() -> Vec<ScriptedEvent> {
    vec![
        ScriptedEvent::new(0, SessionEvent::PageLoaded),
        ScriptedEvent::new(300, SessionEvent::Scroll { y: 120.0 }),
        ScriptedEvent::new(600, SessionEvent::Scroll { y: 420.0 }),
        ScriptedEvent::new(
            900,
            SessionEvent::LanguageClick {
                code: "de".to_string(),
            },
        ),
        ScriptedEvent::new(1200, SessionEvent::Scroll { y: 950.0 }),
        ScriptedEvent::new(1600, SessionEvent::Scroll { y: 1250.0 }),
        ScriptedEvent::new(2000, SessionEvent::NavToggle),
        ScriptedEvent::new(
            2300,
            SessionEvent::NavLinkClick {
                section: "contact".to_string(),
            },
        ),
        ScriptedEvent::new(2400, SessionEvent::Scroll { y: 1790.0 }),
        ScriptedEvent::new(
            2700,
            SessionEvent::FieldFocus {
                name: "name".to_string(),
            },
        ),
        ScriptedEvent::new(
            2900,
            SessionEvent::FieldInput {
                name: "name".to_string(),
                value: "Jeanne Martin".to_string(),
            },
        ),
        ScriptedEvent::new(
            3000,
            SessionEvent::FieldBlur {
                name: "name".to_string(),
            },
        ),
        ScriptedEvent::new(
            3100,
            SessionEvent::FieldInput {
                name: "email".to_string(),
                value: "jeanne@example.com".to_string(),
            },
        ),
        ScriptedEvent::new(
            3200,
            SessionEvent::FieldInput {
                name: "message".to_string(),
                value: "Guten Tag !".to_string(),
            },
        ),
        ScriptedEvent::new(3500, SessionEvent::FormSubmit),
        ScriptedEvent::new(4000, SessionEvent::Idle),
    ]
}
