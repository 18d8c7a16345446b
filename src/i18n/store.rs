//! Localization store: owns the active language and applies a switch across
//! the whole page in one synchronous pass.

use tracing::{debug, info};

use crate::i18n::{strings_for, Language};
use crate::page::{Marker, PageModel};

/// Holds the page's active language and performs language switches.
///
/// A switch touches, in order: the selector controls, every node carrying
/// per-language text, the mutually-exclusive content blocks, the document
/// language attribute, and (when present) the submission-confirmation panel.
/// The pass is synchronous, so no intermediate state is ever observable.
#[derive(Debug)]
pub struct LocalizationStore {
    active: Language,
}

impl Default for LocalizationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalizationStore {
    pub fn new() -> Self {
        Self {
            active: Language::page_default(),
        }
    }

    /// The language currently governing the page.
    pub fn active(&self) -> Language {
        self.active
    }

    /// Switch the page to `lang`. Idempotent: re-applying the active
    /// language rewrites the same state.
    pub fn switch(&mut self, page: &mut PageModel, lang: Language) {
        self.active = lang;

        self.update_selector_buttons(page, lang);
        self.apply_translations(page, lang);
        self.toggle_content_blocks(page, lang);
        page.set_page_lang(lang);
        self.refresh_confirmation_panel(page, lang);

        info!("language switched to '{}'", lang.code());
    }

    /// Mark exactly the selector control matching `lang` active.
    fn update_selector_buttons(&self, page: &mut PageModel, lang: Language) {
        for id in page.marked(|m| matches!(m, Marker::LanguageButton(_))) {
            let matches = page
                .get(id)
                .and_then(|n| n.language_button())
                .map(|button_lang| button_lang == lang)
                .unwrap_or(false);
            page.toggle_class(id, "active", matches);
        }
    }

    /// Swap in the registered text for `lang`. A node with no translation
    /// for `lang` keeps whatever it currently shows.
    fn apply_translations(&self, page: &mut PageModel, lang: Language) {
        let mut missing = 0usize;
        for id in page.document_order() {
            let translated = match page.get(id) {
                Some(node) if node.is_translatable() => {
                    node.translation_for(lang).map(str::to_string)
                }
                _ => continue,
            };
            match translated {
                Some(text) => page.set_text(id, text),
                None => missing += 1,
            }
        }
        if missing > 0 {
            debug!(
                "{} translatable node(s) have no '{}' text, left unchanged",
                missing,
                lang.code()
            );
        }
    }

    /// Hide every content block, then show only the ones tagged `lang`.
    /// Hiding first keeps at most one block visible per group even if tags
    /// were to overlap.
    fn toggle_content_blocks(&self, page: &mut PageModel, lang: Language) {
        let blocks = page.marked(|m| matches!(m, Marker::ContentBlock(_)));
        for id in &blocks {
            page.remove_class(*id, "active");
        }
        for id in &blocks {
            let matches = page
                .get(*id)
                .and_then(|n| n.content_block_language())
                .map(|block_lang| block_lang == lang)
                .unwrap_or(false);
            if matches {
                page.add_class(*id, "active");
            }
        }
    }

    /// Re-render a visible confirmation panel in place. The panel's first
    /// two children are its title and body; anything else means the panel
    /// is not in the expected shape and the step is skipped.
    fn refresh_confirmation_panel(&self, page: &mut PageModel, lang: Language) {
        let Some(panel) = page.first_marked(|m| matches!(m, Marker::FormSuccess)) else {
            return;
        };
        let children = page.children_of(panel);
        if children.len() < 2 {
            return;
        }

        let strings = strings_for(lang);
        page.set_text(children[0], strings.submission_title);
        page.set_text(children[1], strings.submission_body);
    }
}
