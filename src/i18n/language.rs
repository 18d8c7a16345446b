//! Language type: validated language representation.
//!
//! A `Language` can only be constructed for a code present in the registry,
//! so every value flowing through the engine is known-good. Unregistered
//! codes surface as a typed error that callers are expected to swallow (an
//! unsupported switch request is a no-op, not a failure).

use crate::i18n::{LanguageConfig, LanguageRegistry};
use thiserror::Error;

/// Error returned when a language code is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language code: '{code}'")]
pub struct ParseLanguageError {
    /// The code that failed to parse
    pub code: String,
}

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "fr", "de", "en")
    code: &'static str,
}

impl Language {
    /// French, the language the page markup is authored in.
    pub const FRENCH: Language = Language { code: "fr" };

    /// German alternate.
    pub const GERMAN: Language = Language { code: "de" };

    /// English alternate.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered
    /// * `Err(ParseLanguageError)` otherwise
    pub fn from_code(code: &str) -> Result<Language, ParseLanguageError> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => Err(ParseLanguageError {
                code: code.to_string(),
            }),
        }
    }

    /// Get the page's default language (French).
    pub fn page_default() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a properly constructed Language.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::page_default()
    }
}
