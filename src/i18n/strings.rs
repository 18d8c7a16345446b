use crate::i18n::Language;

/// Localized strings for the submission-confirmation panel.
///
/// The panel is the only piece of engine-owned copy; everything else on the
/// page carries its own per-language text. The table is embedded as literal
/// constants, never loaded from an external source.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    /// Panel heading shown after a successful (simulated) form submission
    pub submission_title: &'static str,

    /// Panel body text shown under the heading
    pub submission_body: &'static str,
}

/// French panel strings
pub const FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    submission_title: "Message envoyé !",
    submission_body: "Nous vous répondrons dans les plus brefs délais.",
};

/// German panel strings
pub const GERMAN_STRINGS: LanguageStrings = LanguageStrings {
    submission_title: "Nachricht gesendet!",
    submission_body: "Wir werden uns so schnell wie möglich bei Ihnen melden.",
};

/// English panel strings
pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    submission_title: "Message sent!",
    submission_body: "We will get back to you as soon as possible.",
};

/// Look up the panel strings for a language.
pub fn strings_for(language: Language) -> &'static LanguageStrings {
    match language.code() {
        "de" => &GERMAN_STRINGS,
        "en" => &ENGLISH_STRINGS,
        _ => &FRENCH_STRINGS,
    }
}
