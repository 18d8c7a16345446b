//! Simulated contact form: local validation, confirmation panel, field
//! focus styling. Nothing leaves the page.

use tracing::{debug, info};

use crate::i18n::{strings_for, Language};
use crate::page::{Marker, NodeId, NodeSpec, PageModel};

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All fields filled; the form was replaced by the confirmation panel
    Accepted,
    /// A required field was empty (or the form is absent); nothing changed
    Rejected,
}

/// Simulate submitting the form. Validation only checks that name, email
/// and message are non-empty. On success the form wrapper's content is
/// replaced with the confirmation panel, localized for `lang`.
pub fn submit(page: &mut PageModel, lang: Language) -> SubmitOutcome {
    let Some(form) = page.first_marked(|m| matches!(m, Marker::ContactForm)) else {
        return SubmitOutcome::Rejected;
    };

    for name in ["name", "email", "message"] {
        let filled = field(page, name)
            .and_then(|id| page.get(id))
            .map(|n| !n.text().is_empty())
            .unwrap_or(false);
        if !filled {
            debug!("form submission rejected: '{}' is empty", name);
            return SubmitOutcome::Rejected;
        }
    }

    let Some(wrapper) = page.parent_of(form) else {
        return SubmitOutcome::Rejected;
    };
    page.remove_children(wrapper);

    let strings = strings_for(lang);
    let panel = page.insert(
        Some(wrapper),
        NodeSpec {
            classes: vec!["form-success".to_string()],
            markers: vec![Marker::FormSuccess],
            ..Default::default()
        },
    );
    page.insert(
        Some(panel),
        NodeSpec {
            text: strings.submission_title.to_string(),
            ..Default::default()
        },
    );
    page.insert(
        Some(panel),
        NodeSpec {
            text: strings.submission_body.to_string(),
            ..Default::default()
        },
    );

    info!("form submission simulated, panel shown in '{}'", lang.code());
    SubmitOutcome::Accepted
}

/// Record a value typed into a field.
pub fn set_field_value(page: &mut PageModel, name: &str, value: impl Into<String>) {
    if let Some(id) = field(page, name) {
        page.set_text(id, value);
    }
}

/// Field gained focus: its group (parent) gets the `focused` class.
pub fn focus_field(page: &mut PageModel, name: &str) {
    if let Some(group) = field_group(page, name) {
        page.add_class(group, "focused");
    }
}

/// Field lost focus: drop `focused`, keep `has-value` iff text remains.
pub fn blur_field(page: &mut PageModel, name: &str) {
    let Some(id) = field(page, name) else { return };
    let has_value = page.get(id).map(|n| !n.text().is_empty()).unwrap_or(false);
    if let Some(group) = page.parent_of(id) {
        page.remove_class(group, "focused");
        page.toggle_class(group, "has-value", has_value);
    }
}

fn field(page: &PageModel, name: &str) -> Option<NodeId> {
    page.first_marked(|m| matches!(m, Marker::FormField(field_name) if field_name == name))
}

fn field_group(page: &PageModel, name: &str) -> Option<NodeId> {
    field(page, name).and_then(|id| page.parent_of(id))
}
