// src/deck/cloze.rs
// Turns stored card text into what each side of the card shows.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::ModelType;

/// Shown in place of a hidden cloze answer that has no hint.
pub const CLOZE_PLACEHOLDER: &str = "[...]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

fn cloze_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // {{c1::answer}} or {{c1::answer::hint}}
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\{\{c\d+::(.*?)(?:::(.*?))?\}\}").expect("valid cloze pattern")
    })
}

/// Formats `text` for one side of a card. Cloze fronts hide every
/// `{{cN::...}}` span, cloze backs reveal it, basic text passes through.
pub fn format_content(text: &str, side: Side, model_type: ModelType) -> String {
    match model_type {
        ModelType::Basic => text.to_string(),
        ModelType::Cloze => cloze_pattern()
            .replace_all(text, |caps: &Captures| match side {
                Side::Front => match caps.get(2) {
                    Some(hint) => format!("[{}]", hint.as_str()),
                    None => CLOZE_PLACEHOLDER.to_string(),
                },
                Side::Back => caps[1].to_string(),
            })
            .into_owned(),
    }
}
