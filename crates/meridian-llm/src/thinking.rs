//! Thinking extraction
//!
//! Splits assistant text into the visible answer and inline reasoning
//! delimited by `<thinking>...</thinking>` or `<think>...</think>`.

use regex::Regex;

lazy_static::lazy_static! {
    static ref LONG_FORM: Regex =
        Regex::new(r"(?s)<thinking>(.*?)</thinking>").expect("thinking tag regex");
    static ref SHORT_FORM: Regex =
        Regex::new(r"(?s)<think>(.*?)</think>").expect("think tag regex");
}

/// Result of splitting assistant text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinkingSplit {
    /// Text with the reasoning span removed (untrimmed)
    pub visible: String,
    /// Captured reasoning, if a delimiter pair was found
    pub reasoning: Option<String>,
}

/// Extract the first delimited reasoning segment from `text`.
///
/// The long form is tried first and removed from the text; the short form is
/// then searched in what remains. When both match, the short-form capture is
/// the one reported.
#[must_use]
pub fn extract_thinking(text: &str) -> ThinkingSplit {
    let mut visible = text.to_string();
    let mut reasoning = None;

    for pattern in [&*LONG_FORM, &*SHORT_FORM] {
        if let Some(found) = take_first(pattern, &visible) {
            visible = found.0;
            reasoning = Some(found.1);
        }
    }

    ThinkingSplit { visible, reasoning }
}

fn take_first(pattern: &Regex, text: &str) -> Option<(String, String)> {
    let caps = pattern.captures(text)?;
    let span = caps.get(0)?;
    let inner = caps.get(1).map_or("", |m| m.as_str()).to_string();

    let mut remaining = String::with_capacity(text.len() - span.len());
    remaining.push_str(&text[..span.start()]);
    remaining.push_str(&text[span.end()..]);

    Some((remaining, inner))
}
