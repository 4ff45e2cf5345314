//! Helpers over the serialized rich-text form of a draft.
//!
//! Markup is treated as an opaque HTML-ish string here; structural parsing
//! lives in [`crate::editor::document`].

use regex::Regex;
use std::sync::LazyLock;

/// A tag, or an unterminated tag running to the end of the input.
static TAG_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid regex"));

/// A complete tag with at least one character inside.
static TAG_STRICT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Placeholder an emptied editing surface leaves behind.
pub const LINE_BREAK_PLACEHOLDER: &str = "<br>";

/// Replace every tag with a space and collapse whitespace runs.
pub fn visible_text(markup: &str) -> String {
    let spaced = TAG_LOOSE.replace_all(markup, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words once tags are removed.
pub fn word_count(markup: &str) -> usize {
    let text = visible_text(markup);
    if text.is_empty() {
        0
    } else {
        text.split_whitespace().count()
    }
}

/// True when there is nothing worth sending: empty after trimming, or only
/// the lone line-break placeholder.
pub fn is_blank_draft(markup: &str) -> bool {
    let trimmed = markup.trim();
    trimmed.is_empty() || trimmed == LINE_BREAK_PLACEHOLDER
}

/// Plain-text fallback for the clipboard: tags removed, nothing else touched.
pub fn plain_text(markup: &str) -> String {
    TAG_STRICT.replace_all(markup, "").into_owned()
}

/// Single-line preview used by history listings.
pub fn preview(markup: &str, max_chars: usize) -> String {
    let text = decode_entities(&visible_text(markup));
    if text.chars().count() <= max_chars {
        text
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated.trim_end())
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode the handful of entities an editing surface emits.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
