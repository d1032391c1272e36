//! Inline span parsing (`**bold**`, `*italic*`, `` `code` ``).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::InlineSpan;

// Alternation order sets the tie-break at one position: code, then bold, then italic.
static INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`|\*\*(.+?)\*\*|\*([^*]+)\*").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Split `text` into non-overlapping spans, scanning left to right.
///
/// Markers are not nested: the first marker found wins and its payload is
/// taken verbatim. Payloads are escaped for the layout markup.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(InlineSpan::plain(escape(&text[last..whole.start()])));
        }

        let span = if let Some(m) = caps.get(1) {
            InlineSpan::code(escape(m.as_str()))
        } else if let Some(m) = caps.get(2) {
            InlineSpan::bold(escape(m.as_str()))
        } else if let Some(m) = caps.get(3) {
            InlineSpan::italic(escape(m.as_str()))
        } else {
            continue;
        };
        spans.push(span);
        last = whole.end();
    }

    if last < text.len() {
        spans.push(InlineSpan::plain(escape(&text[last..])));
    }

    spans
}

/// Collapse whitespace runs to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}
