//! Inline span types.

use serde::{Deserialize, Serialize};

/// A run of inline text with a single emphasis style.
///
/// Payloads are already escaped for the layout stage's markup
/// (`<`, `>`, and `&` become entities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum InlineSpan {
    /// Unstyled text
    PlainText(String),

    /// `**bold**`
    Bold(String),

    /// `*italic*`
    Italic(String),

    /// `` `code` ``
    Code(String),
}

impl InlineSpan {
    /// Create a plain text span.
    pub fn plain(text: impl Into<String>) -> Self {
        InlineSpan::PlainText(text.into())
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold(text.into())
    }

    /// Create an italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        InlineSpan::Italic(text.into())
    }

    /// Create an inline code span.
    pub fn code(text: impl Into<String>) -> Self {
        InlineSpan::Code(text.into())
    }

    /// Get the span payload.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::PlainText(t)
            | InlineSpan::Bold(t)
            | InlineSpan::Italic(t)
            | InlineSpan::Code(t) => t,
        }
    }

    /// Check if this span carries any styling.
    pub fn is_styled(&self) -> bool {
        !matches!(self, InlineSpan::PlainText(_))
    }
}

/// Concatenate the payloads of a span sequence.
pub fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}
