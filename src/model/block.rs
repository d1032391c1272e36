//! Block-level types.

use super::{spans_text, InlineSpan, Table};
use serde::{Deserialize, Serialize};

/// One structural unit of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A numbered or ruled heading
    Heading(Heading),

    /// A paragraph of inline text
    Paragraph(Paragraph),

    /// A flat ordered or unordered list
    List(ListBlock),

    /// Fenced or indented code
    Code(CodeBlock),

    /// A highlighted region whose body is itself a block sequence
    Callout(Callout),

    /// A pipe table
    Table(Table),

    /// A page captured from a reference PDF
    Figure(Figure),

    /// A horizontal rule
    Separator,

    /// A manual page break
    PageBreak,
}

impl Block {
    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading(_))
    }

    /// Get the heading if this block is one.
    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(h) => Some(h),
            _ => None,
        }
    }

    /// Short lowercase name of the block kind, used in logs and CLI output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::List(_) => "list",
            Block::Code(_) => "code",
            Block::Callout(_) => "callout",
            Block::Table(_) => "table",
            Block::Figure(_) => "figure",
            Block::Separator => "separator",
            Block::PageBreak => "pagebreak",
        }
    }

    /// Get plain text content of the block (callout bodies included).
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading(h) => h.display_text(),
            Block::Paragraph(p) => p.plain_text(),
            Block::List(l) => l
                .items
                .iter()
                .map(|item| spans_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Code(c) => c.lines.join("\n"),
            Block::Callout(c) => {
                let mut parts = Vec::new();
                if let Some(ref title) = c.title {
                    parts.push(title.clone());
                }
                parts.extend(c.body.iter().map(Block::plain_text));
                parts.join("\n\n")
            }
            Block::Table(t) => t.plain_text(),
            Block::Figure(f) => f.caption_or_default(),
            Block::Separator | Block::PageBreak => String::new(),
        }
    }
}

/// A heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Depth (1 = top level)
    pub level: u8,

    /// Title text without the numbering prefix
    pub text: String,

    /// Dotted numbering such as `2.1`, if present
    pub numbering: Option<String>,

    /// Inline-parsed title
    pub spans: Vec<InlineSpan>,

    /// The layout stage should start a new page before this heading
    pub page_break_before: bool,

    /// Document-unique anchor key for TOC links and bookmarks
    pub anchor: String,

    /// Heading appears inside a callout body (excluded from the TOC)
    pub in_callout: bool,
}

impl Heading {
    /// Title as displayed, with the numbering prefix.
    pub fn display_text(&self) -> String {
        match self.numbering {
            Some(ref num) => format!("{}. {}", num, self.text),
            None => self.text.clone(),
        }
    }

    /// Check if this heading is rendered in the top visual tier.
    pub fn is_top_level(&self) -> bool {
        self.level <= 1
    }
}

/// A paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content
    pub spans: Vec<InlineSpan>,
}

impl Paragraph {
    /// Create a paragraph from spans.
    pub fn new(spans: Vec<InlineSpan>) -> Self {
        Self { spans }
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        spans_text(&self.spans)
    }
}

/// A flat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    /// `N)` / `N.` markers rather than bullets
    pub ordered: bool,

    /// Item contents, in order
    pub items: Vec<Vec<InlineSpan>>,
}

/// A code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag from a fenced opener
    pub language: Option<String>,

    /// Raw lines, verbatim
    pub lines: Vec<String>,

    /// May be split across pages. Fenced code is splittable; indented
    /// code is laid out as a single unit.
    pub splittable: bool,
}

impl CodeBlock {
    /// Title the layout stage shows above the block.
    pub fn title(&self) -> String {
        match (self.splittable, self.language.as_deref()) {
            (false, _) => "Procedimiento".to_string(),
            (true, Some(lang)) => format!("Código ({})", lang),
            (true, None) => "Código".to_string(),
        }
    }
}

/// A callout box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    /// Semantic kind
    pub kind: CalloutKind,

    /// Box title
    pub title: Option<String>,

    /// Body blocks, parsed as an independent mini-document
    pub body: Vec<Block>,
}

/// Semantic kind of a callout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutKind {
    Note,
    Tip,
    Warn,
    Danger,
    Info,
    Check,
    /// `:::def`
    Definition,
    /// `:::ej`
    Example,
    /// `:::error`
    Error,
    /// Any other `:::name`
    Custom(String),
}

impl CalloutKind {
    /// Kind for a `:::name` opener (name already lowercased).
    pub fn from_fence_name(name: &str) -> Self {
        match name {
            "def" => CalloutKind::Definition,
            "ej" => CalloutKind::Example,
            "error" => CalloutKind::Error,
            other => Self::from_legacy_name(other)
                .unwrap_or_else(|| CalloutKind::Custom(other.to_string())),
        }
    }

    /// Kind for a `[NAME]` legacy opener, case-insensitive. `None` for
    /// names outside NOTE, TIP, WARN, DANGER, INFO, CHECK.
    pub fn from_legacy_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "note" => Some(CalloutKind::Note),
            "tip" => Some(CalloutKind::Tip),
            "warn" => Some(CalloutKind::Warn),
            "danger" => Some(CalloutKind::Danger),
            "info" => Some(CalloutKind::Info),
            "check" => Some(CalloutKind::Check),
            _ => None,
        }
    }

    /// Visual style of the box.
    pub fn style(&self) -> CalloutStyle {
        match self {
            CalloutKind::Note | CalloutKind::Tip | CalloutKind::Definition => CalloutStyle::Note,
            CalloutKind::Warn => CalloutStyle::Warn,
            CalloutKind::Danger | CalloutKind::Error => CalloutStyle::Danger,
            CalloutKind::Info
            | CalloutKind::Check
            | CalloutKind::Example
            | CalloutKind::Custom(_) => CalloutStyle::Info,
        }
    }

    /// Title used when a `:::` opener gives none.
    pub fn default_title(&self) -> String {
        match self {
            CalloutKind::Note => "Nota".to_string(),
            CalloutKind::Tip => "Tip".to_string(),
            CalloutKind::Warn => "Atención".to_string(),
            CalloutKind::Danger => "Peligro".to_string(),
            CalloutKind::Info => "Info".to_string(),
            CalloutKind::Check => "Checklist".to_string(),
            CalloutKind::Definition => "Definición".to_string(),
            CalloutKind::Example => "Ejemplo".to_string(),
            CalloutKind::Error => "Error típico".to_string(),
            CalloutKind::Custom(name) => name.to_uppercase(),
        }
    }
}

/// Visual style (color scheme) of a callout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutStyle {
    Note,
    Info,
    Warn,
    Danger,
}

/// A figure captured from one page of a reference PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Source PDF file name, resolved by the figure resolver
    pub file: String,

    /// Page number (1-based)
    pub page: u32,

    /// Caption text
    pub caption: Option<String>,

    /// Rasterization zoom factor
    pub zoom: f64,
}

impl Figure {
    /// Caption, or a source attribution when none was given.
    pub fn caption_or_default(&self) -> String {
        match self.caption {
            Some(ref caption) => caption.clone(),
            None => format!("Fuente: {}, pág. {}", self.file, self.page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, numbering: Option<&str>, text: &str) -> Heading {
        Heading {
            level,
            text: text.to_string(),
            numbering: numbering.map(str::to_string),
            spans: vec![InlineSpan::plain(text)],
            page_break_before: false,
            anchor: "sec".to_string(),
            in_callout: false,
        }
    }

    #[test]
    fn test_heading_display_text() {
        assert_eq!(heading(2, Some("1.2"), "Cache").display_text(), "1.2. Cache");
        assert_eq!(heading(1, None, "Intro").display_text(), "Intro");
        assert!(heading(1, None, "Intro").is_top_level());
    }

    #[test]
    fn test_callout_kinds() {
        assert_eq!(CalloutKind::from_fence_name("def"), CalloutKind::Definition);
        assert_eq!(CalloutKind::from_fence_name("warn"), CalloutKind::Warn);
        assert_eq!(
            CalloutKind::from_fence_name("resumen"),
            CalloutKind::Custom("resumen".to_string())
        );
        assert_eq!(CalloutKind::from_legacy_name("DaNgEr"), Some(CalloutKind::Danger));
        assert_eq!(CalloutKind::from_legacy_name("quote"), None);

        assert_eq!(CalloutKind::Definition.default_title(), "Definición");
        assert_eq!(CalloutKind::Custom("resumen".into()).default_title(), "RESUMEN");
        assert_eq!(CalloutKind::Error.style(), CalloutStyle::Danger);
        assert_eq!(CalloutKind::Tip.style(), CalloutStyle::Note);
    }

    #[test]
    fn test_code_title() {
        let fenced = CodeBlock {
            language: Some("c".to_string()),
            lines: vec![],
            splittable: true,
        };
        assert_eq!(fenced.title(), "Código (c)");

        let indented = CodeBlock {
            language: None,
            lines: vec![],
            splittable: false,
        };
        assert_eq!(indented.title(), "Procedimiento");
    }

    #[test]
    fn test_figure_default_caption() {
        let fig = Figure {
            file: "teo.pdf".to_string(),
            page: 4,
            caption: None,
            zoom: 2.0,
        };
        assert_eq!(fig.caption_or_default(), "Fuente: teo.pdf, pág. 4");
    }

    #[test]
    fn test_block_plain_text() {
        let callout = Block::Callout(Callout {
            kind: CalloutKind::Note,
            title: Some("Ojo".to_string()),
            body: vec![Block::Paragraph(Paragraph::new(vec![InlineSpan::plain("cuerpo")]))],
        });
        assert_eq!(callout.plain_text(), "Ojo\n\ncuerpo");
        assert_eq!(Block::Separator.plain_text(), "");
        assert_eq!(callout.kind_name(), "callout");
    }
}
