//! Plain text rendering for parsed documents.

use crate::error::Result;
use crate::model::{
    spans_text, Callout, CodeBlock, Document, Figure, Heading, InlineSpan, ListBlock, Paragraph,
    Table,
};

use super::visitor::{walk_blocks, BlockVisitor, VisitorAction};

/// Convert a document to plain text.
///
/// Inline markup is dropped and escaped entities are decoded. Callout
/// bodies are indented under a `[Title]` line.
pub fn to_text(doc: &Document) -> Result<String> {
    let mut renderer = TextRenderer::default();

    if doc.config.include_title_block {
        if let Some(ref title) = doc.config.title {
            renderer.push(title.clone());
            if let Some(ref subtitle) = doc.config.subtitle {
                renderer.push(subtitle.clone());
            }
        }
    }

    walk_blocks(&doc.blocks, &mut renderer);
    Ok(renderer.finish())
}

#[derive(Default)]
struct TextRenderer {
    chunks: Vec<String>,
    indent: usize,
}

impl TextRenderer {
    fn push(&mut self, text: String) {
        let pad = "  ".repeat(self.indent);
        let indented = text
            .lines()
            .map(|l| {
                if l.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", pad, l)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.chunks.push(indented);
    }

    fn finish(self) -> String {
        self.chunks.join("\n\n").trim().to_string()
    }
}

fn plain(spans: &[InlineSpan]) -> String {
    html_escape::decode_html_entities(&spans_text(spans)).into_owned()
}

impl BlockVisitor for TextRenderer {
    fn visit_heading(&mut self, heading: &Heading) -> VisitorAction {
        self.push(heading.display_text());
        VisitorAction::Continue
    }

    fn visit_paragraph(&mut self, para: &Paragraph) -> VisitorAction {
        self.push(plain(&para.spans));
        VisitorAction::Continue
    }

    fn visit_list(&mut self, list: &ListBlock) -> VisitorAction {
        let items = list
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if list.ordered {
                    format!("{}) {}", i + 1, plain(item))
                } else {
                    format!("- {}", plain(item))
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.push(items);
        VisitorAction::Continue
    }

    fn visit_code(&mut self, code: &CodeBlock) -> VisitorAction {
        let body = code
            .lines
            .iter()
            .map(|l| format!("    {}", l))
            .collect::<Vec<_>>()
            .join("\n");
        self.push(format!("{}:\n{}", code.title(), body));
        VisitorAction::Continue
    }

    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let mut text = String::new();
        if let Some(ref caption) = table.caption {
            text.push_str(caption);
            text.push('\n');
        }
        let rows = std::iter::once(&table.header)
            .chain(table.rows.iter())
            .map(|row| row.iter().map(|c| plain(c)).collect::<Vec<_>>().join(" | "))
            .collect::<Vec<_>>()
            .join("\n");
        text.push_str(&rows);
        self.push(text);
        VisitorAction::Continue
    }

    fn visit_figure(&mut self, figure: &Figure) -> VisitorAction {
        self.push(format!("[Figura: {}]", figure.caption_or_default()));
        VisitorAction::Continue
    }

    fn visit_separator(&mut self) -> VisitorAction {
        self.push("-----".to_string());
        VisitorAction::Continue
    }

    fn enter_callout(&mut self, callout: &Callout) -> VisitorAction {
        let title = callout
            .title
            .clone()
            .unwrap_or_else(|| callout.kind.default_title());
        self.push(format!("[{}]", title));
        self.indent += 1;
        VisitorAction::Continue
    }

    fn leave_callout(&mut self, _callout: &Callout) {
        self.indent = self.indent.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DocumentParser;

    fn render(text: &str) -> String {
        let doc = DocumentParser::new().parse_str(text).unwrap();
        to_text(&doc).unwrap()
    }

    #[test]
    fn test_to_text() {
        let text = render("[DOC title=\"Redes\"]\n1. Capas\nLa capa **física** & más.\n- a\n- b");
        assert_eq!(text, "Redes\n\n1. Capas\n\nLa capa física & más.\n\n- a\n- b");
    }

    #[test]
    fn test_title_block_disabled() {
        let text = render("[DOC title=Redes include_title_block=false]\nhola");
        assert_eq!(text, "hola");
    }

    #[test]
    fn test_callout_indentation() {
        let text = render(":::warn\nCuidado\n:::");
        assert_eq!(text, "[Atención]\n\n  Cuidado");
    }

    #[test]
    fn test_code_and_figure() {
        let text = render("```c\nint x;\n```\n[FIG file=t.pdf page=2]");
        assert_eq!(text, "Código (c):\n    int x;\n\n[Figura: Fuente: t.pdf, pág. 2]");
    }
}
