//! Document-level types.

use super::{Block, DocumentConfig, Figure, Heading};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A parsed source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Settings from the `[DOC ...]` header (defaults when absent)
    pub config: DocumentConfig,

    /// Top-level blocks in source order
    pub blocks: Vec<Block>,

    /// Header keys outside the whitelist that were ignored
    pub unknown_keys: Vec<String>,

    /// Source file, when parsed from disk
    pub source: Option<PathBuf>,
}

impl Document {
    /// Create a document from its parts.
    pub fn new(config: DocumentConfig, blocks: Vec<Block>) -> Self {
        Self {
            config,
            blocks,
            unknown_keys: Vec::new(),
            source: None,
        }
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// All headings, including those inside callout bodies, in source order.
    pub fn headings(&self) -> Vec<&Heading> {
        let mut out = Vec::new();
        for block in walk(&self.blocks) {
            if let Block::Heading(h) = block {
                out.push(h);
            }
        }
        out
    }

    /// All figure directives, including those inside callout bodies.
    pub fn figures(&self) -> Vec<&Figure> {
        let mut out = Vec::new();
        for block in walk(&self.blocks) {
            if let Block::Figure(f) = block {
                out.push(f);
            }
        }
        out
    }

    /// Build the table of contents.
    ///
    /// Lists headings outside callouts up to `toc_max_level`, nested by
    /// level. Returns an empty outline when `include_toc` is off.
    pub fn outline(&self) -> Outline {
        let mut outline = Outline::new();
        if !self.config.include_toc {
            return outline;
        }

        for heading in self.headings() {
            if heading.in_callout || !self.config.toc_includes_level(heading.level) {
                continue;
            }
            outline.insert(OutlineItem::new(
                heading.display_text(),
                heading.anchor.clone(),
                heading.level,
            ));
        }
        outline
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Depth-first, pre-order list of blocks, descending into callout bodies.
fn walk(blocks: &[Block]) -> Vec<&Block> {
    let mut out = Vec::new();
    for block in blocks {
        out.push(block);
        if let Block::Callout(c) = block {
            out.extend(walk(&c.body));
        }
    }
    out
}

/// Document outline (table of contents / bookmarks).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Top-level outline items
    pub items: Vec<OutlineItem>,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert an item under the most recent item of a lower level.
    pub fn insert(&mut self, item: OutlineItem) {
        fn place(items: &mut Vec<OutlineItem>, item: OutlineItem) {
            let nests = items.last().map_or(false, |last| last.level < item.level);
            if !nests {
                items.push(item);
            } else if let Some(last) = items.last_mut() {
                place(&mut last.children, item);
            }
        }
        place(&mut self.items, item);
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the total number of items (including nested).
    pub fn total_items(&self) -> usize {
        fn count_items(items: &[OutlineItem]) -> usize {
            items
                .iter()
                .map(|item| 1 + count_items(&item.children))
                .sum()
        }
        count_items(&self.items)
    }

    /// Flatten to `(depth, item)` pairs in document order, depth starting at 0.
    pub fn flatten(&self) -> Vec<(usize, &OutlineItem)> {
        fn walk<'a>(items: &'a [OutlineItem], depth: usize, out: &mut Vec<(usize, &'a OutlineItem)>) {
            for item in items {
                out.push((depth, item));
                walk(&item.children, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.items, 0, &mut out);
        out
    }
}

/// A single outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Entry title
    pub title: String,

    /// Anchor key of the heading
    pub anchor: String,

    /// Heading level (1 = top level)
    pub level: u8,

    /// Child items
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(title: impl Into<String>, anchor: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            anchor: anchor.into(),
            level,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Callout, CalloutKind, InlineSpan};

    fn heading(level: u8, text: &str, anchor: &str, in_callout: bool) -> Block {
        Block::Heading(Heading {
            level,
            text: text.to_string(),
            numbering: None,
            spans: vec![InlineSpan::plain(text)],
            page_break_before: level == 1,
            anchor: anchor.to_string(),
            in_callout,
        })
    }

    fn sample() -> Document {
        Document::new(
            DocumentConfig::default(),
            vec![
                heading(1, "Intro", "intro", false),
                heading(2, "Detalle", "detalle", false),
                heading(4, "Muy profundo", "muy-profundo", false),
                Block::Callout(Callout {
                    kind: CalloutKind::Note,
                    title: None,
                    body: vec![heading(2, "Interno", "interno", true)],
                }),
                heading(1, "Cierre", "cierre", false),
            ],
        )
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new(DocumentConfig::default(), Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_headings_include_callouts() {
        let doc = sample();
        assert_eq!(doc.headings().len(), 5);
    }

    #[test]
    fn test_outline_filters_and_nests() {
        let doc = sample();
        let outline = doc.outline();
        // "Muy profundo" (level 4) and the callout heading are excluded.
        assert_eq!(outline.total_items(), 3);
        assert_eq!(outline.items.len(), 2);
        assert_eq!(outline.items[0].children[0].anchor, "detalle");

        let flat = outline.flatten();
        assert_eq!(flat[1].0, 1);
        assert_eq!(flat[2].1.title, "Cierre");
    }

    #[test]
    fn test_outline_disabled() {
        let mut doc = sample();
        doc.config.include_toc = false;
        assert!(doc.outline().is_empty());
    }
}
