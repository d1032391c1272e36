//! Visitor pattern for walking the block tree.
//!
//! The layout stage drives rendering through [`walk_blocks`], which calls a
//! [`BlockVisitor`] for every block in source order and descends into
//! callout bodies.
//!
//! # Example
//!
//! ```
//! use txtpdf::model::Figure;
//! use txtpdf::render::visitor::{walk_blocks, BlockVisitor, VisitorAction};
//!
//! struct FigureCounter(usize);
//!
//! impl BlockVisitor for FigureCounter {
//!     fn visit_figure(&mut self, _figure: &Figure) -> VisitorAction {
//!         self.0 += 1;
//!         VisitorAction::Continue
//!     }
//! }
//!
//! let doc = txtpdf::parse_str("[FIG file=a.pdf page=1]\n:::tip\n[FIG file=b.pdf page=2]\n:::").unwrap();
//! let mut counter = FigureCounter(0);
//! walk_blocks(&doc.blocks, &mut counter);
//! assert_eq!(counter.0, 2);
//! ```

use std::collections::BTreeMap;

use crate::model::{Block, Callout, CodeBlock, Figure, Heading, ListBlock, Paragraph, Table};

/// Action returned by visitor methods to control the walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Keep walking (into callout bodies too).
    #[default]
    Continue,

    /// Do not descend into this block's body.
    Skip,

    /// Stop the walk.
    Stop,
}

impl VisitorAction {
    /// Check if this action skips the block's children.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action ends the walk.
    pub fn should_stop(&self) -> bool {
        matches!(self, VisitorAction::Stop)
    }
}

/// Trait for visiting blocks.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait BlockVisitor {
    fn visit_heading(&mut self, heading: &Heading) -> VisitorAction {
        let _ = heading;
        VisitorAction::Continue
    }

    fn visit_paragraph(&mut self, para: &Paragraph) -> VisitorAction {
        let _ = para;
        VisitorAction::Continue
    }

    fn visit_list(&mut self, list: &ListBlock) -> VisitorAction {
        let _ = list;
        VisitorAction::Continue
    }

    fn visit_code(&mut self, code: &CodeBlock) -> VisitorAction {
        let _ = code;
        VisitorAction::Continue
    }

    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    fn visit_figure(&mut self, figure: &Figure) -> VisitorAction {
        let _ = figure;
        VisitorAction::Continue
    }

    fn visit_separator(&mut self) -> VisitorAction {
        VisitorAction::Continue
    }

    fn visit_page_break(&mut self) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Called before a callout body. Return `Skip` to leave the body unvisited.
    fn enter_callout(&mut self, callout: &Callout) -> VisitorAction {
        let _ = callout;
        VisitorAction::Continue
    }

    /// Called after a callout body (also when it was skipped).
    fn leave_callout(&mut self, callout: &Callout) {
        let _ = callout;
    }
}

/// Walk `blocks` depth-first in source order.
///
/// Returns `VisitorAction::Stop` if the visitor stopped the walk.
pub fn walk_blocks<V: BlockVisitor + ?Sized>(blocks: &[Block], visitor: &mut V) -> VisitorAction {
    for block in blocks {
        let action = match block {
            Block::Heading(h) => visitor.visit_heading(h),
            Block::Paragraph(p) => visitor.visit_paragraph(p),
            Block::List(l) => visitor.visit_list(l),
            Block::Code(c) => visitor.visit_code(c),
            Block::Table(t) => visitor.visit_table(t),
            Block::Figure(f) => visitor.visit_figure(f),
            Block::Separator => visitor.visit_separator(),
            Block::PageBreak => visitor.visit_page_break(),
            Block::Callout(c) => {
                let action = visitor.enter_callout(c);
                let action = match action {
                    VisitorAction::Continue => walk_blocks(&c.body, visitor),
                    other => other,
                };
                visitor.leave_callout(c);
                action
            }
        };
        if action.should_stop() {
            return VisitorAction::Stop;
        }
    }
    VisitorAction::Continue
}

/// Visitor that counts blocks by kind, callout bodies included.
#[derive(Debug, Clone, Default)]
pub struct BlockStats {
    counts: BTreeMap<&'static str, usize>,
}

impl BlockStats {
    /// Create empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks of a sequence.
    pub fn collect(blocks: &[Block]) -> Self {
        let mut stats = Self::new();
        walk_blocks(blocks, &mut stats);
        stats
    }

    /// Number of blocks of one kind (see [`Block::kind_name`]).
    pub fn count(&self, kind: &str) -> usize {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Total number of blocks.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Per-kind counts, sorted by kind name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    fn bump(&mut self, kind: &'static str) -> VisitorAction {
        *self.counts.entry(kind).or_insert(0) += 1;
        VisitorAction::Continue
    }
}

impl BlockVisitor for BlockStats {
    fn visit_heading(&mut self, _heading: &Heading) -> VisitorAction {
        self.bump("heading")
    }

    fn visit_paragraph(&mut self, _para: &Paragraph) -> VisitorAction {
        self.bump("paragraph")
    }

    fn visit_list(&mut self, _list: &ListBlock) -> VisitorAction {
        self.bump("list")
    }

    fn visit_code(&mut self, _code: &CodeBlock) -> VisitorAction {
        self.bump("code")
    }

    fn visit_table(&mut self, _table: &Table) -> VisitorAction {
        self.bump("table")
    }

    fn visit_figure(&mut self, _figure: &Figure) -> VisitorAction {
        self.bump("figure")
    }

    fn visit_separator(&mut self) -> VisitorAction {
        self.bump("separator")
    }

    fn visit_page_break(&mut self) -> VisitorAction {
        self.bump("pagebreak")
    }

    fn enter_callout(&mut self, _callout: &Callout) -> VisitorAction {
        self.bump("callout")
    }
}
