//! Document model types.
//!
//! This module defines the block-node representation that bridges the
//! markup parser and the external layout stage. Every value is built once
//! during a parse and handed over read-only.

mod block;
mod config;
mod document;
mod inline;
mod table;

pub use block::{
    Block, Callout, CalloutKind, CalloutStyle, CodeBlock, Figure, Heading, ListBlock, Paragraph,
};
pub use config::{key_type, DocumentConfig, KeyType, ALLOWED_KEYS, DEFAULT_TOC_MAX_LEVEL, DEFAULT_TOC_TITLE};
pub use document::{Document, Outline, OutlineItem};
pub use inline::{spans_text, InlineSpan};
pub use table::{Cell, ColumnAlignment, Table};
