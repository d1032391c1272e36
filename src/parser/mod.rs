//! Markup parsing module.
//!
//! Pipeline: normalize every line, consume the optional `[DOC ...]` header,
//! then classify the remaining lines into blocks.

mod classifier;
mod figure;
mod header;
mod inline;
mod normalize;
mod options;
mod table;
mod tokenize;

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Document;

pub use classifier::{needs_page_break, slugify, BlockParser, SourceLine};
pub use figure::parse_figure;
pub use header::{parse_header, Header};
pub use inline::parse_inline;
pub use normalize::{normalize_line, normalize_lines};
pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_DEPTH, DEFAULT_ZOOM};
pub use table::parse_table;
pub use tokenize::{tokenize, UnbalancedQuote};

/// Source document parser.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    options: ParseOptions,
}

impl DocumentParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse document text.
    pub fn parse_str(&self, text: &str) -> Result<Document> {
        let lines = normalize_lines(&text.lines().collect::<Vec<_>>());
        let header = parse_header(&lines, &self.options)?;

        let body: Vec<SourceLine> = lines
            .into_iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != header.index)
            .map(|(i, text)| SourceLine::new(i + 1, text))
            .collect();

        let blocks = BlockParser::new(&self.options).parse(&body)?;
        log::debug!("parsed {} top-level blocks", blocks.len());

        let mut document = Document::new(header.config, blocks);
        document.unknown_keys = header.unknown_keys;
        Ok(document)
    }

    /// Parse a document from a file. Errors carry the file path.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut document = self.parse_str(&text).map_err(|e| e.in_file(path))?;
        document.source = Some(path.to_path_buf());
        Ok(document)
    }

    /// Parse a document from a reader.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Document> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    #[test]
    fn test_header_line_is_consumed() {
        let doc = DocumentParser::new()
            .parse_str("[DOC title=\"Redes\"]\n1. Capas\ntexto")
            .unwrap();
        assert_eq!(doc.config.title.as_deref(), Some("Redes"));
        assert_eq!(doc.block_count(), 2);
        assert!(doc.blocks[0].is_heading());
    }

    #[test]
    fn test_line_numbers_account_for_header() {
        let err = DocumentParser::new()
            .parse_str("[DOC]\n\n```\nsin cierre")
            .unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_normalization_before_classification() {
        let doc = DocumentParser::new().parse_str("a → b").unwrap();
        assert_eq!(doc.blocks[0].plain_text(), "a -&gt; b");
    }

    #[test]
    fn test_empty_input() {
        let doc = DocumentParser::new().parse_str("").unwrap();
        assert!(doc.is_empty());
        assert!(doc.unknown_keys.is_empty());
    }

    #[test]
    fn test_parse_reader() {
        let doc = DocumentParser::new()
            .parse_reader("- a\n- b".as_bytes())
            .unwrap();
        assert!(matches!(doc.blocks[0], Block::List(_)));
    }

    #[test]
    fn test_idempotent() {
        let text = "[DOC title=x]\n1. A\n:::tip\n**b**\n:::\n| a |\n";
        let parser = DocumentParser::new();
        assert_eq!(parser.parse_str(text).unwrap(), parser.parse_str(text).unwrap());
    }
}
