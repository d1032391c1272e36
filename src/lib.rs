//! # txtpdf
//!
//! Parser for a lightweight, line-oriented markup used to write study notes
//! that are laid out as PDF documents.
//!
//! The library turns source text into a sequence of typed blocks (headings,
//! paragraphs, lists, tables, code, callouts, figures, separators and page
//! breaks) plus a document configuration read from an optional `[DOC ...]`
//! header. Drawing the PDF is left to a layout stage that consumes the
//! block tree through [`render::visitor`].
//!
//! ## Quick Start
//!
//! ```
//! use txtpdf::{parse_str, Block};
//!
//! let doc = parse_str("[DOC title=\"Redes\"]\n1. Capas\nEl modelo **OSI**.")?;
//! assert_eq!(doc.config.title.as_deref(), Some("Redes"));
//! assert!(matches!(doc.blocks[0], Block::Heading(_)));
//! # Ok::<(), txtpdf::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Block classification**: headings, lists, pipe tables, fenced and indented code
//! - **Callouts**: `:::kind` and `[KIND]` boxes with recursively parsed bodies
//! - **Figures**: `[FIG ...]` directives resolved against the subject folders
//! - **Unicode normalization**: symbols the PDF core fonts cannot draw are replaced
//! - **Parallel processing**: batches of files are parsed with Rayon

pub mod batch;
pub mod error;
pub mod figure;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{parse_files, BatchEntry};
pub use error::{Error, Result};
pub use figure::{CacheStatus, FigureResolver, Rasterizer, ResolvedFigure};
pub use model::{
    Block, Callout, CalloutKind, CodeBlock, ColumnAlignment, Document, DocumentConfig, Figure,
    Heading, InlineSpan, ListBlock, Outline, OutlineItem, Paragraph, Table,
};
pub use parser::{DocumentParser, ErrorMode, ParseOptions};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse document text with default options.
pub fn parse_str(text: &str) -> Result<Document> {
    DocumentParser::new().parse_str(text)
}

/// Parse document text with custom options.
///
/// # Example
///
/// ```
/// use txtpdf::{parse_str_with_options, Error, ParseOptions};
///
/// let options = ParseOptions::new().strict();
/// let err = parse_str_with_options("[DOC colour=red]", options).unwrap_err();
/// assert!(matches!(err, Error::Config { line: 1, .. }));
/// ```
pub fn parse_str_with_options(text: &str, options: ParseOptions) -> Result<Document> {
    DocumentParser::with_options(options).parse_str(text)
}

/// Parse a source file.
///
/// # Example
///
/// ```no_run
/// use txtpdf::parse_file;
///
/// let doc = parse_file("Practico/03Practico/resumen.txt").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocumentParser::new().parse_file(path)
}

/// Parse a source file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    DocumentParser::with_options(options).parse_file(path)
}

/// Parse a document from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    DocumentParser::new().parse_reader(reader)
}

/// Convert a source file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc)
}

/// Convert a source file to a JSON dump of its block tree.
///
/// # Example
///
/// ```no_run
/// use txtpdf::{to_json, JsonFormat};
///
/// let json = to_json("resumen.txt", JsonFormat::Pretty).unwrap();
/// std::fs::write("resumen.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing source documents.
///
/// # Example
///
/// ```no_run
/// use txtpdf::Txtpdf;
///
/// let text = Txtpdf::new()
///     .strict()
///     .with_max_depth(8)
///     .parse_file("resumen.txt")?
///     .to_text()?;
/// # Ok::<(), txtpdf::Error>(())
/// ```
pub struct Txtpdf {
    parse_options: ParseOptions,
}

impl Txtpdf {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
        }
    }

    /// Enable strict parsing mode.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the maximum callout nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_depth(depth);
        self
    }

    /// Set the zoom used for figures without `zoom=`.
    pub fn with_default_zoom(mut self, zoom: f64) -> Self {
        self.parse_options = self.parse_options.with_default_zoom(zoom);
        self
    }

    /// Parse a source file and return a result wrapper.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<TxtpdfResult> {
        let document = DocumentParser::with_options(self.parse_options).parse_file(path)?;
        Ok(TxtpdfResult { document })
    }

    /// Parse document text.
    pub fn parse_str(self, text: &str) -> Result<TxtpdfResult> {
        let document = DocumentParser::with_options(self.parse_options).parse_str(text)?;
        Ok(TxtpdfResult { document })
    }
}

impl Default for Txtpdf {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a source document.
pub struct TxtpdfResult {
    /// The parsed document
    pub document: Document,
}

impl TxtpdfResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Table of contents.
    pub fn outline(&self) -> Outline {
        self.document.outline()
    }

    /// Get the underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume and return the document.
    pub fn into_document(self) -> Document {
        self.document
    }
}
