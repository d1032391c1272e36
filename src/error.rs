//! Error types for the txtpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for txtpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing or resolving a document.
///
/// Every classification error carries the 1-based line number of the
/// offending line in the source file.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid `[DOC ...]` header: unknown key in strict mode or a value
    /// that does not match the key's type.
    #[error("line {line}: config error: {message} (in `{context}`)")]
    Config {
        line: usize,
        message: String,
        context: String,
    },

    /// A `[FIG ...]` directive is missing required fields or has malformed values.
    #[error("line {line}: figure syntax error: {message} (in `{context}`)")]
    FigureSyntax {
        line: usize,
        message: String,
        context: String,
    },

    /// A fenced, callout, or legacy-callout region was never closed.
    #[error("line {line}: unterminated {kind} block opened by `{context}`")]
    UnterminatedBlock {
        line: usize,
        kind: String,
        context: String,
    },

    /// Callout bodies are nested deeper than the configured limit.
    #[error("line {line}: nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep {
        line: usize,
        depth: usize,
        limit: usize,
    },

    /// A legacy `[KIND]...[/KIND]` region uses a kind outside the known set (strict mode).
    #[error("line {line}: unknown callout kind `{kind}`")]
    UnknownCallout { line: usize, kind: String },

    /// No candidate directory contained the figure's source PDF.
    #[error("figure source `{file}` not found (searched: {})", display_paths(.searched))]
    FigureNotFound { file: String, searched: Vec<PathBuf> },

    /// No ancestor of the given directory looks like a subject root.
    #[error("could not locate the subject root from {}", .0.display())]
    SubjectRootNotFound(PathBuf),

    /// Error while serializing a document dump.
    #[error("Rendering error: {0}")]
    Render(String),

    /// An error raised while processing a specific source file.
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the source file path to this error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::InFile { .. } => self,
            other => Error::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// Line number of the offending source line, if the error has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Config { line, .. }
            | Error::FigureSyntax { line, .. }
            | Error::UnterminatedBlock { line, .. }
            | Error::NestingTooDeep { line, .. }
            | Error::UnknownCallout { line, .. } => Some(*line),
            Error::InFile { source, .. } => source.line(),
            _ => None,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnterminatedBlock {
            line: 7,
            kind: "fenced code".to_string(),
            context: "```rust".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 7: unterminated fenced code block opened by ````rust`"
        );

        let err = Error::NestingTooDeep {
            line: 3,
            depth: 33,
            limit: 32,
        };
        assert_eq!(
            err.to_string(),
            "line 3: nesting depth 33 exceeds the limit of 32"
        );
    }

    #[test]
    fn test_figure_not_found_lists_paths() {
        let err = Error::FigureNotFound {
            file: "a.pdf".to_string(),
            searched: vec![PathBuf::from("x/a.pdf"), PathBuf::from("y/a.pdf")],
        };
        let msg = err.to_string();
        assert!(msg.contains("x/a.pdf"));
        assert!(msg.contains("y/a.pdf"));
    }

    #[test]
    fn test_in_file_keeps_line() {
        let err = Error::Config {
            line: 1,
            message: "unknown key `foo`".to_string(),
            context: "[DOC foo=1]".to_string(),
        }
        .in_file("notes.txt");
        assert_eq!(err.line(), Some(1));
        assert!(err.to_string().starts_with("notes.txt: line 1"));

        // Wrapping twice keeps the innermost path.
        let err = err.in_file("other.txt");
        assert!(err.to_string().starts_with("notes.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.line(), None);
    }
}
