//! Parallel parsing of many source files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Document;
use crate::parser::{DocumentParser, ParseOptions};

/// Outcome of parsing one file in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    /// Source file
    pub path: PathBuf,

    /// Parsed document or the error that aborted it
    pub result: Result<Document>,
}

impl BatchEntry {
    /// Check if the file parsed successfully.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Parse `paths` concurrently. Results keep the input order and one
/// failure never affects the other files.
pub fn parse_files<P>(paths: &[P], options: &ParseOptions) -> Vec<BatchEntry>
where
    P: AsRef<Path> + Sync,
{
    let parser = DocumentParser::with_options(options.clone());
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            BatchEntry {
                path: path.to_path_buf(),
                result: parser.parse_file(path),
            }
        })
        .collect()
}

/// Count the successful entries of a batch.
pub fn count_ok(entries: &[BatchEntry]) -> usize {
    entries.iter().filter(|e| e.is_ok()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_files_keeps_order_and_isolates_errors() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("a.txt");
        let bad = dir.path().join("b.txt");
        let missing = dir.path().join("c.txt");
        fs::write(&good, "1. Intro\ntexto").unwrap();
        fs::write(&bad, "```\nsin cierre").unwrap();

        let entries = parse_files(&[&good, &bad, &missing], &ParseOptions::default());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].path, good);
        assert!(entries[0].is_ok());
        assert!(!entries[1].is_ok());
        assert!(!entries[2].is_ok());
        assert_eq!(count_ok(&entries), 1);
    }
}
