//! Integration tests for batch parsing.

use std::fs;

use tempfile::TempDir;
use txtpdf::batch::count_ok;
use txtpdf::{parse_files, Error, ParseOptions};

#[test]
fn test_batch_mixed_results() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("a.txt");
    let broken = dir.path().join("b.txt");
    let strict_only = dir.path().join("c.txt");
    let missing = dir.path().join("missing.txt");
    fs::write(&good, "[DOC title=\"A\"]\n1. Intro\ntexto").unwrap();
    fs::write(&broken, "```\nsin cerrar").unwrap();
    fs::write(&strict_only, "[DOC colour=red]\ntexto").unwrap();

    let paths = vec![good.clone(), broken.clone(), strict_only.clone(), missing.clone()];

    let entries = parse_files(&paths, &ParseOptions::default());
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].path, good);
    assert_eq!(entries[3].path, missing);
    assert_eq!(count_ok(&entries), 2);
    assert!(entries[0].is_ok());
    assert!(!entries[1].is_ok());
    assert!(entries[2].is_ok());

    let entries = parse_files(&paths, &ParseOptions::new().strict());
    assert_eq!(count_ok(&entries), 1);
    match entries[2].result {
        Err(ref e) => assert_eq!(e.line(), Some(1)),
        Ok(_) => panic!("strict mode should reject unknown keys"),
    }
}

#[test]
fn test_batch_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("roto.txt");
    fs::write(&broken, "intro\n:::def\nsin cierre").unwrap();

    let entries = parse_files(&[&broken], &ParseOptions::default());
    match entries[0].result {
        Err(Error::InFile { ref path, ref source }) => {
            assert_eq!(path, &broken);
            assert!(matches!(**source, Error::UnterminatedBlock { line: 2, .. }));
        }
        ref other => panic!("expected InFile error, got {:?}", other),
    }
    assert!(entries[0].result.as_ref().unwrap_err().to_string().contains("roto.txt"));
}

#[test]
fn test_batch_empty_input() {
    let paths: Vec<std::path::PathBuf> = Vec::new();
    assert!(parse_files(&paths, &ParseOptions::default()).is_empty());
}
