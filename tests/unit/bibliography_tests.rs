/*!
 * Tests for bibliography parsing
 */

use std::io::Cursor;
use anyhow::Result;
use notes::errors::NotesError;
use notes::transpile::{Bibliography, BibliographyEntry};
use crate::common;

fn parse(source: &str) -> Bibliography {
    Bibliography::parse(Cursor::new(source)).unwrap()
}

/// Test that a well-formed bibliography yields one entry per key
#[test]
fn test_parse_withWellFormedEntries_shouldMapKeysToAuthorAndTitle() {
    let bibliography = parse(common::SAMPLE_BIBLIOGRAPHY);

    assert_eq!(bibliography.len(), 2);
    assert_eq!(
        bibliography.get("lang"),
        Some(&BibliographyEntry::new("Serge Lang", "Algebra"))
    );
    assert_eq!(
        bibliography.get("artin"),
        Some(&BibliographyEntry::new("Michael Artin", "Algebra"))
    );
}

/// Test that trailing commas and wrapping braces are stripped from values
#[test]
fn test_parse_withTrailingComma_shouldStripBracesAndComma() {
    let bibliography = parse("@article{euler,\n  title = {Solutio problematis},\n  author = {Leonhard Euler}\n}\n");

    let entry = bibliography.get("euler").unwrap();
    assert_eq!(entry.title, "Solutio problematis");
    assert_eq!(entry.author, "Leonhard Euler");
}

/// Test that an entry missing a field does not inherit the previous entry's value
#[test]
fn test_parse_withMissingAuthor_shouldLeaveAuthorEmpty() {
    let bibliography = parse(
        "@book{lang,\n  author = {Serge Lang},\n  title = {Algebra},\n}\n@misc{notes,\n  title = {Lecture notes},\n}\n",
    );

    let entry = bibliography.get("notes").unwrap();
    assert_eq!(entry.title, "Lecture notes");
    assert_eq!(entry.author, "");
}

/// Test that a repeated key keeps the later entry
#[test]
fn test_parse_withDuplicateKey_shouldKeepLastEntry() {
    let bibliography = parse(
        "@book{lang,\n  author = {Serge Lang},\n  title = {Algebra},\n}\n@book{lang,\n  author = {S. Lang},\n  title = {Undergraduate Algebra},\n}\n",
    );

    assert_eq!(bibliography.len(), 1);
    assert_eq!(
        bibliography.get("lang"),
        Some(&BibliographyEntry::new("S. Lang", "Undergraduate Algebra"))
    );
}

/// Test that lines before the first entry are ignored
#[test]
fn test_parse_withPreamble_shouldIgnoreLinesBeforeFirstEntry() {
    let bibliography = parse("% title = {Not an entry}\n@book{lang,\n  title = {Algebra},\n}\n");

    assert_eq!(bibliography.len(), 1);
    assert_eq!(bibliography.get("lang").unwrap().title, "Algebra");
}

/// Test that reading a bibliography from disk works
#[test]
fn test_from_file_withExistingFile_shouldParseEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bibliography.bib", common::SAMPLE_BIBLIOGRAPHY)?;

    let bibliography = Bibliography::from_file(&path)?;
    assert_eq!(bibliography.len(), 2);

    Ok(())
}

/// Test that a missing bibliography is a file error naming the path
#[test]
fn test_from_file_withMissingFile_shouldReturnIoError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.bib");

    match Bibliography::from_file(&missing) {
        Err(NotesError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {:?}", other),
    }

    Ok(())
}
