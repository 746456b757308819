/*!
 * Tests for error types
 */

use std::io;
use std::path::PathBuf;
use notes::errors::NotesError;

/// Test that I/O errors carry and display their path
#[test]
fn test_io_error_withPath_shouldDisplayPathAndCause() {
    let error = NotesError::io("tex/algebra/bibliography.bib", io::Error::new(io::ErrorKind::NotFound, "missing"));

    match &error {
        NotesError::Io { path, source } => {
            assert_eq!(path, &PathBuf::from("tex/algebra/bibliography.bib"));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected an I/O error, got {:?}", other),
    }

    let message = error.to_string();
    assert!(message.contains("bibliography.bib"));
    assert!(message.contains("missing"));
}

/// Test that the underlying I/O error is exposed as the source
#[test]
fn test_io_error_source_shouldBeUnderlyingError() {
    use std::error::Error;

    let error = NotesError::io("x", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));

    assert!(error.source().is_some());
}

/// Test configuration error display
#[test]
fn test_config_error_shouldDisplayMessage() {
    let error = NotesError::Config("An MDX output directory is required".to_string());
    assert_eq!(
        error.to_string(),
        "Configuration error: An MDX output directory is required"
    );
}

/// Test conversion from watcher errors
#[test]
fn test_from_notify_withGenericError_shouldBecomeWatch() {
    let error: NotesError = notify::Error::generic("backend gone").into();

    assert!(matches!(error, NotesError::Watch(_)));
    assert!(error.to_string().starts_with("Watch error:"));
}
