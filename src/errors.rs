/*!
 * Error types for the notes application.
 *
 * Conversion either publishes a complete course or nothing, so every variant
 * here is fatal to the operation that raised it. Unresolved citation keys are
 * deliberately not represented: they degrade to empty footnotes instead.
 */

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum NotesError {
    /// A source could not be read or a destination could not be written
    #[error("File error on {path:?}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The filesystem notification channel failed
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// An external typesetting tool exited unsuccessfully
    #[error("{program} failed on {target:?} ({status})")]
    Toolchain {
        /// Program that was run
        program: String,
        /// File the program was run against
        target: PathBuf,
        /// Exit status reported by the program
        status: ExitStatus,
    },

    /// Invalid or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NotesError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used by the filesystem-facing parts of the pipeline
pub type Result<T> = std::result::Result<T, NotesError>;
