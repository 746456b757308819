/*!
 * Common test utilities for the notes test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// Bibliography used by the sample course
pub const SAMPLE_BIBLIOGRAPHY: &str = r#"@book{lang,
  author = {Serge Lang},
  title = {Algebra},
  year = {2002},
}

@book{artin,
  author = {Michael Artin},
  title = {Algebra},
}
"#;

/// First chapter of the sample course
pub const SAMPLE_CHAPTER: &str = r#"\chapter{Groups}
\chapterauthor{Someone}

\section{Definitions}

\begin{definition}[Group]
A \defined{group} is a set with an associative operation \cite{lang}.
\end{definition}

\begin{theorem}[Lagrange]
The order of a subgroup divides the order of the group \cite{artin}.
\end{theorem}

\begin{proof}
Cosets partition the group \cite{lang}.
\end{proof}
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a course directory `<root>/<name>` with a bibliography and two chapters
pub fn create_test_course(root: &Path, name: &str) -> Result<PathBuf> {
    let course_dir = root.join(name);
    create_test_file(&course_dir, "bibliography.bib", SAMPLE_BIBLIOGRAPHY)?;
    create_test_file(&course_dir, "chapters/groups.tex", SAMPLE_CHAPTER)?;
    create_test_file(
        &course_dir,
        "chapters/rings.tex",
        "\\chapter{Rings}\n\nA ring has two operations.\n",
    )?;
    Ok(course_dir)
}
