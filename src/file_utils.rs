use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{NotesError, Result};

// @module: File and directory utilities

/// Extension of source chapter documents
pub const SOURCE_EXTENSION: &str = "tex";

/// Extension of converted documents
pub const TARGET_EXTENSION: &str = "mdx";

/// Name of the chapter directory inside a course
pub const CHAPTERS_DIR: &str = "chapters";

/// Name of the figure directory inside a course
pub const FIGURES_DIR: &str = "figures";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| NotesError::io(path, e))?;
        }
        Ok(())
    }

    /// Find files with a specific extension below a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let extension = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                NotesError::io(path, e.into())
            })?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|e| NotesError::io(path, e))
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, content).map_err(|e| NotesError::io(path, e))
    }

    /// Move a file, creating the destination directory as needed
    pub fn move_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> Result<()> {
        let from = from.as_ref();
        let to = to.as_ref();

        if let Some(parent) = to.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::rename(from, to).map_err(|e| NotesError::io(from, e))
    }

    /// Course directory as it appears below the source and output roots.
    ///
    /// `tex/mlnn` with root `tex` gives `mlnn`. Courses outside the root keep
    /// their relative path when it only descends, otherwise they are reduced
    /// to their directory name, so the result never leaves the root it is
    /// joined onto.
    pub fn course_relative_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        course_dir: P1,
        tex_root: P2,
    ) -> PathBuf {
        let course_dir = strip_cur_dir(course_dir.as_ref());
        let tex_root = strip_cur_dir(tex_root.as_ref());

        if !tex_root.as_os_str().is_empty() {
            if let Ok(relative) = course_dir.strip_prefix(&tex_root) {
                if !relative.as_os_str().is_empty() && is_descending(relative) {
                    return relative.to_path_buf();
                }
            }
        }

        if is_descending(&course_dir) {
            return course_dir;
        }

        course_name(&course_dir)
    }

    // @generates: Output path mirroring the chapter's position below `chapters/`
    // @params: source_file, chapters_dir, mdx_course_dir
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>, P3: AsRef<Path>>(
        source_file: P1,
        chapters_dir: P2,
        mdx_course_dir: P3,
    ) -> PathBuf {
        let source_file = source_file.as_ref();

        let relative = match source_file.strip_prefix(chapters_dir.as_ref()) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => source_file.file_name().map(PathBuf::from).unwrap_or_default(),
        };

        mdx_course_dir
            .as_ref()
            .join(relative)
            .with_extension(TARGET_EXTENSION)
    }
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

// Only plain names: no root, prefix or `..`
fn is_descending(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

// Directory name of a course, resolving `..` against the filesystem when the
// path itself ends in one
fn course_name(course_dir: &Path) -> PathBuf {
    if let Some(name) = course_dir.file_name() {
        return PathBuf::from(name);
    }

    std::fs::canonicalize(course_dir)
        .ok()
        .and_then(|resolved| resolved.file_name().map(PathBuf::from))
        .unwrap_or_default()
}
