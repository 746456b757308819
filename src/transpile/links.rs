/*!
 * Download buttons for the compiled PDFs of a chapter and its course.
 */

use std::path::{Component, Path, PathBuf};

use crate::file_utils::{FileManager, CHAPTERS_DIR};

/// File name of the whole-course PDF
pub const COURSE_ARTIFACT: &str = "master.pdf";

/// Builds and inserts the download link block
#[derive(Debug, Clone)]
pub struct DownloadLinks {
    /// URL path prefix the PDFs are published under
    site_url: String,
    /// Root directory of the LaTeX courses
    tex_root: PathBuf,
}

impl DownloadLinks {
    pub fn new(site_url: impl Into<String>, tex_root: impl Into<PathBuf>) -> Self {
        Self {
            site_url: site_url.into(),
            tex_root: tex_root.into(),
        }
    }

    /// URLs of the chapter PDF and the course PDF for a chapter source file
    pub fn urls<P: AsRef<Path>>(&self, chapter_path: P) -> (String, String) {
        let chapter_path = chapter_path.as_ref();
        let course_dir = course_dir_of(chapter_path);
        let course = FileManager::course_relative_path(course_dir, &self.tex_root);

        let chapter_name = chapter_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        (
            self.url(&course, &format!("{}.pdf", chapter_name)),
            self.url(&course, COURSE_ARTIFACT),
        )
    }

    /// Render the link block for a chapter source file
    pub fn render<P: AsRef<Path>>(&self, chapter_path: P) -> String {
        let (chapter_url, course_url) = self.urls(chapter_path);

        format!(
            "<div style='display: flex; justify-content: space-around;'>\n\
             \t<LinkButton target=\"_blank\" href=\"{}\" variant=\"secondary\" icon=\"document\" >Download</LinkButton>\n\
             \t<LinkButton target=\"_blank\" href=\"{}\" variant=\"primary\" icon=\"open-book\" >Download</LinkButton>\n\
             </div>",
            chapter_url, course_url
        )
    }

    /// Insert the link block right after the first blank line, which closes
    /// the front-matter. Content without a blank line is returned unchanged.
    pub fn annotate<P: AsRef<Path>>(&self, content: &str, chapter_path: P) -> String {
        let block = self.render(chapter_path);
        content.replacen("\n\n", &format!("\n\n{}", block), 1)
    }

    fn url(&self, course: &Path, file_name: &str) -> String {
        let segments: Vec<String> = self
            .site_url
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .chain(course.components().filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            }))
            .chain(std::iter::once(file_name.to_string()))
            .collect();

        format!("/{}", segments.join("/"))
    }
}

// Course directory of a chapter: the parent of its `chapters/` ancestor
fn course_dir_of(chapter_path: &Path) -> &Path {
    chapter_path
        .ancestors()
        .find(|ancestor| ancestor.file_name().is_some_and(|name| name == CHAPTERS_DIR))
        .and_then(Path::parent)
        .or_else(|| chapter_path.parent())
        .unwrap_or(Path::new(""))
}
