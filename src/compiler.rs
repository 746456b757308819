/*!
 * PDF compilation of a course with latexmk.
 *
 * The whole course is built from `master.tex`, then every chapter is built
 * alone by restricting `\includeonly` to it. The PDFs are collected in the
 * course's `output/` directory, which finally replaces the published copy.
 */

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use tokio::process::Command;

use crate::errors::{NotesError, Result};
use crate::file_utils::{FileManager, CHAPTERS_DIR, SOURCE_EXTENSION};
use crate::transpile::links::COURSE_ARTIFACT;

/// Entry point document of every course
pub const MASTER_FILE: &str = "master.tex";

/// Directory inside the course where PDFs are collected
pub const OUTPUT_DIR: &str = "output";

const LATEXMK: &str = "latexmk";

/// Run an external tool, turning spawn failures and non-zero exits into errors
pub(crate) async fn run_tool(mut command: Command, program: &str, target: &Path) -> Result<()> {
    debug!("Running {} on {:?}", program, target);

    let output = command
        .output()
        .await
        .map_err(|e| NotesError::io(target, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("{} failed on {:?}: {}", program, target, stderr.trim());
        return Err(NotesError::Toolchain {
            program: program.to_string(),
            target: target.to_path_buf(),
            status: output.status,
        });
    }

    Ok(())
}

/// Compiles one course and publishes its PDFs
pub struct CourseCompiler {
    // @field: Course directory holding master.tex and chapters/
    course_dir: PathBuf,

    // @field: Directory the output/ folder is moved to
    publish_dir: PathBuf,
}

impl CourseCompiler {
    pub fn new(course_dir: impl Into<PathBuf>, publish_dir: impl Into<PathBuf>) -> Self {
        Self {
            course_dir: course_dir.into(),
            publish_dir: publish_dir.into(),
        }
    }

    fn master_path(&self) -> PathBuf {
        self.course_dir.join(MASTER_FILE)
    }

    fn output_dir(&self) -> PathBuf {
        self.course_dir.join(OUTPUT_DIR)
    }

    /// Compile the course PDF and every chapter PDF, then publish them
    pub async fn compile(&self) -> Result<()> {
        let chapters_dir = self.course_dir.join(CHAPTERS_DIR);
        if !FileManager::dir_exists(&chapters_dir) {
            return Err(NotesError::io(
                &chapters_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "chapter directory not found"),
            ));
        }

        let chapters = FileManager::find_files(&chapters_dir, SOURCE_EXTENSION)?;

        self.compile_master().await?;

        let progress_bar = ProgressBar::new(chapters.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chapters {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);

        for chapter in &chapters {
            let relative = chapter.strip_prefix(&self.course_dir).unwrap_or(chapter);
            progress_bar.set_message(relative.display().to_string());
            self.compile_chapter(chapter).await?;
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        self.publish()?;
        info!("Download paths synced");

        Ok(())
    }

    async fn compile_master(&self) -> Result<()> {
        let master_path = self.master_path();

        let mut command = Command::new(LATEXMK);
        command.args(["-lualatex", "-cd", "-g"]).arg(&master_path);
        run_tool(command, LATEXMK, &master_path).await?;

        FileManager::move_file(
            master_path.with_extension("pdf"),
            self.output_dir().join(COURSE_ARTIFACT),
        )?;

        info!("{:?} compiled successfully", master_path);
        Ok(())
    }

    async fn compile_chapter(&self, chapter: &Path) -> Result<()> {
        let master_path = self.master_path();

        let mut command = Command::new(LATEXMK);
        command
            .args(["-lualatex", "-cd", "-g"])
            .arg(include_only_argument(&self.course_dir, chapter))
            .arg(&master_path);
        run_tool(command, LATEXMK, chapter).await?;

        let chapter_name = chapter
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        FileManager::move_file(
            master_path.with_extension("pdf"),
            self.output_dir().join(format!("{}.pdf", chapter_name)),
        )?;

        info!("{:?} compiled successfully", chapter);
        Ok(())
    }

    // Replace the published copy with the freshly built output/ directory
    fn publish(&self) -> Result<()> {
        if self.publish_dir.exists() {
            std::fs::remove_dir_all(&self.publish_dir)
                .map_err(|e| NotesError::io(&self.publish_dir, e))?;
        }

        if let Some(parent) = self.publish_dir.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let output_dir = self.output_dir();
        std::fs::rename(&output_dir, &self.publish_dir).map_err(|e| NotesError::io(&output_dir, e))
    }
}

/// `-usepretex` argument restricting the build to one chapter, e.g.
/// `-usepretex=\includeonly{chapters/intro}`
pub fn include_only_argument(course_dir: &Path, chapter: &Path) -> OsString {
    let relative = chapter.strip_prefix(course_dir).unwrap_or(chapter);
    let include = relative.with_extension("");
    let include: Vec<String> = include
        .components()
        .map(|component| component.as_os_str().to_string_lossy().to_string())
        .collect();

    OsString::from(format!("-usepretex=\\includeonly{{{}}}", include.join("/")))
}
