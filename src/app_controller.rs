use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::compiler::CourseCompiler;
use crate::errors::{NotesError, Result};
use crate::figures;
use crate::file_utils::{FileManager, CHAPTERS_DIR, SOURCE_EXTENSION};
use crate::transpile::{Bibliography, DownloadLinks, Pipeline, RuleSet};
use crate::watch::FileWatcher;

// @module: Application controller for course conversion

/// Main application controller for converting and compiling courses
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Substitution rules shared by every conversion
    rules: RuleSet,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_rules(config, RuleSet::standard())
    }

    // @method: Create a controller converting with a custom rule set
    pub fn with_rules(config: Config, rules: RuleSet) -> Result<Self> {
        config
            .validate()
            .map_err(|e| NotesError::Config(format!("{:#}", e)))?;

        Ok(Self { config, rules })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Course directory as it appears below the configured roots
    pub fn course_relative_path(&self, course_dir: &Path) -> PathBuf {
        FileManager::course_relative_path(course_dir, &self.config.tex_dir)
    }

    // A course must map to its own directory below the output roots
    fn ensure_course_named(&self, course_dir: &Path) -> Result<()> {
        if self.course_relative_path(course_dir).as_os_str().is_empty() {
            return Err(NotesError::Config(format!(
                "Cannot derive a course name from {:?}",
                course_dir
            )));
        }
        Ok(())
    }

    /// Output directory of a course's MDX documents
    pub fn mdx_course_dir(&self, course_dir: &Path) -> PathBuf {
        Path::new(&self.config.mdx_dir).join(self.course_relative_path(course_dir))
    }

    /// Published directory of a course's PDFs
    pub fn pdf_course_dir(&self, course_dir: &Path) -> PathBuf {
        Path::new(&self.config.pdf_dir).join(self.course_relative_path(course_dir))
    }

    /// Parse the course bibliography
    pub fn load_bibliography(&self, course_dir: &Path) -> Result<Bibliography> {
        Bibliography::from_file(course_dir.join(&self.config.bibliography_file))
    }

    /// Conversion pipeline for a course using an already parsed bibliography
    pub fn pipeline(&self, bibliography: Bibliography) -> Pipeline {
        let links = DownloadLinks::new(self.config.site_url.as_str(), self.config.tex_dir.as_str());
        Pipeline::new(self.rules.clone(), bibliography, links)
    }

    /// Convert one chapter and write it to its mirrored output path
    pub fn process_file(
        &self,
        source_file: &Path,
        chapters_dir: &Path,
        mdx_course_dir: &Path,
        pipeline: &Pipeline,
    ) -> Result<PathBuf> {
        let output_path = FileManager::generate_output_path(source_file, chapters_dir, mdx_course_dir);

        let content = FileManager::read_to_string(source_file)?;
        let converted = pipeline.run(&content, source_file);
        FileManager::write_to_file(&output_path, &converted)?;

        info!("{:?} converted successfully", source_file);
        Ok(output_path)
    }

    /// Convert every chapter of a course, stopping at the first failure.
    ///
    /// Returns the written output paths in processing order.
    pub fn transpile_directory(&self, course_dir: &Path, pipeline: &Pipeline) -> Result<Vec<PathBuf>> {
        let chapters_dir = course_dir.join(CHAPTERS_DIR);
        let mdx_course_dir = self.mdx_course_dir(course_dir);

        if !FileManager::dir_exists(&chapters_dir) {
            return Err(NotesError::io(
                &chapters_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "chapter directory not found"),
            ));
        }

        let chapters = FileManager::find_files(&chapters_dir, SOURCE_EXTENSION)?;
        debug!("Found {} chapters in {:?}", chapters.len(), chapters_dir);

        FileManager::ensure_dir(&mdx_course_dir)?;

        chapters
            .iter()
            .map(|chapter| self.process_file(chapter, &chapters_dir, &mdx_course_dir, pipeline))
            .collect()
    }

    /// Convert a course: figures, bibliography, then every chapter. With
    /// `continuous`, keep reconverting on chapter changes until the watcher fails.
    pub async fn convert(&self, course_dir: &Path, continuous: bool) -> Result<()> {
        if !FileManager::dir_exists(course_dir) {
            return Err(NotesError::io(
                course_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "course directory not found"),
            ));
        }
        self.ensure_course_named(course_dir)?;

        figures::convert_figures(course_dir, self.mdx_course_dir(course_dir)).await?;

        let bibliography = self.load_bibliography(course_dir)?;
        let pipeline = self.pipeline(bibliography);

        self.transpile_directory(course_dir, &pipeline)?;

        if !continuous {
            return Ok(());
        }

        let watcher = FileWatcher::new(&course_dir.join(CHAPTERS_DIR))?;
        let window = Duration::from_millis(self.config.watch.debounce_ms);

        watcher
            .run(window, |_| self.transpile_directory(course_dir, &pipeline).map(|_| ()))
            .await
    }

    /// Compile the course PDFs and publish them under the PDF directory
    pub async fn compile(&self, course_dir: &Path) -> Result<()> {
        self.ensure_course_named(course_dir)?;

        let compiler = CourseCompiler::new(course_dir, self.pdf_course_dir(course_dir));
        compiler.compile().await
    }
}
