use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use tokio::process::Command;

use crate::compiler::run_tool;
use crate::errors::{NotesError, Result};
use crate::file_utils::{FileManager, FIGURES_DIR};

// @module: TikZ figure conversion to SVG

/// Source document inside each figure directory
pub const FIGURE_SOURCE: &str = "figure.tex";

/// Convert every figure of a course into `<mdx_course_dir>/figures/<name>.svg`.
///
/// Each subdirectory of `figures/` is one figure. Returns how many were
/// converted; a course without a figures directory converts none.
pub async fn convert_figures<P1: AsRef<Path>, P2: AsRef<Path>>(
    course_dir: P1,
    mdx_course_dir: P2,
) -> Result<usize> {
    let figures_dir = course_dir.as_ref().join(FIGURES_DIR);
    if !FileManager::dir_exists(&figures_dir) {
        info!("No figures directory in {:?}", course_dir.as_ref());
        return Ok(0);
    }

    let mut figure_dirs = Vec::new();
    for entry in fs::read_dir(&figures_dir).map_err(|e| NotesError::io(&figures_dir, e))? {
        let path = entry.map_err(|e| NotesError::io(&figures_dir, e))?.path();
        if path.is_dir() {
            figure_dirs.push(path);
        }
    }
    figure_dirs.sort();

    let output_dir = mdx_course_dir.as_ref().join(FIGURES_DIR);
    for figure_dir in &figure_dirs {
        convert_figure(figure_dir, &output_dir).await?;
    }

    Ok(figure_dirs.len())
}

// @converts: figure.tex -> figure.dvi -> figure.svg -> <output_dir>/<name>.svg
async fn convert_figure(figure_dir: &Path, output_dir: &Path) -> Result<()> {
    let source = figure_dir.join(FIGURE_SOURCE);

    let mut latexmk = Command::new("latexmk");
    latexmk.args(["-dvilua", "-cd"]).arg(&source);
    run_tool(latexmk, "latexmk", &source).await?;

    let dvi = figure_dir.join("figure.dvi");
    let mut dvisvgm = Command::new("dvisvgm");
    dvisvgm
        .arg("--font-format=TTF")
        .arg("figure.dvi")
        .current_dir(figure_dir);
    run_tool(dvisvgm, "dvisvgm", &dvi).await?;

    FileManager::move_file(figure_dir.join("figure.svg"), svg_output_path(figure_dir, output_dir))?;

    info!("{:?} converted successfully", figure_dir);
    Ok(())
}

/// Where the SVG of a figure directory ends up
pub fn svg_output_path(figure_dir: &Path, output_dir: &Path) -> PathBuf {
    let name = figure_dir
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    output_dir.join(format!("{}.svg", name))
}
