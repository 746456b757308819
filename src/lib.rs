/*!
 * # notes - LaTeX course notes to MDX
 *
 * A Rust library for publishing LaTeX course notes on a static site.
 *
 * ## Features
 *
 * - Convert LaTeX chapters to MDX with ordered substitution rules:
 *   - Chapters and sections to front-matter and headings
 *   - Theorem-like environments to `<Aside>` callouts
 *   - Exercises to tabs, proofs to collapsible details
 *   - Figures, lists, fonts and display maths
 * - Turn `\cite{..}` into footnotes resolved from the course bibliography
 * - Link each chapter to its compiled PDF and the whole-course PDF
 * - Reconvert automatically when chapters change, debounced per file
 * - Compile course and chapter PDFs and convert TikZ figures to SVG
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `transpile`: The conversion engines:
 *   - `transpile::rules`: Literal and regex substitution rules
 *   - `transpile::bibliography`: Bibliography parsing
 *   - `transpile::citations`: Citation to footnote conversion
 *   - `transpile::links`: Download link insertion
 * - `app_controller`: Course conversion and compilation
 * - `watch`: Debounced continuous conversion
 * - `compiler`: PDF compilation with latexmk
 * - `figures`: Figure conversion to SVG
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod compiler;
pub mod errors;
pub mod figures;
pub mod file_utils;
pub mod transpile;
pub mod watch;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::NotesError;
pub use transpile::{Bibliography, BibliographyEntry, Pipeline, RuleSet};
