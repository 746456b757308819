/*!
 * LaTeX to MDX transpilation.
 *
 * A chapter goes through three stages, always in this order:
 *
 * - `rules`: ordered literal then regex substitutions
 * - `citations`: `\cite{..}` to footnote markers plus a footnote block
 * - `links`: download buttons inserted after the front-matter
 *
 * `bibliography` parses the course bibliography the citation stage reads.
 * All stages are pure text rewrites; file handling lives in the controller.
 */

// Re-export main types for easier usage
pub use self::bibliography::{Bibliography, BibliographyEntry};
pub use self::citations::resolve_citations;
pub use self::links::DownloadLinks;
pub use self::rules::{LiteralRule, PatternRule, RuleSet};

// Submodules
pub mod bibliography;
pub mod citations;
pub mod links;
pub mod rules;

use std::path::Path;

/// Everything needed to convert the chapters of one course
#[derive(Debug, Clone)]
pub struct Pipeline {
    rules: RuleSet,
    bibliography: Bibliography,
    links: DownloadLinks,
}

impl Pipeline {
    pub fn new(rules: RuleSet, bibliography: Bibliography, links: DownloadLinks) -> Self {
        Self {
            rules,
            bibliography,
            links,
        }
    }

    pub fn bibliography(&self) -> &Bibliography {
        &self.bibliography
    }

    /// Convert one chapter's LaTeX source to MDX
    pub fn run<P: AsRef<Path>>(&self, content: &str, source_path: P) -> String {
        let content = self.rules.apply(content);
        let content = resolve_citations(&self.bibliography, &content);
        self.links.annotate(&content, source_path)
    }
}
