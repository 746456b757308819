/*!
 * Ordered substitution rules from LaTeX to MDX.
 *
 * Every literal rule runs first, in declaration order, replacing all
 * occurrences. Every pattern rule then runs in declaration order as a global
 * regex replacement with `$n` back-references. Later rules see the output of
 * earlier ones, so reordering either list changes the result.
 *
 * Nothing here parses LaTeX. Unbalanced environments come out unbalanced:
 * a `\begin{theorem}` without its `\end{theorem}` leaves an open `<Aside>`.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Front-matter and component imports emitted for `\chapter{...}`
const CHAPTER_HEADER: &str = "---
title: $1
---
import Aside from '@components/Aside.astro';
import { Tabs, TabItem, LinkButton } from '@astrojs/starlight/components';

";

/// Exact substring replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRule {
    /// Text to look for
    pub pattern: String,
    /// Text to put in its place
    pub replacement: String,
}

impl LiteralRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Regex replacement with capture-group references in the template
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Compiled pattern
    pub pattern: Regex,
    /// Replacement template, `$1`, `$2`... refer to capture groups
    pub replacement: String,
}

impl PatternRule {
    /// Compile a rule, failing on an invalid pattern
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }
}

// @const: Literal rules, applied before any pattern rule
static STANDARD_LITERALS: &[(&str, &str)] = &[
    // document organisation
    ("\\begin{chout}", "<div style='text-align: center; font-style: italic;'>"),
    ("\\end{chout}", "</div>"),

    // exercises
    ("\\begin{exercise}", "<Tabs>"),
    ("\\end{exercise}", "</Tabs>"),
    ("\\begin{problem}", "<TabItem label='Problem'>"),
    ("\\begin{solution}", "<TabItem label='Solution'>"),
    ("\\end{problem}", "</TabItem>"),
    ("\\end{solution}", "</TabItem>"),

    // badges
    ("\\basic", ":badge[Basic]{variant=success}"),
    ("\\intermediate", ":badge[Intermediate]{variant=caution}"),
    ("\\challenging", ":badge[Challenging]{variant=danger}"),

    // unordered lists
    ("\\begin{itemize}", ""),
    ("\\item", "-"),
    ("\\end{itemize}", ""),

    // ordered lists
    ("\\begin{enumerate}", ""),
    ("\\end{enumerate}", ""),

    // ligatures
    ("`", "'"),

    // proofs collapse
    ("\\begin{proof}", "<details>\n<summary>Proof</summary>"),
    ("\\end{proof}", "</details>"),

    // umlauts
    ("\\\"o", "ö"),
];

// @const: Pattern rules, applied after every literal rule
static STANDARD_PATTERNS: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let table: &[(&str, &str)] = &[
        // document organisation
        (r"\\chapter\{(.*?)\}", CHAPTER_HEADER),
        (r"\\section\{(.*?)\}", "## $1"),
        (r"\\subsection\{(.*?)\}", "### $1"),
        (r"\\chapterauthor\{.*?\}", ""),

        // theorem-like environments, optional [label] lands in `name`
        (r"\\begin\{corollary\}(\[(.*?)\])?", "<Aside type='result' title='Corollary' name='$2'>"),
        (r"\\begin\{definition\}(\[(.*?)\])?", "<Aside type='definition' title='Definition' name='$2'>"),
        (r"\\begin\{example\}(\[(.*?)\])?", "<Aside type='example' title='Example' name='$2'>"),
        (r"\\begin\{lemma\}(\[(.*?)\])?", "<Aside type='result' title='Lemma' name='$2'>"),
        (r"\\begin\{nonexample\}(\[(.*?)\])?", "<Aside type='example' title='Non-example' name='$2'>"),
        (r"\\begin\{notation\}(\[(.*?)\])?", "<Aside type='comment' title='Notation' name='$2'>"),
        (r"\\begin\{proposition\}(\[(.*?)\])?", "<Aside type='result' title='Proposition' name='$2'>"),
        (r"\\begin\{remark\}(\[(.*?)\])?", "<Aside type='comment' title='Remark' name='$2'>"),
        (r"\\begin\{theorem\}(\[(.*?)\])?", "<Aside type='result' title='Theorem' name='$2'>"),
        (
            r"\\end\{(definition|theorem|lemma|proposition|corollary|example|nonexample|notation|remark)\}",
            "</Aside>",
        ),

        // fonts
        (r"\\textbf\{(.*?)\}", "<b> $1 </b>"),
        (r"\\textit\{(.*?)\}", "<em> $1 </em>"),

        // defined terms
        (r"\\defined\{(.*?)\}", "<em> $1 </em>"),

        // figures
        (r"\\(begin|end)\{figure\}(\[!htb\])?", ""),
        (r"\s*?\\centering", ""),
        (
            r"\s*?\\caption\{(.*?)\}\n",
            "\n<div style='width: 80%; font-style: italic; margin-inline: auto;'>Caption: $1 </div>",
        ),
        (r"\\includegraphics\{(.*?)/figure\.pdf\}", "![$1](../figures/$1.svg)"),

        // display maths
        (r"\s*?\\begin\{(gather\*|align\*)\}", "\n$$$$\n\\begin{$1}"),
        (r"\s*?\\end\{(gather\*|align\*)\}", "\n\\end{$1}\n$$$$"),
    ];

    table
        .iter()
        .map(|(pattern, replacement)| PatternRule::new(pattern, *replacement).unwrap())
        .collect()
});

/// Ordered literal and pattern rules making up one conversion
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Applied first, in order
    pub literals: Vec<LiteralRule>,
    /// Applied second, in order
    pub patterns: Vec<PatternRule>,
}

impl RuleSet {
    pub fn new(literals: Vec<LiteralRule>, patterns: Vec<PatternRule>) -> Self {
        Self { literals, patterns }
    }

    /// The course-notes rule set: headings, theorem callouts, exercises,
    /// lists, fonts, figures and display maths
    pub fn standard() -> Self {
        let literals = STANDARD_LITERALS
            .iter()
            .map(|(pattern, replacement)| LiteralRule::new(*pattern, *replacement))
            .collect();

        Self::new(literals, STANDARD_PATTERNS.to_vec())
    }

    /// Rewrite `content` through every literal rule, then every pattern rule
    pub fn apply(&self, content: &str) -> String {
        let mut content = content.to_string();

        for rule in &self.literals {
            if content.contains(&rule.pattern) {
                content = content.replace(&rule.pattern, &rule.replacement);
            }
        }

        for rule in &self.patterns {
            content = rule
                .pattern
                .replace_all(&content, rule.replacement.as_str())
                .into_owned();
        }

        content
    }

    pub fn len(&self) -> usize {
        self.literals.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.patterns.is_empty()
    }
}
