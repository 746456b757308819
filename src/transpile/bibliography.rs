/*!
 * Line-oriented BibTeX reader.
 *
 * Only three cues are recognised: a line with `@` starts an entry and carries
 * its key, a line mentioning `author` carries the author, a line mentioning
 * `title` carries the title. Values are the brace-delimited text on that line.
 */

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{NotesError, Result};

// @const: Entry key after the opening brace, e.g. `@book{lang,`
static KEY_MATCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[a-z]*,").unwrap());

// @const: Brace-delimited field value
static VALUE_MATCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{.*\}").unwrap());

/// Author and title of one bibliography entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibliographyEntry {
    pub author: String,
    pub title: String,
}

impl BibliographyEntry {
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
        }
    }
}

/// Citation key to entry lookup table for one course
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    entries: HashMap<String, BibliographyEntry>,
}

impl Bibliography {
    /// Parse the bibliography file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NotesError::io(path, e))?;

        let bibliography = Self::parse(BufReader::new(file)).map_err(|e| NotesError::io(path, e))?;
        debug!("Parsed {} bibliography entries from {:?}", bibliography.len(), path);

        Ok(bibliography)
    }

    /// Parse bibliography source line by line.
    ///
    /// The author and title are cleared whenever a new entry starts, so an entry
    /// missing one of them gets an empty field instead of the previous entry's.
    /// Lines before the first entry are ignored. A later entry with the same key
    /// replaces the earlier one.
    pub fn parse<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut entries = HashMap::new();

        let mut current_key: Option<String> = None;
        let mut current_author = String::new();
        let mut current_title = String::new();

        for line in reader.lines() {
            let line = line?;

            if line.contains('@') {
                current_key = Some(clean_match(first_match(&KEY_MATCH, &line)));
                current_author.clear();
                current_title.clear();
            } else if line.contains("author") {
                current_author = clean_match(first_match(&VALUE_MATCH, &line));
            } else if line.contains("title") {
                current_title = clean_match(first_match(&VALUE_MATCH, &line));
            }

            if let Some(key) = &current_key {
                entries.insert(
                    key.clone(),
                    BibliographyEntry::new(current_author.as_str(), current_title.as_str()),
                );
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&BibliographyEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, BibliographyEntry)> for Bibliography {
    fn from_iter<I: IntoIterator<Item = (K, BibliographyEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, entry)| (key.into(), entry)).collect(),
        }
    }
}

fn first_match<'a>(pattern: &Regex, line: &'a str) -> &'a str {
    pattern.find(line).map_or("", |m| m.as_str())
}

// Drop one wrapping `{`, then one `}` and one `,` from the end
fn clean_match(raw: &str) -> String {
    let cleaned = raw.strip_prefix('{').unwrap_or(raw);
    let cleaned = cleaned.strip_suffix('}').unwrap_or(cleaned);
    let cleaned = cleaned.strip_suffix(',').unwrap_or(cleaned);
    cleaned.to_string()
}
