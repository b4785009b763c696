//! Reference Extraction
//!
//! Lexical detection of `qualifier.method(` call expressions. There is no tokenization:
//! matches inside string literals or comments count like any other.

use std::collections::BTreeMap;

use regex::Regex;

use crate::domain::language::{Language, ReferencePattern};
use crate::domain::source_file::before_separator;
use crate::error::Result;

/// Applies a compiled call pattern to file content.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    regex: Regex,
}

impl ReferenceExtractor {
    /// Compile the pattern configured for `language`.
    pub fn for_language(language: Language) -> Result<Self> {
        Self::from_pattern(&language.pattern())
    }

    pub fn from_pattern(pattern: &ReferencePattern) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern.pattern)?,
        })
    }

    /// Qualifiers of every leftmost, non-overlapping match, in source order.
    ///
    /// Repeated qualifiers are kept: each match is a distinct occurrence.
    pub fn extract(&self, content: &str) -> Vec<String> {
        self.regex
            .find_iter(content)
            .map(|m| qualifier_of(m.as_str()).to_string())
            .collect()
    }
}

/// Qualifier of a matched call expression: text before the first `.`, trailing whitespace removed.
pub fn qualifier_of(matched: &str) -> &str {
    before_separator(matched, '.').trim_end()
}

/// Count occurrences of each referenced name.
pub fn tally<I, S>(references: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut occurrences = BTreeMap::new();
    for reference in references {
        *occurrences.entry(reference.into()).or_insert(0) += 1;
    }
    occurrences
}
