//! Glossary Matcher
//!
//! Finds glossary terms in a text and checks that their prescribed
//! translations appear in the corresponding target.
//!
//! ```ignore
//! let terms = vec![GlossaryTerm::new("cloud", "nuvem")];
//! let report = validate_glossary_consistency("the cloud service", "o serviço de nuvem", &terms);
//! assert!(report.is_consistent);
//! ```

pub mod csv;
pub mod loader;

pub use csv::parse_csv_content;
pub use loader::{
    FileGlossarySource, GlossarySource, HttpGlossarySource, glossary_source_for, load_glossary,
};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// A term and its prescribed translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub term: String,
    /// The translation the term must receive
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_name: Option<String>,
}

impl GlossaryTerm {
    pub fn new(term: &str, definition: &str) -> Self {
        GlossaryTerm {
            term: term.to_string(),
            definition: definition.to_string(),
            related_url: None,
            related_name: None,
        }
    }
}

/// One occurrence of a glossary term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossaryMatch<'a> {
    pub term: &'a GlossaryTerm,
    /// Byte offset of the occurrence
    pub index: usize,
    /// The text as written at the occurrence
    pub matched: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyIssue {
    pub source_term: String,
    pub expected_translation: String,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub is_consistent: bool,
    pub issues: Vec<ConsistencyIssue>,
}

/// Case-insensitive whole-word pattern for a phrase
///
/// Word boundaries are only asserted on sides where the phrase starts or
/// ends with a word character, so terms like `C++` or `.NET` still match.
fn whole_word_pattern(phrase: &str) -> Option<Regex> {
    let phrase = phrase.trim();
    let first = phrase.chars().next()?;
    let last = phrase.chars().next_back()?;
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let pattern = format!(
        "{}{}{}",
        if is_word(first) { r"\b" } else { "" },
        regex::escape(phrase),
        if is_word(last) { r"\b" } else { "" },
    );

    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(phrase, error = %e, "Skipping glossary phrase that cannot be matched");
            None
        }
    }
}

/// Find every glossary term occurrence in a text
///
/// Terms are scanned longest first and every occurrence is recorded, so
/// "data" is reported both on its own and inside "data warehouse".
///
/// # Returns
/// Matches sorted by byte offset. At equal offsets the longer term comes
/// first.
pub fn find_glossary_terms<'a>(text: &str, terms: &'a [GlossaryTerm]) -> Vec<GlossaryMatch<'a>> {
    let mut ordered: Vec<&GlossaryTerm> = terms.iter().collect();
    ordered.sort_by(|a, b| b.term.trim().len().cmp(&a.term.trim().len()));

    let mut matches = Vec::new();
    for term in ordered {
        let Some(pattern) = whole_word_pattern(&term.term) else {
            continue;
        };
        matches.extend(pattern.find_iter(text).map(|m| GlossaryMatch {
            term,
            index: m.start(),
            matched: m.as_str().to_string(),
        }));
    }

    // stable: keeps longest-first order within one offset
    matches.sort_by_key(|m| m.index);
    matches
}

/// Whether `phrase` occurs in `text` as a whole word, ignoring case
pub fn contains_whole_word(text: &str, phrase: &str) -> bool {
    whole_word_pattern(phrase).is_some_and(|pattern| pattern.is_match(text))
}

/// Check that every glossary term used in the source is rendered with its
/// prescribed translation somewhere in the target
///
/// Positions are not compared; presence anywhere in each text is enough.
/// Each term is reported at most once.
pub fn validate_glossary_consistency(
    source: &str,
    target: &str,
    terms: &[GlossaryTerm],
) -> ConsistencyReport {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut issues = Vec::new();

    for found in find_glossary_terms(source, terms) {
        let term = found.term;
        if term.definition.trim().is_empty() || !seen.insert(term.term.as_str()) {
            continue;
        }
        if !contains_whole_word(target, &term.definition) {
            issues.push(ConsistencyIssue {
                source_term: term.term.clone(),
                expected_translation: term.definition.clone(),
                found: false,
            });
        }
    }

    ConsistencyReport {
        is_consistent: issues.is_empty(),
        issues,
    }
}
