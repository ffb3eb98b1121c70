//! Alignment Engine
//!
//! Detects comparable spans (numbers, URLs, emails, dates, capitalized words)
//! in a text and pairs identical spans between a source and a target so they
//! can be highlighted together.
//!
//! Detectors run independently and their results are not de-duplicated: a
//! token such as `2024-01-15` is reported as a date and also as three
//! numbers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]+(?:[.,][0-9]+)*\b").expect("valid number regex"));

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{1,4}[-/.][0-9]{1,2}[-/.][0-9]{1,4}\b").expect("valid date regex")
});

static PROPER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("valid proper noun regex"));

/// Kind of alignable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Number,
    Tag,
    Proper,
    Url,
    Email,
    Date,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Number => "number",
            ElementType::Tag => "tag",
            ElementType::Proper => "proper",
            ElementType::Url => "url",
            ElementType::Email => "email",
            ElementType::Date => "date",
        }
    }
}

/// A detected span inside one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignableElement {
    /// Unique within one detection pass
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub text: String,
    /// Byte offset where the span starts
    pub start_index: usize,
    /// Byte offset one past the end of the span
    pub end_index: usize,
}

/// Detected elements of both texts and the correspondence between them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAlignment {
    pub source_elements: Vec<AlignableElement>,
    pub target_elements: Vec<AlignableElement>,
    /// Symmetric id-to-id map
    pub matches: HashMap<String, String>,
}

/// Find all alignable elements in a text
///
/// Every detector scans the whole text. The combined list is sorted by
/// `start_index`; elements starting at the same offset keep detector order
/// (number, url, email, date, proper).
pub fn identify_alignable_elements(text: &str) -> Vec<AlignableElement> {
    let mut elements = Vec::new();
    let mut counter = 0usize;

    let mut push = |element_type: ElementType, start: usize, end: usize| {
        elements.push(AlignableElement {
            id: format!("{}-{}", element_type.as_str(), counter),
            element_type,
            text: text[start..end].to_string(),
            start_index: start,
            end_index: end,
        });
        counter += 1;
    };

    let detectors: [(ElementType, &Lazy<Regex>); 4] = [
        (ElementType::Number, &NUMBER_PATTERN),
        (ElementType::Url, &URL_PATTERN),
        (ElementType::Email, &EMAIL_PATTERN),
        (ElementType::Date, &DATE_PATTERN),
    ];
    for (element_type, pattern) in detectors {
        for m in pattern.find_iter(text) {
            push(element_type, m.start(), m.end());
        }
    }

    for m in PROPER_PATTERN.find_iter(text) {
        if !is_sentence_initial(text, m.start()) {
            push(ElementType::Proper, m.start(), m.end());
        }
    }

    elements.sort_by_key(|e| e.start_index);
    elements
}

/// Whether a word at `start` opens the text or a sentence.
/// Whitespace between the terminator and the word is allowed.
fn is_sentence_initial(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    before.is_empty() || before.ends_with(['.', '!', '?'])
}

/// Pair source elements with target elements of the same type and text
///
/// Each source element takes the first unmatched target element that is
/// equal in type and text. Both directions are recorded, so a
/// `source -> target` entry always has its `target -> source` twin.
pub fn find_matching_elements(
    source_elements: &[AlignableElement],
    target_elements: &[AlignableElement],
) -> HashMap<String, String> {
    let mut matches = HashMap::new();
    let mut used: HashSet<&str> = HashSet::new();

    for source in source_elements {
        let candidate = target_elements.iter().find(|target| {
            !used.contains(target.id.as_str())
                && target.element_type == source.element_type
                && target.text == source.text
        });

        if let Some(target) = candidate {
            used.insert(target.id.as_str());
            matches.insert(source.id.clone(), target.id.clone());
            matches.insert(target.id.clone(), source.id.clone());
        }
    }

    matches
}

/// Detect elements in both texts and match them
///
/// Element ids are prefixed with `src-` and `tgt-` so the two detection
/// passes never share an id in the combined map.
pub fn align_texts(source: &str, target: &str) -> TextAlignment {
    let source_elements = prefix_ids(identify_alignable_elements(source), "src");
    let target_elements = prefix_ids(identify_alignable_elements(target), "tgt");
    let matches = find_matching_elements(&source_elements, &target_elements);

    TextAlignment {
        source_elements,
        target_elements,
        matches,
    }
}

fn prefix_ids(elements: Vec<AlignableElement>, prefix: &str) -> Vec<AlignableElement> {
    elements
        .into_iter()
        .map(|e| AlignableElement {
            id: format!("{}-{}", prefix, e.id),
            ..e
        })
        .collect()
}

/// Elements that have no counterpart in the match map
pub fn unmatched_elements<'a>(
    elements: &'a [AlignableElement],
    matches: &HashMap<String, String>,
) -> Vec<&'a AlignableElement> {
    elements
        .iter()
        .filter(|e| !matches.contains_key(&e.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts_of(elements: &[AlignableElement], element_type: ElementType) -> Vec<&str> {
        elements
            .iter()
            .filter(|e| e.element_type == element_type)
            .map(|e| e.text.as_str())
            .collect()
    }

    #[test]
    fn test_only_ascii_digits_are_numbers() {
        let elements = identify_alignable_elements("Sala ٣٤ e 12, em ١٢/٠٥/٢٠٢٤ ou 12/05/2024");
        assert_eq!(
            texts_of(&elements, ElementType::Number),
            vec!["12", "12", "05", "2024"]
        );
        assert_eq!(texts_of(&elements, ElementType::Date), vec!["12/05/2024"]);
    }

    #[test]
    fn test_detects_numbers() {
        let elements = identify_alignable_elements("Pay 1,250.50 now or 3 later");
        assert_eq!(texts_of(&elements, ElementType::Number), vec!["1,250.50", "3"]);
    }

    #[test]
    fn test_detects_url_and_email() {
        let text = "See https://example.com/docs or mail ana.silva@example.org";
        let elements = identify_alignable_elements(text);
        assert_eq!(
            texts_of(&elements, ElementType::Url),
            vec!["https://example.com/docs"]
        );
        assert_eq!(
            texts_of(&elements, ElementType::Email),
            vec!["ana.silva@example.org"]
        );
    }

    #[test]
    fn test_date_also_reported_as_numbers() {
        let elements = identify_alignable_elements("due 2024-01-15");
        assert_eq!(texts_of(&elements, ElementType::Date), vec!["2024-01-15"]);
        assert_eq!(
            texts_of(&elements, ElementType::Number),
            vec!["2024", "01", "15"]
        );
    }

    #[test]
    fn test_proper_nouns_skip_sentence_start() {
        let elements =
            identify_alignable_elements("The team met Maria in Lisbon. Then they left! Paris waited");
        assert_eq!(
            texts_of(&elements, ElementType::Proper),
            vec!["Maria", "Lisbon"]
        );
    }

    #[test]
    fn test_elements_sorted_by_start() {
        let elements = identify_alignable_elements("we saw Anna at 10 and Bob at 11");
        let starts: Vec<usize> = elements.iter().map(|e| e.start_index).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        for e in &elements {
            assert_eq!(&"we saw Anna at 10 and Bob at 11"[e.start_index..e.end_index], e.text);
        }
    }

    #[test]
    fn test_ids_unique_within_pass() {
        let elements = identify_alignable_elements("1 2 3 on 2020-10-10 with Ana");
        let ids: HashSet<_> = elements.iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), elements.len());
    }

    #[test]
    fn test_empty_text_has_no_elements() {
        assert!(identify_alignable_elements("").is_empty());
    }

    #[test]
    fn test_matching_is_symmetric() {
        let alignment = align_texts(
            "Call Maria at 555 on 2024-03-01",
            "Ligue para a Maria no 555 em 2024-03-01",
        );
        assert!(!alignment.matches.is_empty());
        for (from, to) in &alignment.matches {
            assert_eq!(alignment.matches.get(to), Some(from));
        }
    }

    #[test]
    fn test_matching_requires_same_type_and_text() {
        let src = identify_alignable_elements("value 42");
        let tgt = identify_alignable_elements("valor 43");
        assert!(find_matching_elements(&src, &tgt).is_empty());
    }

    #[test]
    fn test_first_available_match() {
        let src = vec![
            AlignableElement {
                id: "s1".into(),
                element_type: ElementType::Number,
                text: "7".into(),
                start_index: 0,
                end_index: 1,
            },
            AlignableElement {
                id: "s2".into(),
                element_type: ElementType::Number,
                text: "7".into(),
                start_index: 4,
                end_index: 5,
            },
        ];
        let tgt = vec![
            AlignableElement {
                id: "t1".into(),
                element_type: ElementType::Number,
                text: "7".into(),
                start_index: 2,
                end_index: 3,
            },
        ];
        let matches = find_matching_elements(&src, &tgt);
        assert_eq!(matches.get("s1"), Some(&"t1".to_string()));
        assert_eq!(matches.get("t1"), Some(&"s1".to_string()));
        assert!(!matches.contains_key("s2"));
    }

    #[test]
    fn test_unmatched_elements() {
        let alignment = align_texts("Ring 112 or 911", "Ligue 112");
        let unmatched = unmatched_elements(&alignment.source_elements, &alignment.matches);
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].text, "911");
    }

    #[test]
    fn test_element_serializes_type_field() {
        let elements = identify_alignable_elements("at 9");
        let json = serde_json::to_value(&elements[0]).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["startIndex"], 3);
        assert_eq!(json["endIndex"], 4);
    }
}
