//! Segmentation Engine
//!
//! Splits free text into an ordered list of segments and joins segments back
//! into a document. Line breaks survive the round trip as dedicated `"\n"`
//! segments, so that
//!
//! ```ignore
//! let segments = split_into_segments("Hello world. How are you?\nFine, thanks.", Granularity::Sentence);
//! assert_eq!(segments, vec!["Hello world.", "How are you?", "\n", "Fine, thanks."]);
//! assert_eq!(join_segments(&segments), "Hello world. How are you?\nFine, thanks.");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::error::CatResult;

/// Content of a segment that stands for a structural newline
pub const LINE_BREAK: &str = "\n";

/// Stand-in for newlines while sentence boundaries are matched.
/// A private-use code point never appears in real text.
const LINE_BREAK_MARKER: &str = "\u{E000}";

static SENTENCE_CHUNK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+|[^.!?]+$").expect("valid sentence chunk regex"));

static PARAGRAPH_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph separator regex"));

/// How finely text is cut into segments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Sentence,
    Paragraph,
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentence" => Ok(Granularity::Sentence),
            "paragraph" => Ok(Granularity::Paragraph),
            other => Err(format!("Unknown granularity: {}", other)),
        }
    }
}

/// One unit of source/target correspondence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPair {
    /// Identifier assigned once when the pair is created
    pub id: String,
    /// Source text, empty for line-break pairs
    pub source: String,
    /// Target text, empty until translated
    pub target: String,
    pub is_translated: bool,
    pub is_line_break: bool,
    /// Position in the original segmentation order
    pub original_index: usize,
}

impl SegmentPair {
    /// Create a pair for a regular segment
    pub fn new(original_index: usize, source: &str, target: &str) -> Self {
        SegmentPair {
            id: Uuid::new_v4().to_string(),
            source: source.to_string(),
            target: target.to_string(),
            is_translated: !target.trim().is_empty(),
            is_line_break: false,
            original_index,
        }
    }

    /// Create a pair standing for a line break
    pub fn line_break(original_index: usize, target: &str) -> Self {
        SegmentPair {
            id: Uuid::new_v4().to_string(),
            source: String::new(),
            target: target.to_string(),
            is_translated: !target.trim().is_empty(),
            is_line_break: true,
            original_index,
        }
    }

    /// Copy of this pair with a new target; `is_translated` is recomputed
    pub fn with_target(&self, target: &str) -> Self {
        SegmentPair {
            target: target.to_string(),
            is_translated: !target.trim().is_empty(),
            ..self.clone()
        }
    }
}

/// Read a document to be segmented
///
/// # Errors
/// `CatError::Io` when the file cannot be read or is not UTF-8.
pub fn read_document(path: &Path) -> CatResult<String> {
    Ok(fs::read_to_string(path)?)
}

/// Split text into segments
///
/// In sentence mode, newlines become standalone `"\n"` segments placed where
/// they occurred. In paragraph mode the text is cut on blank lines and no
/// line-break segments are produced.
///
/// # Arguments
/// * `text` - Raw text, any content allowed
/// * `granularity` - Sentence or paragraph mode
///
/// # Returns
/// Segments in left-to-right order. Empty or whitespace-only text yields an
/// empty vector.
pub fn split_into_segments(text: &str, granularity: Granularity) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let text = text.replace("\r\n", "\n");
    let segments = match granularity {
        Granularity::Sentence => split_sentences(&text),
        Granularity::Paragraph => split_paragraphs(&text),
    };

    debug!(
        granularity = ?granularity,
        segments = segments.len(),
        "Split text into segments"
    );
    segments
}

fn split_sentences(text: &str) -> Vec<String> {
    let marked = text.replace('\n', LINE_BREAK_MARKER);
    let mut segments = Vec::new();

    for chunk in SENTENCE_CHUNK.find_iter(&marked) {
        let chunk = chunk.as_str();
        if !chunk.contains(LINE_BREAK_MARKER) {
            let trimmed = chunk.trim();
            if !trimmed.is_empty() {
                segments.push(trimmed.to_string());
            }
            continue;
        }

        let parts: Vec<&str> = chunk.split(LINE_BREAK_MARKER).collect();
        let last = parts.len() - 1;
        for (i, part) in parts.iter().enumerate() {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                segments.push(trimmed.to_string());
            }
            if i < last {
                segments.push(LINE_BREAK.to_string());
            }
        }
    }

    segments
}

fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join segments back into a single text
///
/// Regular segments are separated by a single space. A `"\n"` segment emits a
/// newline and the segment following it starts without a leading space.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut result = String::new();
    let mut previous_was_break = false;

    for (i, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        if segment == LINE_BREAK {
            result.push('\n');
            previous_was_break = true;
            continue;
        }

        if i > 0 && !previous_was_break && !result.ends_with('\n') {
            result.push(' ');
        }
        result.push_str(segment);
        previous_was_break = false;
    }

    result
}

/// Pair source segments with target segments by position
///
/// Missing target positions become empty, untranslated targets. Source
/// segments equal to `"\n"` become line-break pairs with an empty source; run
/// [`ensure_segment_integrity`] to normalize their targets.
pub fn create_segment_pairs<S: AsRef<str>, T: AsRef<str>>(
    source_segments: &[S],
    target_segments: &[T],
) -> Vec<SegmentPair> {
    source_segments
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let target = target_segments
                .get(index)
                .map(|t| t.as_ref())
                .unwrap_or("");
            if source.as_ref() == LINE_BREAK {
                SegmentPair::line_break(index, target)
            } else {
                SegmentPair::new(index, source.as_ref(), target)
            }
        })
        .collect()
}

/// Restore the line-break invariants of a pair list
///
/// Line-break pairs get an empty source and a `"\n"` target and count as
/// translated. All other pairs have `is_translated` recomputed from their
/// target.
pub fn ensure_segment_integrity(pairs: &[SegmentPair]) -> Vec<SegmentPair> {
    pairs
        .iter()
        .map(|pair| {
            if pair.is_line_break {
                SegmentPair {
                    source: String::new(),
                    target: LINE_BREAK.to_string(),
                    is_translated: true,
                    ..pair.clone()
                }
            } else {
                pair.with_target(&pair.target)
            }
        })
        .collect()
}

/// Rebuild the source document from a pair list
pub fn join_source_segments(pairs: &[SegmentPair]) -> String {
    join_pair_side(pairs, |pair| &pair.source)
}

/// Rebuild the translated document from a pair list
///
/// Untranslated segments contribute nothing.
pub fn join_target_segments(pairs: &[SegmentPair]) -> String {
    join_pair_side(pairs, |pair| &pair.target)
}

fn join_pair_side<'a, F>(pairs: &'a [SegmentPair], side: F) -> String
where
    F: Fn(&'a SegmentPair) -> &'a String,
{
    let mut ordered: Vec<&SegmentPair> = pairs.iter().collect();
    ordered.sort_by_key(|pair| pair.original_index);

    let parts: Vec<&str> = ordered
        .into_iter()
        .filter_map(|pair| {
            if pair.is_line_break {
                Some(LINE_BREAK)
            } else {
                let text = side(pair).trim();
                (!text.is_empty()).then_some(text)
            }
        })
        .collect();

    join_segments(&parts)
}

/// Replace the target of the pair with the given id
///
/// Returns a new list; pairs are value objects and are never edited in place.
/// An unknown id leaves the list unchanged.
pub fn update_segment_target(pairs: &[SegmentPair], id: &str, target: &str) -> Vec<SegmentPair> {
    pairs
        .iter()
        .map(|pair| {
            if pair.id == id && !pair.is_line_break {
                pair.with_target(target)
            } else {
                pair.clone()
            }
        })
        .collect()
}

/// Count translated segments, ignoring line breaks
///
/// # Returns
/// `(translated, total)`
pub fn translation_progress(pairs: &[SegmentPair]) -> (usize, usize) {
    pairs
        .iter()
        .filter(|pair| !pair.is_line_break)
        .fold((0, 0), |(done, total), pair| {
            (done + usize::from(pair.is_translated), total + 1)
        })
}
