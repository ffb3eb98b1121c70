//! Segmentation, alignment and quality analysis for computer-assisted
//! translation.
//!
//! The engines are pure functions over strings:
//!
//! 1. **Segmentation** - split text into sentence or paragraph segments and
//!    join them back, keeping line breaks
//! 2. **Alignment** - detect numbers, URLs, emails, dates and proper nouns and
//!    pair them between source and target
//! 3. **Quality** - structural checks of a translation against its source
//! 4. **Readability** - Flesch, Flesch-Kincaid, Coleman-Liau, Gunning Fog
//!    and SMOG for English and Portuguese
//! 5. **Glossary** - find terms and check their prescribed translations
//!
//! # Example
//!
//! ```ignore
//! use catwork::{Granularity, create_segment_pairs, run_quality_checks, split_into_segments};
//!
//! let sources = split_into_segments("There are 5 apples.\nThey are red.", Granularity::Sentence);
//! let pairs = create_segment_pairs(&sources, &["Há maçãs."]);
//! let issues = run_quality_checks(&pairs[0].source, &pairs[0].target);
//! assert_eq!(issues[0].source_text.as_deref(), Some("5"));
//! ```

pub mod alignment;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod glossary;
pub mod quality;
pub mod readability;
pub mod segmentation;
pub mod translator;

#[cfg(test)]
mod integration_tests;

pub use alignment::{
    AlignableElement, ElementType, TextAlignment, align_texts, find_matching_elements,
    identify_alignable_elements,
};
pub use config::{QualitySettings, WorkbenchConfig, load_config_from_file};
pub use error::{CatError, CatResult};
pub use glossary::{
    ConsistencyReport, GlossaryTerm, find_glossary_terms, load_glossary, parse_csv_content,
    validate_glossary_consistency,
};
pub use quality::{IssueType, QualityChecker, QualityIssue, Severity, run_quality_checks};
pub use readability::{ReadabilityLevel, ReadabilityResult, ReadabilityScore, calculate_readability};
pub use segmentation::{
    Granularity, SegmentPair, create_segment_pairs, ensure_segment_integrity, join_segments,
    split_into_segments,
};
pub use translator::{MachineTranslator, pretranslate_segments};
