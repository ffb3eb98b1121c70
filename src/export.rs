//! Translation reports
//!
//! Bundles a translated document with the result of every analysis so it
//! can be reviewed or archived as JSON.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alignment::align_texts;
use crate::config::WorkbenchConfig;
use crate::constants::{EvaluationErrorType, language_name};
use crate::error::{CatError, CatResult};
use crate::glossary::{ConsistencyReport, GlossaryTerm, validate_glossary_consistency};
use crate::quality::{QualityChecker, QualityIssue, QualitySummary, summarize_issues};
use crate::readability::{ReadabilityResult, calculate_readability};
use crate::segmentation::{
    SegmentPair, join_source_segments, join_target_segments, translation_progress,
};

/// A reviewer's judgement on one segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEvaluation {
    pub segment_id: String,
    pub error_type: EvaluationErrorType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl SegmentEvaluation {
    /// Parse `<segment>:<category>[:<note>]`, where `<segment>` is the
    /// original index of a pair in `pairs`
    ///
    /// ```ignore
    /// let evaluation = SegmentEvaluation::parse("2:terminology:use 'nuvem'", &pairs)?;
    /// ```
    pub fn parse(input: &str, pairs: &[SegmentPair]) -> CatResult<Self> {
        let mut parts = input.splitn(3, ':');
        let index = parts.next().unwrap_or_default().trim();
        let category = parts.next().unwrap_or_default();

        let index: usize = index
            .parse()
            .map_err(|_| CatError::Config(format!("Invalid segment index in '{}'", input)))?;
        let pair = pairs
            .iter()
            .find(|p| p.original_index == index && !p.is_line_break)
            .ok_or_else(|| CatError::Config(format!("No segment at index {}", index)))?;
        let error_type = category.parse::<EvaluationErrorType>().map_err(CatError::Config)?;

        Ok(SegmentEvaluation {
            segment_id: pair.id.clone(),
            error_type,
            note: parts.next().unwrap_or_default().trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReport {
    pub segment: SegmentPair,
    pub issues: Vec<QualityIssue>,
    pub aligned_elements: usize,
    pub unaligned_source_elements: usize,
    pub glossary: ConsistencyReport,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationReport {
    pub source_language: String,
    pub target_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language_name: Option<&'static str>,
    pub translated_segments: usize,
    pub total_segments: usize,
    pub summary: QualitySummary,
    pub segments: Vec<SegmentReport>,
    pub source_readability: ReadabilityResult,
    pub target_readability: ReadabilityResult,
    pub evaluations: Vec<SegmentEvaluation>,
}

/// Analyze every segment of a document
///
/// Line-break pairs are kept in the report but carry no analysis.
/// Evaluations referring to unknown segment ids are dropped.
pub fn build_report(
    pairs: &[SegmentPair],
    glossary: &[GlossaryTerm],
    config: &WorkbenchConfig,
    evaluations: Vec<SegmentEvaluation>,
) -> TranslationReport {
    let checker = QualityChecker::new(config.quality.clone());
    let mut all_issues = Vec::new();

    let segments: Vec<SegmentReport> = pairs
        .iter()
        .map(|pair| {
            if pair.is_line_break {
                return SegmentReport {
                    segment: pair.clone(),
                    issues: Vec::new(),
                    aligned_elements: 0,
                    unaligned_source_elements: 0,
                    glossary: validate_glossary_consistency("", "", glossary),
                };
            }

            let issues = checker.check(&pair.source, &pair.target);
            all_issues.extend(issues.iter().cloned());

            let alignment = align_texts(&pair.source, &pair.target);
            let aligned = alignment
                .source_elements
                .iter()
                .filter(|e| alignment.matches.contains_key(&e.id))
                .count();

            SegmentReport {
                segment: pair.clone(),
                issues,
                aligned_elements: aligned,
                unaligned_source_elements: alignment.source_elements.len() - aligned,
                glossary: validate_glossary_consistency(&pair.source, &pair.target, glossary),
            }
        })
        .collect();

    let evaluations: Vec<SegmentEvaluation> = evaluations
        .into_iter()
        .filter(|evaluation| pairs.iter().any(|p| p.id == evaluation.segment_id))
        .collect();

    let (translated_segments, total_segments) = translation_progress(pairs);
    let languages = &config.languages;
    debug!(
        segments = total_segments,
        translated = translated_segments,
        issues = all_issues.len(),
        "Built translation report"
    );

    TranslationReport {
        source_language: languages.source.clone(),
        target_language: languages.target.clone(),
        source_language_name: language_name(&languages.source),
        target_language_name: language_name(&languages.target),
        translated_segments,
        total_segments,
        summary: summarize_issues(&all_issues),
        segments,
        source_readability: calculate_readability(&join_source_segments(pairs), &languages.source),
        target_readability: calculate_readability(&join_target_segments(pairs), &languages.target),
        evaluations,
    }
}

pub fn export_report_json(report: &TranslationReport) -> CatResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// The translated document as plain text
pub fn export_translated_text(pairs: &[SegmentPair]) -> String {
    join_target_segments(pairs)
}
