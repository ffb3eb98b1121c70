//! Quality Checker
//!
//! Compares a translated segment with its source and reports structural
//! discrepancies. The checks are independent heuristics and run in a fixed
//! order: numbers, tags, punctuation, length ratio, technical terms.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::QualitySettings;

static NUMBER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(?:[.,][0-9]+)*").expect("valid number token regex"));

/// HTML tags, `**bold**`, `__bold__`, `_italic_`, `` `code` `` and `[text](url)` links
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>|\*\*[^*]+\*\*|__[^_]+__|_[^_]+_|`[^`]+`|\[[^\]]+\]\([^)]+\)")
        .expect("valid markup tag regex")
});

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)[^>]*?(/?)>").expect("valid html tag regex")
});

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];
const TRACKED_PUNCTUATION: [char; 4] = ['?', '!', ':', ';'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    MissingNumber,
    DifferentNumber,
    MissingTag,
    MalformedTag,
    MissingPunctuation,
    LengthRatio,
    UntranslatedTerm,
}

/// Errors mean content is likely lost; warnings are stylistic hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_text: Option<String>,
}

impl QualityIssue {
    fn new(issue_type: IssueType, severity: Severity, description: String) -> Self {
        QualityIssue {
            issue_type,
            severity,
            description,
            source_text: None,
            target_text: None,
        }
    }

    fn with_source(mut self, text: &str) -> Self {
        self.source_text = Some(text.to_string());
        self
    }

    fn with_target(mut self, text: &str) -> Self {
        self.target_text = Some(text.to_string());
        self
    }
}

/// Issue counts grouped by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QualitySummary {
    pub errors: usize,
    pub warnings: usize,
}

pub fn summarize_issues(issues: &[QualityIssue]) -> QualitySummary {
    issues
        .iter()
        .fold(QualitySummary::default(), |mut summary, issue| {
            match issue.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
            summary
        })
}

/// Runs every check with a given set of thresholds
#[derive(Debug, Clone, Default)]
pub struct QualityChecker {
    settings: QualitySettings,
}

impl QualityChecker {
    pub fn new(settings: QualitySettings) -> Self {
        QualityChecker { settings }
    }

    /// Check a target against its source
    ///
    /// # Returns
    /// All issues found, or an empty vector when the target is blank.
    pub fn check(&self, source: &str, target: &str) -> Vec<QualityIssue> {
        if target.trim().is_empty() {
            return Vec::new();
        }

        let mut issues = check_numbers(source, target);
        issues.extend(check_tags(source, target));
        issues.extend(check_punctuation(source, target));
        issues.extend(check_length_ratio(
            source,
            target,
            self.settings.min_source_length,
            self.settings.min_length_ratio,
            self.settings.max_length_ratio,
        ));
        issues.extend(check_technical_terms(
            source,
            target,
            &self.settings.technical_terms,
        ));
        issues
    }
}

/// Run all checks with the default thresholds
pub fn run_quality_checks(source: &str, target: &str) -> Vec<QualityIssue> {
    QualityChecker::default().check(source, target)
}

/// Distinct matches of `pattern` in order of first appearance
fn unique_matches<'a>(pattern: &Regex, text: &'a str) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for m in pattern.find_iter(text) {
        if !seen.contains(&m.as_str()) {
            seen.push(m.as_str());
        }
    }
    seen
}

/// Compare the numbers of both texts by presence
///
/// A number repeated in the source only needs to appear once in the target.
pub fn check_numbers(source: &str, target: &str) -> Vec<QualityIssue> {
    let source_numbers = unique_matches(&NUMBER_TOKEN, source);
    let target_numbers = unique_matches(&NUMBER_TOKEN, target);
    let mut issues = Vec::new();

    for number in source_numbers.iter().filter(|n| !target_numbers.contains(*n)) {
        issues.push(
            QualityIssue::new(
                IssueType::MissingNumber,
                Severity::Error,
                format!("Number \"{}\" from the source is missing in the translation", number),
            )
            .with_source(number),
        );
    }

    for number in target_numbers.iter().filter(|n| !source_numbers.contains(*n)) {
        issues.push(
            QualityIssue::new(
                IssueType::DifferentNumber,
                Severity::Warning,
                format!("Number \"{}\" in the translation does not appear in the source", number),
            )
            .with_target(number),
        );
    }

    issues
}

/// Check that markup survives translation
///
/// Every source tag literal must appear verbatim in the target. HTML tags
/// balanced in the source must also be balanced in the target.
pub fn check_tags(source: &str, target: &str) -> Vec<QualityIssue> {
    let mut issues = Vec::new();

    for tag in unique_matches(&MARKUP_TAG, source) {
        if !target.contains(tag) {
            issues.push(
                QualityIssue::new(
                    IssueType::MissingTag,
                    Severity::Error,
                    format!("Tag {} is missing in the translation", tag),
                )
                .with_source(tag),
            );
        }
    }

    let source_balance = html_tag_balance(source);
    let target_balance = html_tag_balance(target);
    let mut names: Vec<&String> = source_balance.keys().collect();
    names.sort();

    for name in names {
        let (open, close) = source_balance[name];
        if open != close {
            continue;
        }
        let (target_open, target_close) = target_balance.get(name).copied().unwrap_or((0, 0));
        if target_open != target_close {
            issues.push(
                QualityIssue::new(
                    IssueType::MalformedTag,
                    Severity::Error,
                    format!(
                        "Tag <{}> is unbalanced in the translation ({} opening, {} closing)",
                        name, target_open, target_close
                    ),
                )
                .with_source(&format!("<{}>", name))
                .with_target(&format!("{} opening, {} closing", target_open, target_close)),
            );
        }
    }

    issues
}

/// Opening and closing counts per lowercase HTML tag name.
/// Self-closing tags are not counted.
fn html_tag_balance(text: &str) -> HashMap<String, (usize, usize)> {
    let mut balance: HashMap<String, (usize, usize)> = HashMap::new();
    for caps in HTML_TAG.captures_iter(text) {
        if !caps[3].is_empty() {
            continue;
        }
        let entry = balance.entry(caps[2].to_lowercase()).or_default();
        if caps[1].is_empty() {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }
    balance
}

/// Check sentence-final punctuation and the presence of `? ! : ;`
pub fn check_punctuation(source: &str, target: &str) -> Vec<QualityIssue> {
    let mut issues = Vec::new();
    let source_trimmed = source.trim_end();
    let target_trimmed = target.trim_end();

    if source_trimmed.ends_with(SENTENCE_TERMINATORS)
        && !target_trimmed.ends_with(SENTENCE_TERMINATORS)
    {
        let ending: String = source_trimmed
            .chars()
            .rev()
            .take_while(|c| SENTENCE_TERMINATORS.contains(c))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        issues.push(
            QualityIssue::new(
                IssueType::MissingPunctuation,
                Severity::Warning,
                "The translation does not end with sentence punctuation".to_string(),
            )
            .with_source(&ending),
        );
    }

    for mark in TRACKED_PUNCTUATION {
        if source.contains(mark) && !target.contains(mark) {
            issues.push(
                QualityIssue::new(
                    IssueType::MissingPunctuation,
                    Severity::Warning,
                    format!("Punctuation \"{}\" from the source is missing in the translation", mark),
                )
                .with_source(&mark.to_string()),
            );
        }
    }

    issues
}

/// Flag translations much shorter or longer than their source
///
/// Lengths are counted in characters. Sources shorter than
/// `min_source_length` are skipped. Bounds are exclusive: a ratio equal to
/// `min_ratio` or `max_ratio` passes.
pub fn check_length_ratio(
    source: &str,
    target: &str,
    min_source_length: usize,
    min_ratio: f64,
    max_ratio: f64,
) -> Vec<QualityIssue> {
    let source_len = source.chars().count();
    if source_len < min_source_length || source_len == 0 {
        return Vec::new();
    }

    let ratio = target.chars().count() as f64 / source_len as f64;
    let verdict = if ratio < min_ratio {
        "too short"
    } else if ratio > max_ratio {
        "too long"
    } else {
        return Vec::new();
    };

    vec![
        QualityIssue::new(
            IssueType::LengthRatio,
            Severity::Warning,
            format!(
                "The translation is {} compared to the source (ratio {:.2})",
                verdict, ratio
            ),
        )
        .with_target(&format!("{:.2}", ratio)),
    ]
}

/// Technical terms present in the source but absent from the target
pub fn check_technical_terms<S: AsRef<str>>(
    source: &str,
    target: &str,
    terms: &[S],
) -> Vec<QualityIssue> {
    terms
        .iter()
        .map(|term| term.as_ref())
        .filter(|term| source.contains(*term) && !target.contains(*term))
        .map(|term| {
            QualityIssue::new(
                IssueType::UntranslatedTerm,
                Severity::Warning,
                format!("Technical term \"{}\" does not appear in the translation", term),
            )
            .with_source(term)
        })
        .collect()
}
