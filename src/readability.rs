//! Readability Analyzer
//!
//! Computes five classic readability indices over a text:
//!
//! | Index | Scale | Syllables |
//! |-------|-------|-----------|
//! | Flesch Reading Ease | 0-100, higher is easier | yes |
//! | Flesch-Kincaid Grade | 0-18 | yes |
//! | Coleman-Liau | 0-18 | no |
//! | Gunning Fog | 0-18 | complex words |
//! | SMOG | 0-18, needs 3+ sentences | complex words |
//!
//! Portuguese (`pt`, `pt-BR`, `pt-PT`) uses its own syllable heuristic and
//! adjusted constants; every other language code is treated as English.
//! Syllable counting is rule based and approximate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::is_portuguese;

static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+|[^.!?]+$").expect("valid sentence regex"));

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

static ENGLISH_SILENT_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid silent suffix regex")
});

static ENGLISH_VOWEL_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouy]{1,2}").expect("valid vowel group regex"));

const MAX_GRADE: f64 = 18.0;
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadabilityLevel {
    VeryEasy,
    Easy,
    Medium,
    Difficult,
    VeryDifficult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityScore {
    pub score: f64,
    /// Banded label, localized for the analyzed language
    pub grade: String,
    pub level: ReadabilityLevel,
}

impl ReadabilityScore {
    /// Neutral score used when an index cannot be computed
    pub fn not_available() -> Self {
        ReadabilityScore {
            score: 0.0,
            grade: NOT_AVAILABLE.to_string(),
            level: ReadabilityLevel::Medium,
        }
    }

    pub fn is_available(&self) -> bool {
        self.grade != NOT_AVAILABLE
    }
}

/// Raw counts the indices are computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub sentences: usize,
    pub words: usize,
    /// Characters excluding whitespace
    pub characters: usize,
    pub syllables: usize,
    /// Words with three or more syllables
    pub complex_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityResult {
    pub flesch: ReadabilityScore,
    pub flesch_kincaid: ReadabilityScore,
    pub coleman_liau: ReadabilityScore,
    pub gunning_fog: ReadabilityScore,
    pub smog: ReadabilityScore,
    /// Mean of the four grade-scale indices; Flesch is excluded
    pub average_grade: f64,
    pub statistics: TextStatistics,
}

/// Language-dependent syllable rules and formula constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageRules {
    pub portuguese: bool,
}

impl LanguageRules {
    pub fn for_language(language_code: &str) -> Self {
        LanguageRules {
            portuguese: is_portuguese(language_code),
        }
    }

    pub fn count_syllables(self, word: &str) -> usize {
        if self.portuguese {
            count_syllables_portuguese(word)
        } else {
            count_syllables_english(word)
        }
    }

    fn adjustment(self, factor: f64) -> f64 {
        if self.portuguese { factor } else { 1.0 }
    }
}

impl From<&str> for LanguageRules {
    fn from(language_code: &str) -> Self {
        LanguageRules::for_language(language_code)
    }
}

/// Compute all readability indices for a text
///
/// # Arguments
/// * `text` - Text to analyze
/// * `language_code` - `pt`, `pt-BR` or `pt-PT` select Portuguese rules
///
/// # Returns
/// A result whose scores are always finite and within their ranges. Text
/// without words or sentences gets N/A scores and an average grade of 0.
pub fn calculate_readability(text: &str, language_code: &str) -> ReadabilityResult {
    let rules = LanguageRules::for_language(language_code);
    let statistics = text_statistics(text, rules);

    debug!(
        language = language_code,
        sentences = statistics.sentences,
        words = statistics.words,
        syllables = statistics.syllables,
        "Computed text statistics"
    );

    if statistics.words == 0 || statistics.sentences == 0 {
        return ReadabilityResult {
            flesch: ReadabilityScore::not_available(),
            flesch_kincaid: ReadabilityScore::not_available(),
            coleman_liau: ReadabilityScore::not_available(),
            gunning_fog: ReadabilityScore::not_available(),
            smog: ReadabilityScore::not_available(),
            average_grade: 0.0,
            statistics,
        };
    }

    let flesch = flesch_reading_ease(&statistics, rules);
    let flesch_kincaid = flesch_kincaid_grade(&statistics, rules);
    let coleman_liau = coleman_liau_index(&statistics, rules);
    let gunning_fog = gunning_fog_index(&statistics, rules);
    let smog = smog_index(&statistics, rules);

    let average_grade =
        (flesch_kincaid.score + coleman_liau.score + gunning_fog.score + smog.score) / 4.0;

    ReadabilityResult {
        flesch,
        flesch_kincaid,
        coleman_liau,
        gunning_fog,
        smog,
        average_grade,
        statistics,
    }
}

fn text_statistics(text: &str, rules: LanguageRules) -> TextStatistics {
    let sentences = count_sentences(text);
    let mut words = 0;
    let mut syllables = 0;
    let mut complex_words = 0;

    for word in WORD.find_iter(text) {
        let count = rules.count_syllables(word.as_str());
        words += 1;
        syllables += count;
        if count >= 3 {
            complex_words += 1;
        }
    }

    TextStatistics {
        sentences,
        words,
        characters: text.chars().filter(|c| !c.is_whitespace()).count(),
        syllables,
        complex_words,
    }
}

/// Sentence-like runs, ignoring runs made only of whitespace
pub fn count_sentences(text: &str) -> usize {
    SENTENCE
        .find_iter(text)
        .filter(|m| !m.as_str().trim().is_empty())
        .count()
}

pub fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}

/// English syllable estimate
///
/// Counts vowel groups after dropping a silent trailing `e`, `es` or `ed`.
/// Words of three letters or fewer count as one syllable.
pub fn count_syllables_english(word: &str) -> usize {
    let word: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if word.chars().count() <= 3 {
        return 1;
    }

    let without_suffix = ENGLISH_SILENT_SUFFIX.replace(&word, "");
    let stripped = without_suffix
        .strip_prefix('y')
        .unwrap_or(&without_suffix);

    ENGLISH_VOWEL_GROUP.find_iter(stripped).count().max(1)
}

fn is_portuguese_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'â' | 'ê' | 'ô' | 'ã' | 'õ'
            | 'à' | 'ü'
    )
}

/// Two adjacent vowels that stay in one syllable
fn is_portuguese_diphthong(first: char, second: char) -> bool {
    let glide = matches!(second, 'i' | 'u') && first != second;
    let nasal = matches!((first, second), ('ã', 'o') | ('ã', 'e') | ('õ', 'e'));
    glide || nasal
}

/// Portuguese syllable estimate
///
/// Each vowel opens a syllable unless it closes a diphthong (`ai`, `ou`,
/// `ão`, `õe`, ...). Accented `í`/`ú` mark a hiatus and open a new
/// syllable. A `u` between `q`/`g` and a vowel (`que`, `gua`) joins the
/// following vowel.
pub fn count_syllables_portuguese(word: &str) -> usize {
    let chars: Vec<char> = word.chars().flat_map(char::to_lowercase).collect();
    let mut count = 0;
    let mut previous_vowel: Option<char> = None;

    for (i, &c) in chars.iter().enumerate() {
        if !is_portuguese_vowel(c) {
            previous_vowel = None;
            continue;
        }

        let glide_u = c == 'u'
            && i > 0
            && matches!(chars[i - 1], 'q' | 'g')
            && chars.get(i + 1).is_some_and(|&next| is_portuguese_vowel(next));
        if glide_u {
            continue;
        }

        match previous_vowel {
            Some(prev) if is_portuguese_diphthong(prev, c) => {}
            _ => count += 1,
        }
        previous_vowel = Some(c);
    }

    count.max(1)
}

fn clamp(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

pub fn flesch_reading_ease(
    stats: &TextStatistics,
    rules: impl Into<LanguageRules>,
) -> ReadabilityScore {
    let rules = rules.into();
    let base = if rules.portuguese { 248.835 } else { 206.835 };
    let score = clamp(
        base - 1.015 * ratio(stats.words, stats.sentences)
            - 84.6 * ratio(stats.syllables, stats.words),
        100.0,
    );

    ReadabilityScore {
        score,
        grade: ease_label(score, rules.portuguese).to_string(),
        level: ease_level(score),
    }
}

pub fn flesch_kincaid_grade(
    stats: &TextStatistics,
    rules: impl Into<LanguageRules>,
) -> ReadabilityScore {
    let rules = rules.into();
    let raw = 0.39 * ratio(stats.words, stats.sentences)
        + 11.8 * ratio(stats.syllables, stats.words)
        - 15.59;
    grade_score(raw * rules.adjustment(1.15), rules.portuguese)
}

pub fn coleman_liau_index(
    stats: &TextStatistics,
    rules: impl Into<LanguageRules>,
) -> ReadabilityScore {
    let rules = rules.into();
    let letters = ratio(stats.characters, stats.words) * 100.0;
    let sentences = ratio(stats.sentences, stats.words) * 100.0;
    grade_score(0.0588 * letters - 0.296 * sentences - 15.8, rules.portuguese)
}

pub fn gunning_fog_index(
    stats: &TextStatistics,
    rules: impl Into<LanguageRules>,
) -> ReadabilityScore {
    let rules = rules.into();
    let raw = 0.4
        * (ratio(stats.words, stats.sentences) + 100.0 * ratio(stats.complex_words, stats.words));
    grade_score(raw * rules.adjustment(1.1), rules.portuguese)
}

/// SMOG grade; N/A below three sentences
pub fn smog_index(
    stats: &TextStatistics,
    rules: impl Into<LanguageRules>,
) -> ReadabilityScore {
    let rules = rules.into();
    if stats.sentences < 3 {
        return ReadabilityScore::not_available();
    }
    let raw = 1.043 * (stats.complex_words as f64 * 30.0 / stats.sentences as f64).sqrt() + 3.1291;
    grade_score(raw * rules.adjustment(1.05), rules.portuguese)
}

fn grade_score(raw: f64, portuguese: bool) -> ReadabilityScore {
    let score = clamp(raw, MAX_GRADE);
    ReadabilityScore {
        score,
        grade: grade_label(score, portuguese),
        level: grade_level(score),
    }
}

fn ease_level(score: f64) -> ReadabilityLevel {
    match score {
        s if s >= 80.0 => ReadabilityLevel::VeryEasy,
        s if s >= 60.0 => ReadabilityLevel::Easy,
        s if s >= 40.0 => ReadabilityLevel::Medium,
        s if s >= 20.0 => ReadabilityLevel::Difficult,
        _ => ReadabilityLevel::VeryDifficult,
    }
}

fn ease_label(score: f64, portuguese: bool) -> &'static str {
    if portuguese {
        match score {
            s if s >= 75.0 => "1º ao 5º ano",
            s if s >= 50.0 => "6º ao 9º ano",
            s if s >= 25.0 => "Ensino Médio",
            _ => "Ensino Superior",
        }
    } else {
        match score {
            s if s >= 90.0 => "5th grade",
            s if s >= 80.0 => "6th grade",
            s if s >= 70.0 => "7th grade",
            s if s >= 60.0 => "8th-9th grade",
            s if s >= 50.0 => "10th-12th grade",
            s if s >= 30.0 => "College",
            _ => "College graduate",
        }
    }
}

fn grade_level(score: f64) -> ReadabilityLevel {
    match score {
        s if s <= 6.0 => ReadabilityLevel::VeryEasy,
        s if s <= 8.0 => ReadabilityLevel::Easy,
        s if s <= 10.0 => ReadabilityLevel::Medium,
        s if s <= 12.0 => ReadabilityLevel::Difficult,
        _ => ReadabilityLevel::VeryDifficult,
    }
}

fn grade_label(score: f64, portuguese: bool) -> String {
    let year = (score.round() as u32).max(1);
    if portuguese {
        match year {
            1..=5 => format!("Ensino Fundamental I ({}º ano)", year),
            6..=9 => format!("Ensino Fundamental II ({}º ano)", year),
            10..=12 => "Ensino Médio".to_string(),
            13..=16 => "Ensino Superior".to_string(),
            _ => "Pós-graduação".to_string(),
        }
    } else {
        match year {
            1..=12 => format!("Grade {}", year),
            13..=16 => "College".to_string(),
            _ => "Graduate".to_string(),
        }
    }
}
