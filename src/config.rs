//! Workbench configuration
//!
//! Loaded from a TOML file. Every section and field is optional and falls
//! back to the built-in defaults:
//!
//! ```toml
//! debug = false
//!
//! [segmentation]
//! granularity = "sentence"
//!
//! [quality]
//! min_source_length = 10
//! min_length_ratio = 0.5
//! max_length_ratio = 2.0
//! technical_terms = ["API", "HTML", "Docker"]
//!
//! [glossary]
//! source = "https://example.org/glossary.csv"
//!
//! [languages]
//! source = "en"
//! target = "pt-BR"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::constants::{DEFAULT_TECHNICAL_TERMS, is_supported_language};
use crate::error::{CatError, CatResult};
use crate::segmentation::Granularity;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Turns on debug-level logging in the binaries
    pub debug: bool,
    pub segmentation: SegmentationSettings,
    pub quality: QualitySettings,
    pub glossary: GlossarySettings,
    pub languages: LanguageSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SegmentationSettings {
    pub granularity: Granularity,
}

/// Thresholds used by the quality checker
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QualitySettings {
    /// Sources shorter than this many characters skip the length check
    pub min_source_length: usize,
    pub min_length_ratio: f64,
    pub max_length_ratio: f64,
    pub technical_terms: Vec<String>,
}

impl Default for QualitySettings {
    fn default() -> Self {
        QualitySettings {
            min_source_length: 10,
            min_length_ratio: 0.5,
            max_length_ratio: 2.0,
            technical_terms: DEFAULT_TECHNICAL_TERMS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlossarySettings {
    /// File path or http(s) URL of a glossary CSV
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    pub source: String,
    pub target: String,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        LanguageSettings {
            source: "en".to_string(),
            target: "pt-BR".to_string(),
        }
    }
}

impl LanguageSettings {
    /// Configured codes missing from the language table
    pub fn unsupported(&self) -> Vec<&str> {
        [self.source.as_str(), self.target.as_str()]
            .into_iter()
            .filter(|code| !is_supported_language(code))
            .collect()
    }
}

impl WorkbenchConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> CatResult<Self> {
        let config: WorkbenchConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CatResult<()> {
        let quality = &self.quality;
        if !(quality.min_length_ratio >= 0.0 && quality.min_length_ratio <= quality.max_length_ratio)
        {
            return Err(CatError::Config(format!(
                "min_length_ratio ({}) must be between 0 and max_length_ratio ({})",
                quality.min_length_ratio, quality.max_length_ratio
            )));
        }
        for code in [&self.languages.source, &self.languages.target] {
            crate::translator::validate_language_code(code)?;
        }
        for code in self.languages.unsupported() {
            warn!(code, "Language is not in the supported list, using English rules");
        }
        Ok(())
    }
}

/// Load a configuration file
///
/// # Errors
/// - File cannot be read
/// - Invalid TOML or field types
/// - Inconsistent thresholds or malformed language codes
pub fn load_config_from_file(path: &Path) -> CatResult<WorkbenchConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CatError::Config(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    WorkbenchConfig::from_toml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_builtin_constants() {
        let config = WorkbenchConfig::default();
        assert!(!config.debug);
        assert_eq!(config.segmentation.granularity, Granularity::Sentence);
        assert_eq!(config.quality.min_source_length, 10);
        assert_eq!(config.quality.min_length_ratio, 0.5);
        assert_eq!(config.quality.max_length_ratio, 2.0);
        assert_eq!(config.quality.technical_terms.len(), 12);
        assert!(config.glossary.source.is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = WorkbenchConfig::from_toml_str("").unwrap();
        assert_eq!(config.quality, QualitySettings::default());
        assert_eq!(config.languages.target, "pt-BR");
    }

    #[test]
    fn test_partial_sections() {
        let config = WorkbenchConfig::from_toml_str(
            r#"
            debug = true

            [segmentation]
            granularity = "paragraph"

            [quality]
            max_length_ratio = 3.0
            technical_terms = ["Rust"]

            [glossary]
            source = "glossary.csv"
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.segmentation.granularity, Granularity::Paragraph);
        assert_eq!(config.quality.max_length_ratio, 3.0);
        assert_eq!(config.quality.min_length_ratio, 0.5);
        assert_eq!(config.quality.technical_terms, vec!["Rust".to_string()]);
        assert_eq!(config.glossary.source.as_deref(), Some("glossary.csv"));
    }

    #[test]
    fn test_invalid_ratios_rejected() {
        let result = WorkbenchConfig::from_toml_str(
            "[quality]\nmin_length_ratio = 2.5\nmax_length_ratio = 2.0\n",
        );
        assert!(matches!(result, Err(CatError::Config(_))));
    }

    #[test]
    fn test_invalid_language_rejected() {
        let result = WorkbenchConfig::from_toml_str("[languages]\nsource = \"en@US\"\n");
        assert!(matches!(result, Err(CatError::InvalidLanguage(_))));
    }

    #[test]
    fn test_unlisted_language_accepted() {
        let config =
            WorkbenchConfig::from_toml_str("[languages]\nsource = \"eo\"\ntarget = \"pt-BR\"\n")
                .unwrap();
        assert_eq!(config.languages.unsupported(), vec!["eo"]);
        assert!(WorkbenchConfig::default().languages.unsupported().is_empty());
    }

    #[test]
    fn test_unknown_granularity_rejected() {
        let result = WorkbenchConfig::from_toml_str("[segmentation]\ngranularity = \"word\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[languages]\nsource = \"pt\"\ntarget = \"en\"").unwrap();

        let config = load_config_from_file(file.path()).unwrap();
        assert_eq!(config.languages.source, "pt");
        assert_eq!(config.languages.target, "en");
    }

    #[test]
    fn test_missing_file() {
        let result = load_config_from_file(Path::new("/nonexistent/catwork.toml"));
        assert!(matches!(result, Err(CatError::Config(_))));
    }
}
