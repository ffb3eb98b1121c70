//! Lookup tables shared across the workbench

use serde::{Deserialize, Serialize};

/// A language the workbench offers for source or target text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", native_name: "English" },
    Language { code: "pt", name: "Portuguese", native_name: "Português" },
    Language { code: "pt-BR", name: "Portuguese (Brazil)", native_name: "Português (Brasil)" },
    Language { code: "pt-PT", name: "Portuguese (Portugal)", native_name: "Português (Portugal)" },
    Language { code: "es", name: "Spanish", native_name: "Español" },
    Language { code: "fr", name: "French", native_name: "Français" },
    Language { code: "de", name: "German", native_name: "Deutsch" },
    Language { code: "it", name: "Italian", native_name: "Italiano" },
    Language { code: "ja", name: "Japanese", native_name: "日本語" },
    Language { code: "zh", name: "Chinese", native_name: "中文" },
    Language { code: "ko", name: "Korean", native_name: "한국어" },
    Language { code: "ru", name: "Russian", native_name: "Русский" },
];

/// Language codes that select the Portuguese readability heuristics.
/// Matched literally, case included.
pub const PORTUGUESE_CODES: &[&str] = &["pt", "pt-BR", "pt-PT"];

/// Technical terms expected to survive translation verbatim
pub const DEFAULT_TECHNICAL_TERMS: &[&str] = &[
    "API",
    "HTML",
    "CSS",
    "JavaScript",
    "React",
    "Vue",
    "Angular",
    "Node.js",
    "TypeScript",
    "Docker",
    "Kubernetes",
    "Git",
];

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES.iter().find(|l| l.code == code).map(|l| l.name)
}

pub fn is_supported_language(code: &str) -> bool {
    LANGUAGES.iter().any(|l| l.code == code)
}

pub fn is_portuguese(code: &str) -> bool {
    PORTUGUESE_CODES.contains(&code)
}

/// Categories a reviewer can assign when evaluating a translated segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationErrorType {
    Accuracy,
    Fluency,
    Terminology,
    Style,
    LocaleConvention,
    Other,
}

impl EvaluationErrorType {
    pub const ALL: [EvaluationErrorType; 6] = [
        EvaluationErrorType::Accuracy,
        EvaluationErrorType::Fluency,
        EvaluationErrorType::Terminology,
        EvaluationErrorType::Style,
        EvaluationErrorType::LocaleConvention,
        EvaluationErrorType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EvaluationErrorType::Accuracy => "Accuracy",
            EvaluationErrorType::Fluency => "Fluency",
            EvaluationErrorType::Terminology => "Terminology",
            EvaluationErrorType::Style => "Style",
            EvaluationErrorType::LocaleConvention => "Locale convention",
            EvaluationErrorType::Other => "Other",
        }
    }
}

impl std::str::FromStr for EvaluationErrorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        EvaluationErrorType::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase().replace(' ', "-") == normalized)
            .ok_or_else(|| format!("Unknown evaluation error type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup() {
        assert_eq!(language_name("pt-BR"), Some("Portuguese (Brazil)"));
        assert_eq!(language_name("xx"), None);
        assert!(is_supported_language("ja"));
        assert!(!is_supported_language("EN"));
    }

    #[test]
    fn test_portuguese_codes_are_literal() {
        assert!(is_portuguese("pt"));
        assert!(is_portuguese("pt-BR"));
        assert!(is_portuguese("pt-PT"));
        assert!(!is_portuguese("pt-br"));
        assert!(!is_portuguese("en"));
    }

    #[test]
    fn test_evaluation_error_type_parsing() {
        assert_eq!(
            "terminology".parse::<EvaluationErrorType>(),
            Ok(EvaluationErrorType::Terminology)
        );
        assert_eq!(
            "locale_convention".parse::<EvaluationErrorType>(),
            Ok(EvaluationErrorType::LocaleConvention)
        );
        assert!("grammar".parse::<EvaluationErrorType>().is_err());
    }
}
