//! Error types for the fallible surfaces of the workbench
//!
//! The analysis engines (segmentation, alignment, quality, readability and
//! glossary matching) are total functions and never produce these errors.
//! Only configuration loading, glossary fetching, translation providers and
//! report export can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatError {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
    /// Local file system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Glossary resource was unusable
    #[error("Glossary error: {0}")]
    Glossary(String),
    /// HTTP request failed or returned a non-success status
    #[error("Network error: {0}")]
    Network(String),
    /// Machine translation provider failed
    #[error("Translation error: {0}")]
    Translation(String),
    /// Language code is empty or malformed
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),
    /// Report could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CatError {
    fn from(err: reqwest::Error) -> Self {
        CatError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for CatError {
    fn from(err: toml::de::Error) -> Self {
        CatError::Config(err.to_string())
    }
}

/// Result type for workbench operations
pub type CatResult<T> = Result<T, CatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            CatError::Glossary("empty".to_string()).to_string(),
            "Glossary error: empty"
        );
        assert_eq!(
            CatError::InvalidLanguage("x@y".to_string()).to_string(),
            "Invalid language code: x@y"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CatError = io.into();
        assert!(matches!(err, CatError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: CatError = parse_err.into();
        assert!(matches!(err, CatError::Config(_)));
    }
}
