//! Mock machine translator
//!
//! Deterministic and API-free, for tests and offline runs of the CLI.
//!
//! ```ignore
//! let mock = MockTranslator::new(MockMode::Tagged);
//! assert_eq!(mock.translate("Hello.", "en", "pt").await?, "[pt] Hello.");
//! ```

use async_trait::async_trait;
use std::collections::HashMap;

use super::MachineTranslator;
use crate::error::{CatError, CatResult};

#[derive(Debug, Clone)]
pub enum MockMode {
    /// Prefix the target language: "Hello." → "[pt] Hello."
    /// Numbers, tags and final punctuation survive untouched
    Tagged,

    /// Predefined (text, target_lang) → translation pairs,
    /// falling back to `Tagged`
    Mappings(HashMap<(String, String), String>),

    /// Every call fails with this message
    Error(String),

    /// Return input unchanged
    NoOp,
}

#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self { mode }
    }

    fn apply_translation(&self, text: &str, target: &str) -> CatResult<String> {
        match &self.mode {
            MockMode::Tagged => Ok(format!("[{}] {}", target, text)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("[{}] {}", target, text)))
            }
            MockMode::Error(msg) => Err(CatError::Translation(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> CatResult<String> {
        self.apply_translation(text, target_lang)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        _source_lang: &str,
        target_lang: &str,
    ) -> CatResult<Vec<String>> {
        texts
            .iter()
            .map(|text| self.apply_translation(text, target_lang))
            .collect()
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tagged_translation() {
        let mock = MockTranslator::new(MockMode::Tagged);
        let result = mock.translate("There are 5 apples.", "en", "pt").await.unwrap();
        assert_eq!(result, "[pt] There are 5 apples.");
    }

    #[tokio::test]
    async fn test_mapping_with_fallback() {
        let mut map = HashMap::new();
        map.insert(
            ("Hello.".to_string(), "pt".to_string()),
            "Olá.".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));

        let texts = vec!["Hello.".to_string(), "Bye.".to_string()];
        let results = mock.translate_batch(&texts, "en", "pt").await.unwrap();
        assert_eq!(results, vec!["Olá.", "[pt] Bye."]);
    }

    #[tokio::test]
    async fn test_error_mode() {
        let mock = MockTranslator::new(MockMode::Error("API unavailable".to_string()));
        match mock.translate("hello", "en", "fr").await {
            Err(CatError::Translation(msg)) => assert_eq!(msg, "API unavailable"),
            _ => panic!("Expected Translation error"),
        }
    }

    #[tokio::test]
    async fn test_noop_batch_returns_unchanged() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let texts = vec!["hello".to_string(), "world".to_string()];
        let results = mock.translate_batch(&texts, "en", "fr").await.unwrap();
        assert_eq!(results, texts);
    }

    #[tokio::test]
    async fn test_batch_handles_empty_input() {
        let mock = MockTranslator::new(MockMode::Tagged);
        let results = mock.translate_batch(&[], "en", "fr").await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_provider_name() {
        let mock = MockTranslator::new(MockMode::NoOp);
        assert_eq!(mock.provider_name(), "Mock Translator");
    }
}
