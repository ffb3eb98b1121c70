//! Machine translation boundary
//!
//! The workbench does not implement translation itself. Providers plug in
//! through [`MachineTranslator`]; [`pretranslate_segments`] fills untranslated
//! segment pairs with suggestions from one of them.
//!
//! # Example
//!
//! ```ignore
//! use catwork::translator::{MockMode, MockTranslator, pretranslate_segments};
//!
//! let mock = MockTranslator::new(MockMode::Tagged);
//! let pairs = pretranslate_segments(&pairs, &mock, "en", "pt-BR").await?;
//! ```

pub mod mock;

pub use mock::{MockMode, MockTranslator};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{CatError, CatResult};
use crate::segmentation::{SegmentPair, ensure_segment_integrity};

/// Generic trait for machine translation providers
///
/// All methods are async to support I/O-bound providers.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate one text
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_lang` - Source language code (e.g., "en")
    /// * `target_lang` - Target language code (e.g., "pt-BR")
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
    -> CatResult<String>;

    /// Translate several texts in one request
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - Output length equals input length
    async fn translate_batch(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> CatResult<Vec<String>>;

    /// Name used in logs
    fn provider_name(&self) -> &str;
}

/// Check that a language code is non-empty and made of ASCII letters,
/// digits, `-` and `_`
pub fn validate_language_code(code: &str) -> CatResult<()> {
    if code.is_empty() {
        return Err(CatError::InvalidLanguage(
            "Language code is empty".to_string(),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CatError::InvalidLanguage(format!(
            "Invalid characters in language code: {}",
            code
        )));
    }

    Ok(())
}

/// Fill every untranslated, non-line-break pair with a machine suggestion
///
/// Pairs that already have a target are left alone. All sources go to the
/// provider in one batch, and the line-break invariants are restored
/// afterwards.
///
/// # Errors
/// - Invalid language codes
/// - Provider failure
/// - Provider returned a different number of translations
pub async fn pretranslate_segments(
    pairs: &[SegmentPair],
    translator: &dyn MachineTranslator,
    source_lang: &str,
    target_lang: &str,
) -> CatResult<Vec<SegmentPair>> {
    validate_language_code(source_lang)?;
    validate_language_code(target_lang)?;

    let pending: Vec<usize> = pairs
        .iter()
        .enumerate()
        .filter(|(_, pair)| !pair.is_line_break && !pair.is_translated)
        .map(|(i, _)| i)
        .collect();

    if pending.is_empty() {
        debug!("No segments need translation");
        return Ok(ensure_segment_integrity(pairs));
    }

    let texts: Vec<String> = pending.iter().map(|&i| pairs[i].source.clone()).collect();
    info!(
        provider = translator.provider_name(),
        segments = texts.len(),
        source_lang,
        target_lang,
        "Requesting translations"
    );

    let translations = translator
        .translate_batch(&texts, source_lang, target_lang)
        .await?;
    if translations.len() != texts.len() {
        return Err(CatError::Translation(format!(
            "{} returned {} translations for {} segments",
            translator.provider_name(),
            translations.len(),
            texts.len()
        )));
    }

    let mut updated = pairs.to_vec();
    for (index, translation) in pending.into_iter().zip(translations) {
        updated[index] = updated[index].with_target(translation.trim());
    }

    Ok(ensure_segment_integrity(&updated))
}
