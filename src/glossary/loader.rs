//! Glossary loading
//!
//! A glossary is fetched once per session from a file or an HTTP(S) URL and
//! parsed with [`parse_csv_content`]. Loading never fails: any fetch or
//! parse problem is logged and yields an empty glossary, so callers cannot
//! tell "no terms defined" apart from "load failed".
//!
//! # Example
//!
//! ```ignore
//! use catwork::glossary::{glossary_source_for, load_glossary};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = glossary_source_for("https://example.org/glossary.csv").unwrap();
//!     let terms = load_glossary(source.as_ref()).await;
//!     println!("{} terms", terms.len());
//! }
//! ```

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use super::GlossaryTerm;
use super::csv::parse_csv_content;
use crate::error::{CatError, CatResult};

/// Where glossary CSV text comes from
#[async_trait]
pub trait GlossarySource: Send + Sync {
    /// Fetch the raw CSV text
    async fn fetch(&self) -> CatResult<String>;

    /// Human-readable location, used in logs
    fn source_name(&self) -> &str;
}

/// Glossary stored in a local file
#[derive(Debug, Clone)]
pub struct FileGlossarySource {
    path: PathBuf,
    name: String,
}

impl FileGlossarySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        FileGlossarySource { path, name }
    }
}

#[async_trait]
impl GlossarySource for FileGlossarySource {
    async fn fetch(&self) -> CatResult<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Glossary published at an HTTP(S) URL
#[derive(Clone)]
pub struct HttpGlossarySource {
    url: String,
    client: reqwest::Client,
}

impl HttpGlossarySource {
    /// Create a source for the given URL
    ///
    /// # Errors
    /// - URL is not http(s)
    /// - HTTP client cannot be created
    pub fn new(url: &str) -> CatResult<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CatError::Glossary(format!("Not an HTTP(S) URL: {}", url)));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CatError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpGlossarySource {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl GlossarySource for HttpGlossarySource {
    async fn fetch(&self) -> CatResult<String> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatError::Network(format!(
                "GET {} returned status {}",
                self.url, status
            )));
        }
        Ok(response.text().await?)
    }

    fn source_name(&self) -> &str {
        &self.url
    }
}

/// Pick a source for a location: URLs are fetched over HTTP, anything else
/// is read as a file path
pub fn glossary_source_for(location: &str) -> CatResult<Box<dyn GlossarySource>> {
    let location = location.trim();
    if location.is_empty() {
        return Err(CatError::Glossary("Glossary location is empty".to_string()));
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpGlossarySource::new(location)?))
    } else {
        Ok(Box::new(FileGlossarySource::new(location)))
    }
}

/// Fetch and parse a glossary
///
/// # Returns
/// The parsed terms, or an empty vector when the source cannot be read.
pub async fn load_glossary(source: &dyn GlossarySource) -> Vec<GlossaryTerm> {
    match source.fetch().await {
        Ok(content) => {
            let terms = parse_csv_content(&content);
            info!(
                source = source.source_name(),
                terms = terms.len(),
                "Loaded glossary"
            );
            terms
        }
        Err(e) => {
            warn!(
                source = source.source_name(),
                error = %e,
                "Failed to load glossary, continuing without terms"
            );
            Vec::new()
        }
    }
}
