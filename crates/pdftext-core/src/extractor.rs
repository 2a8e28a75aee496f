use std::path::PathBuf;

use tracing::{debug, warn};

use crate::backend::{BackendError, DocumentSource, PdfBackend, PdfDocument};
use crate::fetch::{fetch_pdf, is_url};
use crate::{Config, ExtractError};

/// Appended after every page's text, including the last one.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Prefix of the text returned in place of a document when extraction fails.
pub const ERROR_PREFIX: &str = "Error extracting text: ";

/// A document reference as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    Url(String),
    Path(PathBuf),
}

impl DocumentRef {
    pub fn parse(input: &str) -> Self {
        if is_url(input) {
            DocumentRef::Url(input.to_string())
        } else {
            DocumentRef::Path(PathBuf::from(input))
        }
    }
}

/// Resolves a reference to a document and concatenates its page text.
pub struct Extractor {
    backend: Box<dyn PdfBackend>,
    client: reqwest::Client,
    config: Config,
}

impl Extractor {
    pub fn new(backend: impl PdfBackend + 'static, config: Config) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self {
            backend: Box::new(backend),
            client,
            config,
        }
    }

    /// Extract all page text, reporting failures as a typed error.
    pub async fn try_extract(&self, input: &str) -> Result<String, ExtractError> {
        let source = match DocumentRef::parse(input) {
            DocumentRef::Url(url) => {
                let bytes = fetch_pdf(&self.client, &url, self.config.http_timeout).await?;
                DocumentSource::Bytes(bytes)
            }
            DocumentRef::Path(path) => {
                debug!(path = %path.display(), "opening local PDF");
                DocumentSource::Path(path)
            }
        };

        // The handle is dropped when this scope ends, on success and on error.
        let document = self.backend.open(source)?;
        Ok(collect_pages(document.as_ref())?)
    }

    /// Extract all page text, folding any failure into the returned string.
    ///
    /// A failed extraction reads `"Error extracting text: <message>"`. Callers
    /// that must tell the two apart should use [`Extractor::try_extract`].
    pub async fn extract(&self, input: &str) -> String {
        fold_result(self.try_extract(input).await)
    }
}

/// Walk pages in order, appending each page's text and [`PAGE_SEPARATOR`].
pub fn collect_pages(document: &dyn PdfDocument) -> Result<String, BackendError> {
    let page_count = document.page_count()?;
    debug!(page_count, "extracting pages");

    let mut text = String::new();
    for index in 0..page_count {
        text.push_str(&document.page_text(index)?);
        text.push_str(PAGE_SEPARATOR);
    }
    Ok(text)
}

/// Collapse an extraction result into the single text value the CLI reports.
pub fn fold_result(result: Result<String, ExtractError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            debug!(error = %e, "extraction failed");
            format!("{ERROR_PREFIX}{e}")
        }
    }
}
