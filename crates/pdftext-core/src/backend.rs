use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the backend reads the document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on disk, opened by the backend directly.
    Path(PathBuf),
    /// An in-memory PDF, e.g. a downloaded response body.
    Bytes(Vec<u8>),
}

/// An opened document. Dropping it releases the underlying handle.
pub trait PdfDocument {
    fn page_count(&self) -> Result<usize, BackendError>;

    /// Reading-order text of the page at `index` (0-based).
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}

/// Trait for PDF text extraction backends.
///
/// Implementors only open documents and expose per-page text; page ordering,
/// separators and error folding live in [`crate::Extractor`].
pub trait PdfBackend: Send + Sync {
    fn open(&self, source: DocumentSource) -> Result<Box<dyn PdfDocument>, BackendError>;
}
