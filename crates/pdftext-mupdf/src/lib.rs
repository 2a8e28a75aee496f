use mupdf::{Document, TextPageFlags};
use tracing::debug;

use pdftext_core::{BackendError, DocumentSource, PdfBackend, PdfDocument};

/// Magic passed to MuPDF when opening in-memory documents.
const PDF_MAGIC: &str = "application/pdf";

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island. It isolates the mupdf dependency
/// (which is AGPL-3.0) so that the rest of the workspace does not
/// transitively depend on it.
///
/// Page text is laid out like PyMuPDF's `page.get_text()`: blocks in stream
/// order, each line terminated by `\n`, ligatures and whitespace kept as-is.
/// Unlike PyMuPDF's defaults, text outside the media box is not clipped.
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

fn text_flags() -> TextPageFlags {
    TextPageFlags::PRESERVE_LIGATURES | TextPageFlags::PRESERVE_WHITESPACE
}

impl PdfBackend for MupdfBackend {
    fn open(&self, source: DocumentSource) -> Result<Box<dyn PdfDocument>, BackendError> {
        let document = match source {
            DocumentSource::Path(path) => {
                let path_str = path
                    .to_str()
                    .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;
                Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?
            }
            DocumentSource::Bytes(bytes) => Document::from_bytes(&bytes, PDF_MAGIC)
                .map_err(|e| BackendError::OpenError(e.to_string()))?,
        };

        debug!("opened document");
        Ok(Box::new(MupdfDocument { document }))
    }
}

/// An open MuPDF document. The native handle is freed on drop.
struct MupdfDocument {
    document: Document,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        let count = self
            .document
            .page_count()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        usize::try_from(count)
            .map_err(|_| BackendError::ExtractionError(format!("invalid page count {count}")))
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_number = i32::try_from(index)
            .map_err(|_| BackendError::ExtractionError(format!("page {index} out of range")))?;
        let page = self
            .document
            .load_page(page_number)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let text_page = page
            .to_text_page(text_flags())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        // Use block/line iteration to match PyMuPDF's get_text() behavior
        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }

        debug!(page = index, chars = page_text.len(), "extracted page");
        Ok(page_text)
    }
}
