//! Mock PDF backend for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::backend::{BackendError, DocumentSource, PdfBackend, PdfDocument};

/// Scripted content for one page of a [`MockBackend`] document.
#[derive(Clone, Debug)]
pub enum MockPage {
    Text(String),
    /// Extracting this page fails with the given message.
    Fail(String),
}

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Every `open` returns a document with the same scripted pages. Opened
/// sources are recorded, and `released` counts dropped documents.
pub struct MockBackend {
    pages: Vec<MockPage>,
    open_error: Option<String>,
    opened: Arc<Mutex<Vec<DocumentSource>>>,
    pub released: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new(pages: Vec<MockPage>) -> Self {
        Self {
            pages,
            open_error: None,
            opened: Arc::new(Mutex::new(Vec::new())),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A backend whose `open` always fails with `message`.
    pub fn failing_open(message: &str) -> Self {
        Self {
            open_error: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn opened_sources(&self) -> Arc<Mutex<Vec<DocumentSource>>> {
        Arc::clone(&self.opened)
    }
}

impl PdfBackend for MockBackend {
    fn open(&self, source: DocumentSource) -> Result<Box<dyn PdfDocument>, BackendError> {
        self.opened.lock().unwrap().push(source);
        if let Some(ref message) = self.open_error {
            return Err(BackendError::OpenError(message.clone()));
        }
        Ok(Box::new(MockDocument {
            pages: self.pages.clone(),
            released: Arc::clone(&self.released),
        }))
    }
}

struct MockDocument {
    pages: Vec<MockPage>,
    released: Arc<AtomicUsize>,
}

impl PdfDocument for MockDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        Ok(self.pages.len())
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        match self.pages.get(index) {
            Some(MockPage::Text(text)) => Ok(text.clone()),
            Some(MockPage::Fail(message)) => Err(BackendError::ExtractionError(message.clone())),
            None => Err(BackendError::ExtractionError(format!(
                "page {index} out of range"
            ))),
        }
    }
}

impl Drop for MockDocument {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
