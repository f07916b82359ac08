//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor.
///
/// lopdf checks the page tree and opens empty-password encryption;
/// pdf-extract lays out the text.
pub struct PdfExtractor {
    loaded: Option<LoadedPdf>,
    min_text_length: usize,
}

/// What is kept of a document after loading.
struct LoadedPdf {
    /// Bytes pdf-extract reads; re-serialized when the source was encrypted.
    text_source: Vec<u8>,
    page_count: u32,
}

/// Text read from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    pub text: String,
    pub page_count: u32,
    /// False when the text layer is shorter than the configured minimum,
    /// which usually means a scanned document.
    pub has_text_layer: bool,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            loaded: None,
            min_text_length: 50,
        }
    }

    /// Set the text length below which a document counts as having no text layer.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Load a PDF and read its text in one step.
    pub fn read(&mut self, data: &[u8]) -> Result<PdfContent> {
        self.load(data)?;
        let text = self.extract_text()?;
        let page_count = self.page_count();

        let has_text_layer = self.is_text_layer(&text);
        if !has_text_layer {
            warn!(
                "PDF has under {} characters of text across {} pages; it may be scanned",
                self.min_text_length, page_count
            );
        }

        debug!("PDF text: {} pages, {} bytes", page_count, text.len());
        Ok(PdfContent {
            text,
            page_count,
            has_text_layer,
        })
    }

    /// Characters are counted after trimming, not bytes.
    fn is_text_layer(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.min_text_length
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes to hand to pdf-extract, which cannot decrypt on its own.
fn text_source(document: &mut Document, data: &[u8]) -> Result<Vec<u8>> {
    if !document.is_encrypted() {
        return Ok(data.to_vec());
    }

    document.decrypt("").map_err(|_| PdfError::Encrypted)?;
    debug!("Opened encrypted PDF with the empty password");

    let mut decrypted = Vec::new();
    document
        .save_to(&mut decrypted)
        .map_err(|e| PdfError::Parse(format!("cannot re-serialize decrypted PDF: {}", e)))?;
    Ok(decrypted)
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        self.loaded = None;

        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        let page_count = u32::try_from(document.get_pages().len()).unwrap_or(u32::MAX);
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let text_source = text_source(&mut document, data)?;
        debug!("Loaded PDF with {} pages", page_count);

        self.loaded = Some(LoadedPdf {
            text_source,
            page_count,
        });
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.loaded.as_ref().map_or(0, |pdf| pdf.page_count)
    }

    fn extract_text(&self) -> Result<String> {
        let pdf = self
            .loaded
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))?;
        pdf_extract::extract_text_from_mem(&pdf.text_source)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
