//! Document to records: load text, normalize lines, dispatch.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{OrderLinesError, Result, SourceError};
use crate::extract::Dispatcher;
use crate::lines::normalize_lines;
use crate::models::config::PdfConfig;
use crate::models::item::ItemRecord;
use crate::pdf::PdfExtractor;

/// Result of extracting one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Records in dispatch order.
    pub records: Vec<ItemRecord>,
    /// Number of normalized lines read from the document.
    pub line_count: usize,
    /// Diagnostics gathered along the way.
    pub warnings: Vec<String>,
    /// The document could not be read at all.
    pub source_unavailable: bool,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    fn unavailable(path: &Path, error: &OrderLinesError, start: Instant) -> Self {
        let warning = match error {
            OrderLinesError::Source(e) => e.to_string(),
            other => format!("{}: {}", path.display(), other),
        };

        Self {
            records: Vec::new(),
            line_count: 0,
            warnings: vec![warning],
            source_unavailable: true,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Raw text of a document, before line normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentText {
    pub text: String,
    /// Page count for PDFs.
    pub page_count: Option<u32>,
    /// False for PDFs whose text layer is below `PdfConfig::min_text_length`.
    pub has_text_layer: bool,
}

impl DocumentText {
    fn plain(text: String) -> Self {
        Self {
            text,
            page_count: None,
            has_text_layer: true,
        }
    }
}

/// Read a `.pdf` or `.txt` document as text.
pub fn load_document_text(path: &Path, pdf: &PdfConfig) -> Result<DocumentText> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => {
            let data = std::fs::read(path).map_err(|e| SourceError::unavailable(path, e))?;
            let content = PdfExtractor::new()
                .with_min_text_length(pdf.min_text_length)
                .read(&data)?;
            Ok(DocumentText {
                text: content.text,
                page_count: Some(content.page_count),
                has_text_layer: content.has_text_layer,
            })
        }
        "txt" | "text" => {
            let text =
                std::fs::read_to_string(path).map_err(|e| SourceError::unavailable(path, e))?;
            Ok(DocumentText::plain(text))
        }
        other => Err(SourceError::UnsupportedFormat(other.to_string()).into()),
    }
}

/// Extract records from a document with default PDF settings.
pub fn extract_document(path: &Path, dispatcher: &Dispatcher) -> ExtractionResult {
    extract_document_with(path, dispatcher, &PdfConfig::default())
}

/// Extract records from a document.
///
/// Never fails: a missing or unreadable document yields an empty result
/// flagged as `source_unavailable`.
pub fn extract_document_with(
    path: &Path,
    dispatcher: &Dispatcher,
    pdf: &PdfConfig,
) -> ExtractionResult {
    let start = Instant::now();
    info!("Extracting line items from {:?}", path);

    match load_document_text(path, pdf) {
        Ok(document) => extract_text(&document, dispatcher, start),
        Err(e) => {
            warn!("{}", e);
            ExtractionResult::unavailable(path, &e, start)
        }
    }
}

fn extract_text(
    document: &DocumentText,
    dispatcher: &Dispatcher,
    start: Instant,
) -> ExtractionResult {
    let lines = normalize_lines(&document.text);
    debug!("Document has {} non-empty lines", lines.len());

    let mut warnings = Vec::new();
    if !document.has_text_layer {
        warnings.push(format!(
            "PDF has little or no text layer ({} pages); it may be a scanned document",
            document.page_count.unwrap_or(0)
        ));
    }
    if lines.is_empty() {
        warnings.push("Document contains no text".to_string());
    }

    let records = dispatcher.dispatch(&lines);
    if records.is_empty() && !lines.is_empty() {
        warnings.push("No line items recognized in any selected layout".to_string());
    }
    for layout in dispatcher.layouts().iter().filter(|l| l.is_experimental()) {
        if records.iter().any(|r| r.layout() == *layout) {
            warnings.push(format!("Layout {} is experimental; review its records", layout));
        }
    }

    ExtractionResult {
        records,
        line_count: lines.len(),
        warnings,
        source_unavailable: false,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }
}
