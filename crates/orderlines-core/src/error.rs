//! Error types for the orderlines-core library.
//!
//! The layout extractors themselves never fail: a line that matches no
//! grammar simply contributes no record. Errors only arise at the document
//! boundary (reading files, decoding PDFs) and when loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the orderlines library.
#[derive(Error, Debug)]
pub enum OrderLinesError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The source document could not be obtained.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while turning a document into text lines.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document is absent or unreadable.
    #[error("source unavailable: {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    /// The file extension is not one we know how to read.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl SourceError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Unavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for the orderlines library.
pub type Result<T> = std::result::Result<T, OrderLinesError>;
