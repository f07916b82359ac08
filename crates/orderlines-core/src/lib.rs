//! Core library for purchase-order line item extraction.
//!
//! This crate provides:
//! - Layout grammars for three vendor order formats (multi-line, fixed
//!   six-line block, fused single line)
//! - A dispatcher running any selection of layouts over one document
//! - Record models serialized with stable camelCase field names
//! - PDF and plain-text document loading (`native` feature)

pub mod error;
pub mod extract;
pub mod lines;
pub mod models;
#[cfg(feature = "native")]
pub mod pdf;
#[cfg(feature = "native")]
pub mod pipeline;

pub use error::{OrderLinesError, PdfError, Result, SourceError};
pub use extract::{
    Dispatcher, FixedBlockExtractor, FusedLineExtractor, Layout, LineExtractor,
    MultiLineExtractor, StopWords,
};
pub use lines::normalize_lines;
pub use models::config::{ExtractionConfig, OrderLinesConfig, PdfConfig};
pub use models::item::{BlockItem, CompactItem, FusedItem, ItemRecord, TabularRecord, UnitOfMeasure};
#[cfg(feature = "native")]
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
#[cfg(feature = "native")]
pub use pipeline::{
    extract_document, extract_document_with, load_document_text, DocumentText, ExtractionResult,
};
