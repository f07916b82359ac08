//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OrderLinesError, Result};
use crate::extract::{Dispatcher, Layout, StopWords, DEFAULT_DESCRIPTION_PREFIX};

/// Main configuration for the orderlines pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLinesConfig {
    /// Line item extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Line item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Layouts to run, in output order.
    pub layouts: Vec<Layout>,

    /// Run all layouts in one source-ordered sweep instead of one after another.
    pub interleaved: bool,

    /// Boilerplate markers that end a multi-line item (case-insensitive).
    pub stop_words: Vec<String>,

    /// Literal placed before the code in fused-line descriptions.
    pub description_prefix: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            layouts: Layout::ALL.to_vec(),
            interleaved: false,
            stop_words: StopWords::default().words().to_vec(),
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Build a dispatcher from this configuration.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.layouts.iter().copied())
            .with_stop_words(StopWords::new(self.stop_words.iter().cloned()))
            .with_description_prefix(self.description_prefix.clone())
            .with_interleaving(self.interleaved)
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many characters of text the PDF is reported as likely scanned.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

impl OrderLinesConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| OrderLinesError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| OrderLinesError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
