//! Order line extraction from normalized text lines.
//!
//! Each vendor layout is an isolated grammar behind [`LineExtractor`]. The
//! [`Dispatcher`] runs a selection of layouts over the same lines and
//! flattens their records into one list.

mod dispatcher;
pub mod layouts;

pub use dispatcher::Dispatcher;
pub use layouts::{
    FixedBlockExtractor, FusedLineExtractor, MultiLineExtractor, StopWords,
    DEFAULT_DESCRIPTION_PREFIX,
};

use serde::{Deserialize, Serialize};

/// Known document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Compact header line followed by tag and description continuation lines.
    MultiLine,
    /// Rigid six-line positional block.
    FixedBlock,
    /// Every field fused into a single line.
    FusedLine,
}

impl Layout {
    /// All layouts, in default dispatch order. This is also the priority
    /// order used by interleaved dispatch.
    pub const ALL: [Layout; 3] = [Layout::MultiLine, Layout::FixedBlock, Layout::FusedLine];

    /// Short identifier used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Layout::MultiLine => "multi-line",
            Layout::FixedBlock => "fixed-block",
            Layout::FusedLine => "fused-line",
        }
    }

    /// One-letter alias accepted wherever a layout name is.
    pub fn letter(&self) -> char {
        match self {
            Layout::MultiLine => 'a',
            Layout::FixedBlock => 'b',
            Layout::FusedLine => 'c',
        }
    }

    /// Vendor whose purchase orders use this layout.
    pub fn vendor(&self) -> &'static str {
        match self {
            Layout::MultiLine => "ENGIE",
            Layout::FixedBlock => "GLN",
            Layout::FusedLine => "MD GROUP",
        }
    }

    /// Whether extraction for this layout is known to be incomplete.
    pub fn is_experimental(&self) -> bool {
        matches!(self, Layout::FixedBlock)
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "multi-line" | "engie" => Ok(Layout::MultiLine),
            "b" | "fixed-block" | "gln" => Ok(Layout::FixedBlock),
            "c" | "fused-line" | "md-group" => Ok(Layout::FusedLine),
            other => Err(format!("unknown layout: {}", other)),
        }
    }
}

/// Lines claimed by a layout at a given cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim<R> {
    /// The record read, if the claimed lines decomposed cleanly.
    pub record: Option<R>,
    /// Number of lines consumed, at least one.
    pub consumed: usize,
}

impl<R> Claim<R> {
    pub fn record(record: R, consumed: usize) -> Self {
        Self {
            record: Some(record),
            consumed,
        }
    }

    /// Lines that belong to the layout but yield no record.
    pub fn rejected(consumed: usize) -> Self {
        Self {
            record: None,
            consumed,
        }
    }
}

/// Trait for layout extractors.
pub trait LineExtractor {
    /// The record type this layout produces.
    type Record;

    /// Try to read one record starting at `cursor`.
    ///
    /// Returns `None` when the layout does not recognize the line at
    /// `cursor`; the caller then moves on by one line.
    fn claim<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<Claim<Self::Record>>;

    /// Extract every record from `lines`, in source order.
    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Self::Record> {
        let mut records = Vec::new();
        let mut cursor = 0;

        while cursor < lines.len() {
            match self.claim(lines, cursor) {
                Some(claim) => {
                    records.extend(claim.record);
                    cursor += claim.consumed.max(1);
                }
                None => cursor += 1,
            }
        }

        records
    }
}
