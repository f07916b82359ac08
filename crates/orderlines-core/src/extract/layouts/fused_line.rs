//! Fused-line layout: every field concatenated on a single line.
//!
//! `123450,50un0,100,05203 - Bolt M8 - 01/01/2024` reads as item 12345,
//! quantity 0.50 un, price 0.10, amount 0.05, code 203.

use tracing::debug;

use crate::models::item::{FusedItem, UnitOfMeasure};

use super::patterns::FUSED_LINE;
use crate::extract::{Claim, LineExtractor};

/// Literal that starts every fused-line description.
pub const DEFAULT_DESCRIPTION_PREFIX: &str = "MD5863";

/// Extractor for the fused-line layout.
#[derive(Debug, Clone)]
pub struct FusedLineExtractor {
    description_prefix: String,
}

impl FusedLineExtractor {
    pub fn new() -> Self {
        Self {
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
        }
    }

    /// Set the literal placed before the code in descriptions.
    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    /// Parse one line.
    pub fn parse_line(&self, line: &str) -> Option<FusedItem> {
        let caps = FUSED_LINE.captures(line)?;

        let code = &caps[6];
        let text = caps[7].trim();
        let description = if self.description_prefix.is_empty() {
            format!("{} - {}", code, text)
        } else {
            format!("{} {} - {}", self.description_prefix, code, text)
        };

        Some(FusedItem {
            item_number: caps[1].to_string(),
            quantity: parse_decimal_comma(&caps[2])?,
            unit_of_measure: UnitOfMeasure::from_token(&caps[3])?,
            delivery_date: caps[8].to_string(),
            description,
            price: parse_decimal_comma(&caps[4])?,
            amount: parse_decimal_comma(&caps[5])?,
        })
    }
}

impl Default for FusedLineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor for FusedLineExtractor {
    type Record = FusedItem;

    fn claim<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<Claim<FusedItem>> {
        let item = self.parse_line(lines.get(cursor)?.as_ref())?;
        Some(Claim::record(item, 1))
    }

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Vec<FusedItem> {
        let items: Vec<FusedItem> = lines
            .iter()
            .filter_map(|line| self.parse_line(line.as_ref()))
            .collect();

        debug!("Fused-line layout: {} items from {} lines", items.len(), lines.len());
        items
    }
}

/// Parse `0,50` as `0.5`.
pub fn parse_decimal_comma(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse().ok()
}
