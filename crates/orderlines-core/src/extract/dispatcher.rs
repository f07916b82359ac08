//! Runs a selection of layouts over one line sequence.

use std::time::Instant;

use tracing::{debug, info};

use crate::lines::normalize_lines;
use crate::models::item::ItemRecord;

use super::layouts::{FixedBlockExtractor, FusedLineExtractor, MultiLineExtractor, StopWords};
use super::{Layout, LineExtractor};

/// Layout dispatcher.
///
/// By default each selected layout scans the whole input on its own and the
/// results are concatenated in selection order. With interleaving enabled a
/// single sweep hands each line to the first layout that claims it, in
/// [`Layout::ALL`] priority order, and records come out in source order.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    layouts: Vec<Layout>,
    multi_line: MultiLineExtractor,
    fixed_block: FixedBlockExtractor,
    fused_line: FusedLineExtractor,
    interleaved: bool,
}

impl Dispatcher {
    /// Create a dispatcher for the given layouts. Repeated layouts run once,
    /// at their first position.
    pub fn new(layouts: impl IntoIterator<Item = Layout>) -> Self {
        let mut selected = Vec::new();
        for layout in layouts {
            if !selected.contains(&layout) {
                selected.push(layout);
            }
        }

        Self {
            layouts: selected,
            multi_line: MultiLineExtractor::new(),
            fixed_block: FixedBlockExtractor::new(),
            fused_line: FusedLineExtractor::new(),
            interleaved: false,
        }
    }

    /// Set the stop words for the multi-line layout.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.multi_line = self.multi_line.with_stop_words(stop_words);
        self
    }

    /// Set the fused-line description prefix.
    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fused_line = self.fused_line.with_description_prefix(prefix);
        self
    }

    /// Run all layouts in a single source-ordered sweep.
    pub fn with_interleaving(mut self, interleaved: bool) -> Self {
        self.interleaved = interleaved;
        self
    }

    /// Selected layouts, in dispatch order.
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn is_interleaved(&self) -> bool {
        self.interleaved
    }

    /// Extract records from normalized lines.
    pub fn dispatch<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ItemRecord> {
        let start = Instant::now();

        let records = if self.interleaved {
            self.dispatch_interleaved(lines)
        } else {
            self.dispatch_sequential(lines)
        };

        info!(
            "Extracted {} records from {} lines in {:?}",
            records.len(),
            lines.len(),
            start.elapsed()
        );
        records
    }

    /// Normalize raw document text into lines, then extract.
    pub fn dispatch_text(&self, text: &str) -> Vec<ItemRecord> {
        self.dispatch(&normalize_lines(text))
    }

    fn dispatch_sequential<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ItemRecord> {
        let mut records = Vec::new();

        for layout in &self.layouts {
            let before = records.len();
            match layout {
                Layout::MultiLine => records.extend(
                    self.multi_line.extract(lines).into_iter().map(ItemRecord::from),
                ),
                Layout::FixedBlock => records.extend(
                    self.fixed_block.extract(lines).into_iter().map(ItemRecord::from),
                ),
                Layout::FusedLine => records.extend(
                    self.fused_line.extract(lines).into_iter().map(ItemRecord::from),
                ),
            }
            debug!("Layout {} produced {} records", layout, records.len() - before);
        }

        records
    }

    fn dispatch_interleaved<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ItemRecord> {
        let priority: Vec<Layout> = Layout::ALL
            .into_iter()
            .filter(|layout| self.layouts.contains(layout))
            .collect();

        let mut records = Vec::new();
        let mut cursor = 0;

        while cursor < lines.len() {
            let claimed = priority
                .iter()
                .find_map(|layout| self.claim(*layout, lines, cursor));

            match claimed {
                Some((record, consumed)) => {
                    records.extend(record);
                    cursor += consumed.max(1);
                }
                None => cursor += 1,
            }
        }

        records
    }

    fn claim<S: AsRef<str>>(
        &self,
        layout: Layout,
        lines: &[S],
        cursor: usize,
    ) -> Option<(Option<ItemRecord>, usize)> {
        match layout {
            Layout::MultiLine => self
                .multi_line
                .claim(lines, cursor)
                .map(|c| (c.record.map(ItemRecord::from), c.consumed)),
            Layout::FixedBlock => self
                .fixed_block
                .claim(lines, cursor)
                .map(|c| (c.record.map(ItemRecord::from), c.consumed)),
            Layout::FusedLine => self
                .fused_line
                .claim(lines, cursor)
                .map(|c| (c.record.map(ItemRecord::from), c.consumed)),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Layout::ALL)
    }
}
