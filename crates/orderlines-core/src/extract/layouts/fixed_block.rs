//! Fixed-block layout: six consecutive lines, each with a positional role.
//!
//! ```text
//! 21,001        quantity 21, item 1
//! XX            prefix (not kept)
//! 12345         destination
//! ISO4762       designation
//! M8x40         specifications
//! Bolt (77)     parts and reference
//! ```

use tracing::{debug, trace};

use crate::models::item::BlockItem;

use super::patterns::{
    BLOCK_WINDOW, CODE_DESIGNATION, DESIGNATION_SEPARATOR, PARTS_REFERENCE, UPPERCASE_WORD,
};
use crate::extract::{Claim, LineExtractor};

/// Number of lines in one block.
pub const BLOCK_LEN: usize = 6;

/// Extractor for the fixed-block layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBlockExtractor;

impl FixedBlockExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LineExtractor for FixedBlockExtractor {
    type Record = BlockItem;

    fn claim<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<Claim<BlockItem>> {
        let window = lines.get(cursor..cursor.checked_add(BLOCK_LEN)?)?;

        let qualifies = window
            .iter()
            .zip(BLOCK_WINDOW.iter())
            .all(|(line, pattern)| pattern.is_match(line.as_ref()));
        if !qualifies {
            return None;
        }

        match parse_block(window) {
            Some(item) => Some(Claim::record(item, BLOCK_LEN)),
            None => {
                trace!("Rejected block at line {}: {:?}", cursor, window[0].as_ref());
                Some(Claim::rejected(BLOCK_LEN))
            }
        }
    }

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Vec<BlockItem> {
        let mut items = Vec::new();
        let mut cursor = 0;

        while cursor + BLOCK_LEN <= lines.len() {
            match self.claim(lines, cursor) {
                Some(claim) => {
                    items.extend(claim.record);
                    cursor += claim.consumed;
                }
                None => cursor += 1,
            }
        }

        debug!("Fixed-block layout: {} items from {} lines", items.len(), lines.len());
        items
    }
}

/// Decompose a qualifying window. `None` if the quantity line does not
/// split into integers.
fn parse_block<S: AsRef<str>>(window: &[S]) -> Option<BlockItem> {
    let caps = BLOCK_WINDOW[0].captures(window[0].as_ref())?;
    let quantity: u32 = caps[1].parse().ok()?;
    let item_number: u32 = caps[2].parse().ok()?;

    // window[1] is the prefix code; only the destination is kept.
    let destiny = window[2].as_ref().to_string();

    let (designation, specifications) =
        split_designation(window[3].as_ref().trim(), window[4].as_ref().trim());
    let (parts, reference) = split_parts_reference(window[5].as_ref());

    Some(BlockItem {
        item_number,
        destiny,
        quantity,
        designation,
        specifications,
        parts,
        reference,
    })
}

/// Split `ABC DEF-GHI` into `ABC` / `DEF-GHI`. Code-like designations such as
/// `ISO4762`, or ones whose first token is not all uppercase, are kept and the
/// specifications line is used as is.
fn split_designation(designation: &str, specifications: &str) -> (String, String) {
    let unsplit = (designation.to_string(), specifications.to_string());

    if CODE_DESIGNATION.is_match(designation) {
        return unsplit;
    }
    let Some(separator) = DESIGNATION_SEPARATOR.find(designation) else {
        return unsplit;
    };

    let head = &designation[..separator.start()];
    if !UPPERCASE_WORD.is_match(head) {
        return unsplit;
    }

    let rest = designation[separator.end()..]
        .trim_start_matches(|c: char| c == '-' || c.is_whitespace());
    let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");

    (head.to_string(), rest)
}

/// Split `Bolt (77)` into `Bolt` / `(77)`. The reference is always rendered
/// with parentheses.
fn split_parts_reference(line: &str) -> (String, Option<String>) {
    match PARTS_REFERENCE.captures(line) {
        Some(caps) => (caps[1].trim().to_string(), Some(format!("({})", &caps[2]))),
        None => (line.trim().to_string(), None),
    }
}
