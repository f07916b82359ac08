//! Multi-line layout: a compact header line followed by continuation lines.
//!
//! ```text
//! 0001012345678PARAFUSO SEXTAVADO 4UN2024-01-01
//! Marca: Acme
//! REF: X1
//! AÇO INOX
//! Processado por computador      <- stop word, ends the item
//! ```

use tracing::debug;

use crate::models::item::{CompactItem, UnitOfMeasure};

use super::patterns::{BRAND_TAG, COMPACT_HEADER, REFERENCE_TAG, SUPPLIER_TAG};
use super::stop_words::StopWords;
use crate::extract::{Claim, LineExtractor};

/// Extractor for the multi-line layout.
#[derive(Debug, Clone, Default)]
pub struct MultiLineExtractor {
    stop_words: StopWords,
}

/// Scan accumulator threaded through the fold over lines.
#[derive(Debug)]
enum ScanState {
    /// Outside any item; non-header lines are ignored.
    Seeking,
    /// An item is open and absorbs continuation lines.
    Absorbing(CompactItem),
}

impl MultiLineExtractor {
    /// Create an extractor with the default stop words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stop words that end an item.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    fn step(&self, state: ScanState, line: &str, sealed: &mut Vec<CompactItem>) -> ScanState {
        if let Some(item) = parse_header(line) {
            if let ScanState::Absorbing(current) = state {
                sealed.push(current);
            }
            return ScanState::Absorbing(item);
        }

        match state {
            ScanState::Seeking => ScanState::Seeking,
            ScanState::Absorbing(current) if self.stop_words.matches(line) => {
                sealed.push(current);
                ScanState::Seeking
            }
            ScanState::Absorbing(mut current) => {
                absorb_continuation(&mut current, line);
                ScanState::Absorbing(current)
            }
        }
    }
}

impl LineExtractor for MultiLineExtractor {
    type Record = CompactItem;

    fn claim<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<Claim<CompactItem>> {
        let mut item = parse_header(lines.get(cursor)?.as_ref())?;

        let mut next = cursor + 1;
        while let Some(line) = lines.get(next) {
            let line = line.as_ref();
            if COMPACT_HEADER.is_match(line) || self.stop_words.matches(line) {
                break;
            }
            absorb_continuation(&mut item, line);
            next += 1;
        }

        Some(Claim::record(item, next - cursor))
    }

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Vec<CompactItem> {
        let mut sealed = Vec::new();

        let last = lines.iter().fold(ScanState::Seeking, |state, line| {
            self.step(state, line.as_ref(), &mut sealed)
        });
        if let ScanState::Absorbing(current) = last {
            sealed.push(current);
        }

        debug!("Multi-line layout: {} items from {} lines", sealed.len(), lines.len());
        sealed
    }
}

/// Parse a header line into a fresh item with no tags set.
pub(crate) fn parse_header(line: &str) -> Option<CompactItem> {
    let caps = COMPACT_HEADER.captures(line)?;

    Some(CompactItem {
        item_number: caps[1].to_string(),
        material_code: caps[2].to_string(),
        description: caps[3].trim().to_string(),
        quantity: caps[4].to_string(),
        unit_of_measure: UnitOfMeasure::from_token(&caps[5])?,
        delivery_date: caps[6].to_string(),
        brand: None,
        reference: None,
        supplier: None,
    })
}

/// Apply a continuation line: a tag overrides its field, anything else
/// extends the description.
fn absorb_continuation(item: &mut CompactItem, line: &str) {
    if let Some(value) = tag_value(&BRAND_TAG, line) {
        item.brand = Some(value);
    } else if let Some(value) = tag_value(&REFERENCE_TAG, line) {
        item.reference = Some(value);
    } else if let Some(value) = tag_value(&SUPPLIER_TAG, line) {
        item.supplier = Some(value);
    } else {
        item.description.push(' ');
        item.description.push_str(line);
    }
}

fn tag_value(tag: &regex::Regex, line: &str) -> Option<String> {
    tag.find(line).map(|m| line[m.end()..].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const HEADER: &str = "123459999999900X DESC5UN2024-01-01";

    #[test]
    fn test_header_with_tags_and_stop_line() {
        let lines = [
            HEADER,
            "Marca: Acme",
            "REF: X1",
            "EXTRA TEXT",
            "Processado por computador",
        ];

        let items = MultiLineExtractor::new().extract(&lines);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.item_number, "12345");
        assert_eq!(item.material_code, "99999999");
        assert_eq!(item.description, "00X DESC EXTRA TEXT");
        assert_eq!(item.quantity, "5");
        assert_eq!(item.unit_of_measure, UnitOfMeasure::Un);
        assert_eq!(item.delivery_date, "2024-01-01");
        assert_eq!(item.brand.as_deref(), Some("Acme"));
        assert_eq!(item.reference.as_deref(), Some("X1"));
        assert_eq!(item.supplier, None);
        assert!(!item.description.contains("Processado"));
    }

    #[test]
    fn test_consecutive_headers() {
        let lines = [
            "0000112345678BOLT2UN2024-01-01",
            "0000212345679NUT3kg2024-01-02",
        ];

        let items = MultiLineExtractor::new().extract(&lines);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_number, "00001");
        assert_eq!(items[1].item_number, "00002");
        assert_eq!(items[1].unit_of_measure, UnitOfMeasure::Kg);
        for item in &items {
            assert_eq!(item.brand, None);
            assert_eq!(item.reference, None);
            assert_eq!(item.supplier, None);
        }
    }

    #[test]
    fn test_last_tag_wins_and_tags_are_case_insensitive() {
        let lines = [
            HEADER,
            "marca: First",
            "MARCA:   Second  ",
            "Fornecedor: Supplier Lda",
            "ref:R-2",
        ];

        let items = MultiLineExtractor::new().extract(&lines);

        assert_eq!(items[0].brand.as_deref(), Some("Second"));
        assert_eq!(items[0].supplier.as_deref(), Some("Supplier Lda"));
        assert_eq!(items[0].reference.as_deref(), Some("R-2"));
        assert_eq!(items[0].description, "00X DESC");
    }

    #[test]
    fn test_lines_after_stop_are_ignored_until_next_header() {
        let lines = [
            "0000112345678BOLT2UN2024-01-01",
            "Pág. 1",
            "stray footer text",
            "0000212345679NUT3pcs2024-01-02",
            "GALVANIZED",
        ];

        let items = MultiLineExtractor::new().extract(&lines);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "BOLT");
        assert_eq!(items[1].description, "NUT GALVANIZED");
        assert_eq!(items[1].unit_of_measure, UnitOfMeasure::Pcs);
    }

    #[test]
    fn test_custom_stop_words() {
        let lines = ["0000112345678BOLT2UN2024-01-01", "Total", "MORE"];

        let default = MultiLineExtractor::new().extract(&lines);
        assert_eq!(default[0].description, "BOLT Total MORE");

        let custom = MultiLineExtractor::new()
            .with_stop_words(StopWords::new(["total"]))
            .extract(&lines);
        assert_eq!(custom[0].description, "BOLT");
    }

    #[test]
    fn test_stop_word_in_header_does_not_block_header() {
        // "ITEM" is a default stop word but header lines are matched first.
        let lines = ["0000112345678ITEM X2UN2024-01-01"];
        let items = MultiLineExtractor::new().extract(&lines);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "ITEM X");
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(MultiLineExtractor::new().extract(&lines).is_empty());
    }

    #[test]
    fn test_header_requires_ascii_digits() {
        assert!(parse_header("١٢٣٤٥12345678BOLT2UN2024-01-01").is_none());
        assert!(parse_header("00001١٢٣٤٥٦٧٨BOLT2UN2024-01-01").is_none());
        assert!(parse_header("0000112345678BOLT2UN٢٠٢٤-01-01").is_none());

        let lines = ["١٢٣٤٥12345678BOLT2UN2024-01-01", "Marca: Acme"];
        assert!(MultiLineExtractor::new().extract(&lines).is_empty());
    }

    #[test]
    fn test_claim_stops_before_terminator() {
        let lines = [HEADER, "Marca: Acme", "Email: a@b.pt", "TAIL"];
        let claim = MultiLineExtractor::new().claim(&lines, 0).unwrap();

        assert_eq!(claim.consumed, 2);
        assert_eq!(claim.record.unwrap().brand.as_deref(), Some("Acme"));
        assert!(MultiLineExtractor::new().claim(&lines, 1).is_none());
    }

    #[test]
    fn test_fold_agrees_with_claim_loop() {
        struct ClaimLoop(MultiLineExtractor);

        impl LineExtractor for ClaimLoop {
            type Record = CompactItem;

            fn claim<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<Claim<CompactItem>> {
                self.0.claim(lines, cursor)
            }
        }

        let lines = [
            "noise",
            HEADER,
            "Marca: Acme",
            "0000112345678BOLT2UN2024-01-01",
            "LONG",
            "DESCRIPTION",
            "Condições Gerais",
            "noise",
            "0000212345679NUT3kg2024-01-02",
        ];
        let extractor = MultiLineExtractor::new();

        assert_eq!(extractor.extract(&lines), ClaimLoop(extractor.clone()).extract(&lines));
    }

    #[test]
    fn test_idempotent() {
        let lines = [HEADER, "Marca: Acme", "TEXT"];
        let extractor = MultiLineExtractor::new();

        assert_eq!(extractor.extract(&lines), extractor.extract(&lines));
    }

    proptest! {
        #[test]
        fn prop_header_round_trip(
            item in "[0-9]{5}",
            material in "[0-9]{8}",
            words in prop::collection::vec("[A-Z]{1,6}", 1..4),
            quantity in "[1-9][0-9]{0,3}",
            unit in prop::sample::select(vec!["UN", "un", "kg", "pcs"]),
        ) {
            let description = words.join(" ");
            let line = format!("{}{}{}{}{}2024-05-06", item, material, description, quantity, unit);

            let parsed = parse_header(&line).unwrap();

            prop_assert_eq!(parsed.item_number.len(), 5);
            prop_assert_eq!(parsed.material_code.len(), 8);
            prop_assert_eq!(parsed.item_number, item);
            prop_assert_eq!(parsed.material_code, material);
            prop_assert_eq!(parsed.description, description);
            prop_assert_eq!(parsed.quantity, quantity);
            prop_assert_eq!(parsed.unit_of_measure.as_str(), unit.to_ascii_uppercase());
        }

        #[test]
        fn prop_embedded_digits_stay_in_description(
            head in "[A-Z]{1,5}",
            digits in "[0-9]{1,4}",
            tail in "[A-Z]{1,5}",
            quantity in "[0-9]{1,4}",
        ) {
            // "ABC 12 XY" + "7": the digits inside the description are followed
            // by letters, so only the final run belongs to the quantity.
            let description = format!("{} {} {}", head, digits, tail);
            let line = format!("1234512345678{}{}UN2024-05-06", description, quantity);

            let parsed = parse_header(&line).unwrap();

            prop_assert_eq!(parsed.description, description);
            prop_assert_eq!(parsed.quantity, quantity);
        }

        #[test]
        fn prop_trailing_description_digits_join_quantity(
            head in "[A-Z]{1,5}",
            digits in "[0-9]{1,3}",
            quantity in "[0-9]{1,3}",
        ) {
            // The shortest description wins: digits glued to the quantity are
            // read as part of it.
            let line = format!("1234512345678{}{}{}pcs2024-05-06", head, digits, quantity);

            let parsed = parse_header(&line).unwrap();

            prop_assert_eq!(parsed.description, head);
            prop_assert_eq!(parsed.quantity, format!("{}{}", digits, quantity));
        }
    }
}
