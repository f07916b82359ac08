//! Regex grammars for the supported order layouts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Digits are ASCII [0-9] throughout; `\d` would admit any Unicode digit.

    // Multi-line layout header: item(5) material(8) description qty unit date,
    // with no separators. The description is lazy so the trailing digits
    // before the unit stay with the quantity.
    pub static ref COMPACT_HEADER: Regex = Regex::new(
        r"^([0-9]{5})([0-9]{8})([A-ZÇÁÉÍÓÚÀÃÕ\-\s0-9]+?)([0-9]+)(UN|un|kg|pcs)([0-9]{4}-[0-9]{2}-[0-9]{2})$"
    ).unwrap();

    // Continuation tags
    pub static ref BRAND_TAG: Regex = Regex::new(r"(?i)^Marca:\s*").unwrap();

    pub static ref REFERENCE_TAG: Regex = Regex::new(r"(?i)^REF:\s*").unwrap();

    pub static ref SUPPLIER_TAG: Regex = Regex::new(r"(?i)^Fornecedor:\s*").unwrap();

    // Fixed block window, one pattern per line:
    // quantity,item / prefix / destination / designation / specifications / parts
    pub static ref BLOCK_WINDOW: [Regex; 6] = [
        Regex::new(r"^([0-9]{1,3}),([0-9]{3})$").unwrap(),
        Regex::new(r"^[A-Z]{2}$").unwrap(),
        Regex::new(r"^[0-9]{3,5}$").unwrap(),
        Regex::new(r"^.+$").unwrap(),
        Regex::new(r"^.+$").unwrap(),
        Regex::new(r"^.+$").unwrap(),
    ];

    // Designations such as ISO4762 are kept whole.
    pub static ref CODE_DESIGNATION: Regex = Regex::new(r"^[A-Z]+[0-9]+$").unwrap();

    pub static ref UPPERCASE_WORD: Regex = Regex::new(r"^[A-Z]+$").unwrap();

    pub static ref DESIGNATION_SEPARATOR: Regex = Regex::new(r"\s+|-").unwrap();

    // Parts text with a trailing reference number, parentheses optional.
    pub static ref PARTS_REFERENCE: Regex = Regex::new(r"^(.+?)\s*\(?([0-9]+)\)?$").unwrap();

    // Fused line: item(5) qty unit price amount code(3) - text - DD/MM/YYYY
    pub static ref FUSED_LINE: Regex = Regex::new(
        r"(?i)^([0-9]{5})([0-9]{1,3},[0-9]{2})(un|kg|pcs)([0-9]{1,3},[0-9]{2})([0-9]{1,3},[0-9]{2})([0-9]{3})\s*-\s*(.+?)\s*-\s*([0-9]{2}/[0-9]{2}/[0-9]{4})$"
    ).unwrap();
}
