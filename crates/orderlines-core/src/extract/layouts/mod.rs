//! Grammar-driven extractors, one per vendor layout.

pub mod fixed_block;
pub mod fused_line;
pub mod multi_line;
pub mod patterns;
mod stop_words;

pub use fixed_block::{FixedBlockExtractor, BLOCK_LEN};
pub use fused_line::{parse_decimal_comma, FusedLineExtractor, DEFAULT_DESCRIPTION_PREFIX};
pub use multi_line::MultiLineExtractor;
pub use stop_words::StopWords;
