//! WASM bindings for purchase-order line item extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Callers extract text from their documents themselves and pass it in.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use orderlines_core::extract::Layout;
use orderlines_core::models::config::ExtractionConfig;
use orderlines_core::models::item::ItemRecord;
use orderlines_core::normalize_lines;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract line items from document text.
///
/// `layouts` is an optional array of layout names or letters
/// (`"a"`, `"fixed-block"`, ...); all layouts run when it is omitted.
#[wasm_bindgen(js_name = extractFromText)]
pub fn extract_from_text(text: &str, layouts: JsValue) -> Result<JsValue, JsValue> {
    let mut config = ExtractionConfig::default();
    if let Some(selected) = parse_layouts(layouts)? {
        config.layouts = selected;
    }

    to_js(&config.dispatcher().dispatch_text(text))
}

/// Parse a comma-decimal amount (e.g., "0,50").
#[wasm_bindgen(js_name = parseDecimalComma)]
pub fn parse_decimal_comma(amount: &str) -> Option<f64> {
    orderlines_core::extract::layouts::parse_decimal_comma(amount)
}

/// Line item extractor class for browser use.
#[wasm_bindgen]
pub struct OrderExtractor {
    config: ExtractionConfig,
}

#[wasm_bindgen]
impl OrderExtractor {
    /// Create an extractor running all layouts with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Select layouts from an array of names or letters.
    #[wasm_bindgen(js_name = setLayouts)]
    pub fn set_layouts(&mut self, layouts: JsValue) -> Result<(), JsValue> {
        self.config.layouts = parse_layouts(layouts)?.unwrap_or_else(|| Layout::ALL.to_vec());
        Ok(())
    }

    /// Replace the stop words ending multi-line items.
    #[wasm_bindgen(js_name = setStopWords)]
    pub fn set_stop_words(&mut self, stop_words: JsValue) -> Result<(), JsValue> {
        self.config.stop_words = serde_wasm_bindgen::from_value(stop_words)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Set the literal placed before the code in fused-line descriptions.
    #[wasm_bindgen(js_name = setDescriptionPrefix)]
    pub fn set_description_prefix(&mut self, prefix: &str) {
        self.config.description_prefix = prefix.to_string();
    }

    /// Emit records in document order across layouts.
    #[wasm_bindgen(js_name = setInterleaved)]
    pub fn set_interleaved(&mut self, interleaved: bool) {
        self.config.interleaved = interleaved;
    }

    /// Extract line items from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.config.dispatcher().dispatch_text(text))
    }

    /// Extract line items along with the line count and selected layouts.
    #[wasm_bindgen(js_name = extractWithMetadata)]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractResult {
            records: Vec<ItemRecord>,
            line_count: usize,
            layouts: Vec<Layout>,
            interleaved: bool,
        }

        let lines = normalize_lines(text);
        let dispatcher = self.config.dispatcher();

        let output = ExtractResult {
            records: dispatcher.dispatch(&lines),
            line_count: lines.len(),
            layouts: dispatcher.layouts().to_vec(),
            interleaved: dispatcher.is_interleaved(),
        };

        to_js(&output)
    }
}

impl Default for OrderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// `undefined`/`null` select nothing in particular; otherwise an array of
/// layout names is expected.
fn parse_layouts(value: JsValue) -> Result<Option<Vec<Layout>>, JsValue> {
    let names: Option<Vec<String>> =
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;

    names
        .map(|names| {
            names
                .iter()
                .map(|name| name.parse::<Layout>())
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(|e| JsValue::from_str(&e))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
