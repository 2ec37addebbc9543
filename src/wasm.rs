//! WASM bindings for a browser-based editor.
//!
//! The browser keeps the book model and performs the save; these functions
//! only turn the model into EPUB bytes.

use wasm_bindgen::prelude::*;

use crate::book::Book;
use crate::build::EpubBuilder;
use crate::config::{BodyPolicy, EpubConfig};
use crate::deliver::suggested_file_name;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Build an EPUB from a JSON book model.
///
/// Expects `{"title": ..., "author": ..., "sections": [{"name": ..., "content": ...}]}`.
/// With `trusted_markup`, section content is embedded as XHTML instead of escaped text.
#[wasm_bindgen]
pub fn build_epub(book_json: &str, trusted_markup: bool) -> Result<Vec<u8>, JsValue> {
    let book: Book =
        serde_json::from_str(book_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let policy = if trusted_markup {
        BodyPolicy::TrustedMarkup
    } else {
        BodyPolicy::PlainText
    };
    let builder = EpubBuilder::new().with_config(EpubConfig::default().with_body_policy(policy));

    let artifact = builder
        .package(&book)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(artifact.bytes)
}

/// File name to offer when saving a book with this title.
#[wasm_bindgen]
pub fn suggest_file_name(title: &str) -> String {
    suggested_file_name(title)
}
