//! WebAssembly bindings for the editor page.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { renderCodePanel, preparePreview, validateEditorParameters } from 'math-markup-preview';
//!
//! await init();
//!
//! const data = tinymce.get('example').getContent();
//! previewDiv.innerHTML = preparePreview(data);
//! htmlCodeDiv.innerHTML = renderCodePanel(data, 'xml');
//!
//! const error = validateEditorParameters(textarea.value);
//! if (error) { notification.innerHTML = 'This is not a valid JSON'; }
//! ```

#![cfg(feature = "wasm")]

use crate::highlight::highlight_named;
use crate::panel::CodePanel;
use crate::preview::prepare_preview;
use crate::settings::{validate_editor_parameters, Direction, EditorSettings, SaveMode};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Highlight already-escaped markup for a save mode name.
///
/// Unknown modes return the text unchanged.
#[wasm_bindgen(js_name = highlightMarkup)]
pub fn highlight_markup(text: &str, mode: &str) -> String {
    highlight_named(text, mode)
}

/// Escape editor content and render it as the highlighted code panel.
///
/// # Errors
///
/// Returns an error if `save_mode` is not `xml`, `image` or `base64`.
#[wasm_bindgen(js_name = renderCodePanel)]
pub fn render_code_panel(content: &str, save_mode: &str) -> Result<String, JsError> {
    let mode: SaveMode = save_mode
        .parse()
        .map_err(|e: crate::Error| JsError::new(&e.to_string()))?;
    Ok(CodePanel::render(content, mode))
}

/// Copy each image's alt text into its title for the preview surface.
#[wasm_bindgen(js_name = preparePreview)]
pub fn preview(html: &str) -> String {
    prepare_preview(html)
}

/// Check editor parameters. Returns an empty string when valid, otherwise
/// the parser's message.
#[wasm_bindgen(js_name = validateEditorParameters)]
pub fn validate_parameters(json: &str) -> String {
    match validate_editor_parameters(json) {
        Ok(_) => String::new(),
        Err(e) => e.to_string(),
    }
}

/// `"rtl"` for Arabic and Hebrew, `"ltr"` otherwise.
#[wasm_bindgen(js_name = textDirection)]
pub fn text_direction(lang: &str) -> String {
    Direction::for_language(lang).as_str().to_string()
}

/// Build the editor init options for a language and parameter string.
///
/// Returns a JavaScript object with `language`, `directionality` and
/// `wiriseditorparameters`.
#[wasm_bindgen(js_name = editorInit)]
pub fn editor_init(lang: &str, parameters: Option<String>) -> Result<JsValue, JsError> {
    let mut settings = EditorSettings::default();
    settings.set_language(lang);
    if let Some(json) = parameters {
        settings
            .set_editor_parameters(&json)
            .map_err(|e| JsError::new(&e.to_string()))?;
    }

    serde_wasm_bindgen::to_value(&settings.editor_init())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
