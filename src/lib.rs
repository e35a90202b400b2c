//! # math-markup-preview
//!
//! Highlighting, preview preparation and settings for pages that embed a
//! rich-text editor with a math formula plugin.
//!
//! The editor and its plugin own editing and serialization. This crate takes
//! the HTML they produce and prepares it for two display surfaces:
//!
//! - **Code panel**: the markup, escaped for display, with each formula
//!   (`<math>` element or formula `<img>`) wrapped in a highlighting block
//! - **Preview**: the markup itself, with each image's `alt` text copied into
//!   its `title` so formulas show their text as a tooltip
//!
//! ## Quick Start
//!
//! ```rust
//! use math_markup_preview::{highlight, ContentMode, CodePanel, SaveMode};
//!
//! // Highlight markup that is already escaped
//! let escaped = "a &lt;math&gt;b&lt;/math&gt;c";
//! let highlighted = highlight(escaped, ContentMode::StructuredMarkup);
//! assert!(highlighted.contains("<pre class='language-xml"));
//!
//! // Or escape, wrap and highlight raw editor output in one step
//! let panel = CodePanel::render("<p><math><mi>x</mi></math></p>", SaveMode::Xml);
//! assert!(panel.contains("&lt;/math&gt;</code></pre>"));
//! ```
//!
//! ## Save Modes
//!
//! - `xml` (default): formulas are MathML; the panel also shows the script
//!   that loads the formula viewer
//! - `image`: formulas are `<img>` elements
//! - `base64`: formulas are `<img>` elements with inline data; formulas can
//!   then only be edited as images
//!
//! ## Settings File (TOML)
//!
//! ```text
//! save_mode = "image"
//! language = "ar"
//!
//! [editor_parameters]
//! fontSize = "18px"
//! ```
//!
//! ## Features
//!
//! - `wasm`: Enable WebAssembly bindings (requires `wasm-bindgen`)

pub mod error;
pub mod highlight;
pub mod panel;
pub mod preview;
pub mod settings;
pub mod workbench;

// FFI module (only for non-WASM builds)
#[cfg(not(target_arch = "wasm32"))]
pub mod ffi;

// WASM module (only with feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Convenience re-exports
pub use error::{Error, Result};
pub use highlight::{
    find_matches, highlight, highlight_named, ContentMode, HighlightMarkers, Highlighter,
    MatchSpan,
};
pub use panel::{escape_markup, CodePanel};
pub use preview::prepare_preview;
pub use settings::{Direction, EditMode, EditorInit, EditorSettings, SaveMode};
pub use workbench::{ContentSource, PanelOutput, Workbench};

/// Escape raw editor output and highlight it for a save mode given by name.
///
/// Unknown mode names produce the escaped text without highlighting.
///
/// # Example
///
/// ```rust
/// use math_markup_preview::highlight_html;
///
/// let out = highlight_html("<img src=f.png>", "image");
/// assert!(out.ends_with("&lt;img src=f.png&gt;</code></pre>"));
/// ```
pub fn highlight_html(html: &str, mode: &str) -> String {
    highlight_named(&escape_markup(html), mode)
}
