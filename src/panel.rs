//! The code panel showing the markup produced by the editor.

use crate::highlight::{ContentMode, Highlighter};
use crate::settings::SaveMode;
use log::debug;

const PANEL_OPEN: &str = "<pre class='wrs_inline'><code id='code_block' style='color:#e0e0e0'>";
const PANEL_CLOSE: &str = "</code></pre>";

/// Script that loads the formula viewer. MathML content needs it to render
/// on pages without the editor.
pub const VIEWER_LOADER: &str = "var js = document.createElement(\"script\");\n\
js.type = \"text/javascript\";\n\
js.src = \"WIRISplugins.js?viewer=image\";\n\
document.head.appendChild(js);\n\n";

/// Escape markup so it displays as literal text.
pub fn escape_markup(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders editor content as a highlighted code listing.
#[derive(Debug, Clone, Copy)]
pub struct CodePanel<'a> {
    highlighter: Highlighter<'a>,
}

impl Default for CodePanel<'static> {
    fn default() -> Self {
        Self::new(Highlighter::default())
    }
}

impl CodePanel<'static> {
    /// Render with the default highlighting markers.
    pub fn render(content: &str, save_mode: SaveMode) -> String {
        CodePanel::default().render_with(content, save_mode)
    }
}

impl<'a> CodePanel<'a> {
    pub fn new(highlighter: Highlighter<'a>) -> Self {
        Self { highlighter }
    }

    /// Escape `content`, wrap it in the panel and highlight its formulas.
    pub fn render_with(&self, content: &str, save_mode: SaveMode) -> String {
        let body = escape_markup(content.trim());

        let mut panel = String::with_capacity(
            PANEL_OPEN.len() + VIEWER_LOADER.len() + body.len() + PANEL_CLOSE.len(),
        );
        panel.push_str(PANEL_OPEN);
        if save_mode == SaveMode::Xml {
            panel.push_str(&escape_markup(VIEWER_LOADER));
        }
        panel.push_str(&body);
        panel.push_str(PANEL_CLOSE);

        debug!("rendering code panel ({} bytes, {} mode)", body.len(), save_mode);
        self.highlight(&panel, save_mode.content_mode())
    }

    fn highlight(&self, panel: &str, mode: ContentMode) -> String {
        self.highlighter.highlight(panel, mode)
    }
}
