//! Keeps the preview and code panel in step with the editor.

use crate::error::Result;
use crate::panel::CodePanel;
use crate::preview::prepare_preview;
use crate::settings::{EditorInit, EditorSettings, SaveMode};
use log::{debug, warn};

/// Supplies the editor's current document as HTML.
pub trait ContentSource {
    fn current_content(&self) -> String;
}

impl<F> ContentSource for F
where
    F: Fn() -> String,
{
    fn current_content(&self) -> String {
        self()
    }
}

/// Output for the two display surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOutput {
    /// HTML for the rendered preview.
    pub preview: String,
    /// Highlighted code listing.
    pub code: String,
}

/// Editor settings together with the source of editor content.
#[derive(Debug)]
pub struct Workbench<S> {
    settings: EditorSettings,
    source: S,
}

impl<S: ContentSource> Workbench<S> {
    pub fn new(source: S) -> Self {
        Self::with_settings(source, EditorSettings::default())
    }

    pub fn with_settings(source: S, settings: EditorSettings) -> Self {
        Self { settings, source }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Refresh both surfaces from the current content.
    pub fn update(&self) -> PanelOutput {
        let content = self.source.current_content();
        debug!(
            "updating panels from {} bytes of content ({} mode)",
            content.len(),
            self.settings.save_mode
        );

        PanelOutput {
            preview: prepare_preview(&content),
            code: CodePanel::render(&content, self.settings.save_mode),
        }
    }

    /// Switch the save format and refresh.
    pub fn change_mode(&mut self, mode: SaveMode) -> PanelOutput {
        self.settings.set_save_mode(mode);
        self.update()
    }

    /// Store new plugin parameters. The returned options must be used to
    /// rebuild the editor.
    pub fn set_parameters(&mut self, json: &str) -> Result<EditorInit> {
        if let Err(err) = self.settings.set_editor_parameters(json) {
            warn!("rejected editor parameters: {}", err);
            return Err(err);
        }
        Ok(self.settings.editor_init())
    }

    /// Change the editor language. The returned options must be used to
    /// rebuild the editor.
    pub fn set_language(&mut self, code: &str) -> EditorInit {
        self.settings.set_language(code);
        self.settings.editor_init()
    }
}
