//! Editor-wide settings: save format, language and plugin parameters.
//!
//! Settings can be loaded from a TOML file:
//!
//! ```text
//! save_mode = "base64"
//! language = "he"
//!
//! [editor_parameters]
//! fontSize = "18px"
//! ```

use crate::error::{Error, Result};
use crate::highlight::ContentMode;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How the formula plugin serializes formulas into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// MathML elements.
    #[default]
    Xml,
    /// Image elements referencing rendered formulas.
    Image,
    /// Image elements with base64-encoded data.
    Base64,
}

impl SaveMode {
    /// The highlighting mode for markup saved in this format.
    pub fn content_mode(self) -> ContentMode {
        match self {
            SaveMode::Xml => ContentMode::StructuredMarkup,
            SaveMode::Image | SaveMode::Base64 => ContentMode::EmbeddedImage,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SaveMode::Xml => "xml",
            SaveMode::Image => "image",
            SaveMode::Base64 => "base64",
        }
    }
}

impl FromStr for SaveMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(SaveMode::Xml),
            "image" => Ok(SaveMode::Image),
            "base64" => Ok(SaveMode::Base64),
            _ => Err(Error::UnknownSaveMode(s.to_string())),
        }
    }
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How formulas are edited inside the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Text,
    Image,
}

/// Text direction of the editor body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Direction for a language code. Arabic and Hebrew are right-to-left.
    pub fn for_language(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ar" | "he" => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Options the editor is (re)initialized with after a settings change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorInit {
    pub language: String,
    pub directionality: Direction,
    #[serde(rename = "wiriseditorparameters")]
    pub editor_parameters: serde_json::Value,
}

/// Settings shared by the editor, the preview and the code panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub save_mode: SaveMode,
    pub edit_mode: EditMode,
    pub language: String,
    pub editor_parameters: serde_json::Value,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            save_mode: SaveMode::Xml,
            edit_mode: EditMode::Text,
            language: "en".to_string(),
            editor_parameters: serde_json::Value::Object(Default::default()),
        }
    }
}

impl EditorSettings {
    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let mut settings: EditorSettings = toml::from_str(input)?;
        if settings.save_mode == SaveMode::Base64 {
            settings.edit_mode = EditMode::Image;
        }
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        debug!("loading settings from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Change the save format. Base64 formulas can only be edited as images.
    pub fn set_save_mode(&mut self, mode: SaveMode) {
        self.save_mode = mode;
        if mode == SaveMode::Base64 {
            self.edit_mode = EditMode::Image;
        }
        debug!("save mode set to {} (edit mode {:?})", mode, self.edit_mode);
    }

    pub fn set_language(&mut self, code: &str) {
        self.language = code.trim().to_string();
    }

    pub fn direction(&self) -> Direction {
        Direction::for_language(&self.language)
    }

    /// Validate and store the advanced plugin parameters.
    ///
    /// On error the previous parameters are kept.
    pub fn set_editor_parameters(&mut self, json: &str) -> Result<()> {
        let value = validate_editor_parameters(json)?;
        self.editor_parameters = value;
        Ok(())
    }

    pub fn editor_init(&self) -> EditorInit {
        EditorInit {
            language: self.language.clone(),
            directionality: self.direction(),
            editor_parameters: self.editor_parameters.clone(),
        }
    }
}

/// Parse a JSON parameter string, reporting the parser's message on failure.
pub fn validate_editor_parameters(json: &str) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(json)?)
}
