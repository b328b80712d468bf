use std::path::{Path, PathBuf};

use crate::caption::model::Language;

/// Read-only mapping from script family to font file, configured once at startup.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontTable {
    /// Font used for Latin-script captions and any unrecognized language.
    pub latin: PathBuf,
    /// Font used for Devanagari captions.
    pub devanagari: PathBuf,
}

impl Default for FontTable {
    fn default() -> Self {
        Self {
            latin: PathBuf::from("/app/fonts/NotoSans-Regular.ttf"),
            devanagari: PathBuf::from("/app/fonts/NotoSansDevanagari-Regular.ttf"),
        }
    }
}

impl FontTable {
    /// Build a table from explicit font paths.
    pub fn new(latin: impl Into<PathBuf>, devanagari: impl Into<PathBuf>) -> Self {
        Self {
            latin: latin.into(),
            devanagari: devanagari.into(),
        }
    }

    /// Font file for a language.
    pub fn font_for(&self, language: Language) -> &Path {
        match language {
            Language::Devanagari => &self.devanagari,
            Language::Latin => &self.latin,
        }
    }

    /// Fonts that do not exist on disk. Missing fonts are a configuration error for the engine,
    /// so callers check this before rendering rather than while planning.
    pub fn missing(&self) -> Vec<&Path> {
        [self.latin.as_path(), self.devanagari.as_path()]
            .into_iter()
            .filter(|p| !p.is_file())
            .collect()
    }
}
