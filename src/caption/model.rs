/// Script family used to pick a caption font.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "Option<String>", rename_all = "lowercase")]
pub enum Language {
    /// Latin script (also used for romanized text and any unrecognized tag).
    #[default]
    Latin,
    /// Devanagari script.
    Devanagari,
}

impl Language {
    /// Map a request language tag. `devanagari` and `hi` select Devanagari; anything else,
    /// including no tag, selects Latin.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("devanagari" | "hi") => Self::Devanagari,
            _ => Self::Latin,
        }
    }
}

impl From<Option<String>> for Language {
    fn from(tag: Option<String>) -> Self {
        Self::from_tag(tag.as_deref())
    }
}

/// Caption placement along one axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    /// Center the text box on this axis.
    Center,
    /// Engine expression evaluated against the output frame (`w`, `h`, `text_w`, `text_h`).
    Expr(String),
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("center") {
            Self::Center
        } else {
            Self::Expr(s)
        }
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        match p {
            Position::Center => "center".to_string(),
            Position::Expr(e) => e,
        }
    }
}

/// A timed text overlay cue.
///
/// `start_sec`/`end_sec` are offsets from the start of the assembled timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Caption {
    /// Caption text (may be empty).
    #[serde(default)]
    pub text: String,
    /// Window start in seconds.
    #[serde(rename = "start")]
    pub start_sec: f64,
    /// Window end in seconds (exclusive).
    #[serde(rename = "end")]
    pub end_sec: f64,
    /// Script family for font selection.
    #[serde(default, rename = "lang")]
    pub language: Language,
    /// Horizontal placement; centered when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Position>,
    /// Vertical placement; flow default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Position>,
    /// Font size in pixels; flow default when absent or zero.
    #[serde(default, rename = "fontSize", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

impl Caption {
    /// Caption with default placement, language and size.
    pub fn new(text: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        Self {
            text: text.into(),
            start_sec,
            end_sec,
            language: Language::Latin,
            x: None,
            y: None,
            font_size: None,
        }
    }

    /// Set the script family.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set both placements.
    pub fn at(mut self, x: Position, y: Position) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, px: u32) -> Self {
        self.font_size = Some(px);
        self
    }
}
