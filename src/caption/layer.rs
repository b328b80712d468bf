use crate::caption::fonts::FontTable;
use crate::caption::model::{Caption, Language, Position};
use crate::foundation::error::PlanError;
use crate::foundation::escape::{EscapedText, escape_graph_path, escape_graph_value};

/// Horizontal centering expression relative to the rendered text width.
pub const CENTER_X: &str = "(w-text_w)/2";
/// Vertical centering expression relative to the rendered text height.
pub const CENTER_Y: &str = "(h-text_h)/2";

/// What to do with a caption whose window is empty or malformed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Abort planning with [`PlanError::InvalidCaptionWindow`].
    #[default]
    FailFast,
    /// Drop the cue, log a warning and keep planning.
    Skip,
}

/// Per-flow caption defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionDefaults {
    /// Font size used when a cue has none.
    pub font_size: u32,
    /// Vertical expression used when a cue has no `y`.
    pub y: String,
}

impl CaptionDefaults {
    /// Defaults with a specific font size and the bottom-offset `y`.
    pub fn with_font_size(font_size: u32) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }
}

impl Default for CaptionDefaults {
    fn default() -> Self {
        Self {
            font_size: 56,
            y: "h-250".to_string(),
        }
    }
}

/// Box and colour styling shared by every caption of a flow.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Text colour.
    pub font_color: String,
    /// Draw a background box behind the text.
    pub boxed: bool,
    /// Background box colour (`colour@alpha`).
    pub box_color: String,
    /// Box padding around the text.
    pub box_border_px: u32,
    /// Extra spacing between wrapped lines.
    pub line_spacing_px: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_color: "white".to_string(),
            boxed: true,
            box_color: "black@0.45".to_string(),
            box_border_px: 12,
            line_spacing_px: 6,
        }
    }
}

/// Half-open `[start, end)` interval on the timeline clock.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VisibleWindow {
    /// Inclusive start in seconds.
    pub start_sec: f64,
    /// Exclusive end in seconds.
    pub end_sec: f64,
}

impl VisibleWindow {
    /// `true` when the caption is drawn at timeline time `t`.
    pub fn contains(self, t: f64) -> bool {
        self.start_sec <= t && t < self.end_sec
    }
}

/// One resolved caption draw instruction.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawText {
    /// Position of the source cue in the request list.
    pub cue: usize,
    /// Script family the font was chosen for.
    pub language: Language,
    /// Escaped font file path.
    pub font: EscapedText,
    /// Escaped caption text.
    pub text: EscapedText,
    /// Horizontal expression.
    pub x: String,
    /// Vertical expression.
    pub y: String,
    /// Font size in pixels.
    pub font_size: u32,
    /// When the caption is visible.
    pub window: VisibleWindow,
    /// Box and colour styling.
    pub style: CaptionStyle,
}

/// Maps caption cues to draw instructions using injected fonts and per-flow defaults.
#[derive(Clone, Copy, Debug)]
pub struct CaptionLayer<'a> {
    fonts: &'a FontTable,
    defaults: &'a CaptionDefaults,
    style: &'a CaptionStyle,
    policy: WindowPolicy,
}

impl<'a> CaptionLayer<'a> {
    /// Build a layer over read-only configuration.
    pub fn new(
        fonts: &'a FontTable,
        defaults: &'a CaptionDefaults,
        style: &'a CaptionStyle,
        policy: WindowPolicy,
    ) -> Self {
        Self {
            fonts,
            defaults,
            style,
            policy,
        }
    }

    /// Resolve one cue. `index` is the cue's position in the request list.
    pub fn instruction(&self, index: usize, caption: &Caption) -> Result<DrawText, PlanError> {
        let (start, end) = (caption.start_sec, caption.end_sec);
        if !start.is_finite() || !end.is_finite() || start < 0.0 || start >= end {
            return Err(PlanError::InvalidCaptionWindow { index, start, end });
        }

        let x = resolve_position(caption.x.as_ref(), "x", CENTER_X, CENTER_X)?;
        let y = resolve_position(caption.y.as_ref(), "y", CENTER_Y, &self.defaults.y)?;
        let font_size = caption
            .font_size
            .filter(|&px| px > 0)
            .unwrap_or(self.defaults.font_size);

        Ok(DrawText {
            cue: index,
            language: caption.language,
            font: escape_graph_path(self.fonts.font_for(caption.language)),
            text: escape_graph_value(&caption.text),
            x,
            y,
            font_size,
            window: VisibleWindow {
                start_sec: start,
                end_sec: end,
            },
            style: self.style.clone(),
        })
    }

    /// Resolve every cue in declaration order, applying the window policy.
    #[tracing::instrument(skip_all, fields(captions = captions.len()))]
    pub fn instructions(&self, captions: &[Caption]) -> Result<Vec<DrawText>, PlanError> {
        let mut out = Vec::with_capacity(captions.len());
        for (index, caption) in captions.iter().enumerate() {
            match self.instruction(index, caption) {
                Ok(draw) => out.push(draw),
                Err(err @ PlanError::InvalidCaptionWindow { .. })
                    if self.policy == WindowPolicy::Skip =>
                {
                    tracing::warn!(%err, "skipping caption");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }
}

fn resolve_position(
    pos: Option<&Position>,
    field: &'static str,
    center: &str,
    fallback: &str,
) -> Result<String, PlanError> {
    match pos {
        Some(Position::Center) => Ok(center.to_string()),
        Some(Position::Expr(e)) if !e.trim().is_empty() => {
            // Both would split the drawtext option; expressions never need them.
            if e.contains(['\'', ':']) {
                return Err(PlanError::invalid(
                    field,
                    "position expressions must not contain ':' or single quotes",
                ));
            }
            Ok(e.clone())
        }
        _ => Ok(fallback.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/layer.rs"]
mod tests;
