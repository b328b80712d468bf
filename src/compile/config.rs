use std::path::Path;

use anyhow::Context as _;

use crate::caption::fonts::FontTable;
use crate::caption::layer::{CaptionDefaults, CaptionStyle, WindowPolicy};
use crate::foundation::core::FitMode;
use crate::foundation::error::{ReelError, ReelResult};

/// Request defaults for one slideshow flow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlideshowDefaults {
    /// Seconds each image is shown.
    pub per_image_sec: f64,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Fit policy.
    pub fit: FitMode,
    /// Caption defaults for this flow.
    pub captions: CaptionDefaults,
}

impl SlideshowDefaults {
    fn with_caption_font_size(font_size: u32) -> Self {
        Self {
            per_image_sec: 2.0,
            width: 1080,
            height: 1920,
            fps: 30,
            fit: FitMode::Contain,
            captions: CaptionDefaults::with_font_size(font_size),
        }
    }
}

impl Default for SlideshowDefaults {
    fn default() -> Self {
        Self::with_caption_font_size(48)
    }
}

/// Request defaults for the audio mix flow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MixDefaults {
    /// Voice track gain.
    pub voice_gain: f64,
    /// Music bed gain.
    pub music_gain: f64,
}

impl Default for MixDefaults {
    fn default() -> Self {
        Self {
            voice_gain: 1.0,
            music_gain: 0.3,
        }
    }
}

/// Immutable planner configuration, loaded once and passed into every planning call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Caption fonts by script family.
    pub fonts: FontTable,
    /// Caption box and colour styling.
    pub caption_style: CaptionStyle,
    /// What to do with malformed caption windows.
    pub window_policy: WindowPolicy,
    /// Defaults for the plain slideshow flow.
    pub slideshow: SlideshowDefaults,
    /// Defaults for the captioned slideshow flow.
    pub captioned_slideshow: SlideshowDefaults,
    /// Defaults for the audio mix flow.
    pub mix: MixDefaults,
    /// Default thumbnail seek position.
    pub thumbnail_time_sec: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fonts: FontTable::default(),
            caption_style: CaptionStyle::default(),
            window_policy: WindowPolicy::default(),
            slideshow: SlideshowDefaults::with_caption_font_size(48),
            captioned_slideshow: SlideshowDefaults::with_caption_font_size(56),
            mix: MixDefaults::default(),
            thumbnail_time_sec: 0.5,
        }
    }
}

impl PlannerConfig {
    /// Load a JSON configuration file; omitted fields keep their defaults.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read planner config '{}'", path.display()))?;
        Self::from_json_str(&text).map_err(|e| match e {
            ReelError::Serde(msg) => ReelError::serde(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse configuration JSON layered over [`PlannerConfig::default`].
    ///
    /// Objects merge key by key at every depth, so a partial `captioned_slideshow` block keeps
    /// that flow's own defaults instead of the generic slideshow ones.
    pub fn from_json_str(text: &str) -> ReelResult<Self> {
        let overrides: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ReelError::serde(e.to_string()))?;
        let mut merged =
            serde_json::to_value(Self::default()).map_err(|e| ReelError::serde(e.to_string()))?;
        merge_json(&mut merged, overrides);
        let cfg: Self =
            serde_json::from_value(merged).map_err(|e| ReelError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate numeric defaults.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, flow) in [
            ("slideshow", &self.slideshow),
            ("captioned_slideshow", &self.captioned_slideshow),
        ] {
            if !flow.per_image_sec.is_finite() || flow.per_image_sec <= 0.0 {
                return Err(ReelError::validation(format!(
                    "{name}.per_image_sec must be finite and > 0"
                )));
            }
            if flow.captions.font_size == 0 {
                return Err(ReelError::validation(format!(
                    "{name}.captions.font_size must be > 0"
                )));
            }
        }
        for (name, gain) in [
            ("mix.voice_gain", self.mix.voice_gain),
            ("mix.music_gain", self.mix.music_gain),
        ] {
            if !gain.is_finite() || gain < 0.0 {
                return Err(ReelError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.thumbnail_time_sec.is_finite() || self.thumbnail_time_sec < 0.0 {
            return Err(ReelError::validation(
                "thumbnail_time_sec must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/config.rs"]
mod tests;
