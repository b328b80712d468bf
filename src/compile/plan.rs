use sha2::Digest as _;

use crate::caption::layer::DrawText;
use crate::fit::transform::FitChain;
use crate::foundation::core::CanvasSpec;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::escape::EscapedText;
use crate::timeline::builder::{MediaSource, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
/// Positional input index as addressed by the rendering engine.
pub struct InputIndex(pub u32);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// What an engine input reads from.
pub enum InputSource {
    /// A concat timeline read as one input.
    Timeline(Timeline),
    /// A single media file.
    Media(MediaSource),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One positional engine input.
pub struct PlanInput {
    /// Position in [`RenderPlan::inputs`].
    pub index: InputIndex,
    /// What the input reads.
    pub source: InputSource,
    /// Input-side seek in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seek_sec: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
/// Pixel formats the plan can normalize to.
pub enum PixelFormat {
    /// Planar 4:2:0 YUV, required by the H.264 output profile.
    Yuv420p,
}

impl PixelFormat {
    /// Engine name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yuv420p => "yuv420p",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Burn a subtitle file into the video.
pub struct SubtitleBurn {
    /// Subtitle file reference.
    pub source: MediaSource,
    /// Escaped path handed to the subtitle filter.
    pub path: EscapedText,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
/// How long a mixed audio stream runs.
pub enum MixDuration {
    /// Until the longest input ends.
    Longest,
    /// Until the shortest input ends.
    Shortest,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One gain-adjusted mix input.
pub struct MixInput {
    /// Engine input providing the audio stream.
    pub input: InputIndex,
    /// Linear gain multiplier.
    pub gain: f64,
    /// Graph label for the gain-adjusted stream.
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Mix several audio inputs into one labeled output stream.
pub struct AudioMix {
    /// Inputs in mix order.
    pub inputs: Vec<MixInput>,
    /// Output length policy.
    pub duration: MixDuration,
    /// Seconds to renormalize volume when an input ends.
    pub dropout_transition_sec: u32,
    /// Label of the mixed stream, mapped to the output.
    pub output_label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Ordering class of a stage. Plans list stages in non-decreasing kind order.
pub enum StageKind {
    /// Geometric fit to the canvas.
    Fit,
    /// Pixel-format normalization.
    Format,
    /// Text or subtitle overlays drawn in final canvas coordinates.
    Overlay,
    /// Per-output stream mapping.
    Mapping,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
/// A single filter-graph stage.
pub enum FilterStage {
    /// Scale + crop/pad chain.
    Fit(FitChain),
    /// Pixel-format normalization.
    Format {
        /// Target format.
        format: PixelFormat,
    },
    /// One timed caption.
    Caption(DrawText),
    /// Subtitle burn-in.
    Subtitles(SubtitleBurn),
    /// Audio mix producing a mapped output.
    Mix(AudioMix),
}

impl FilterStage {
    /// Ordering class of this stage.
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Fit(_) => StageKind::Fit,
            Self::Format { .. } => StageKind::Format,
            Self::Caption(_) | Self::Subtitles(_) => StageKind::Overlay,
            Self::Mix(_) => StageKind::Mapping,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Video encoder choice.
pub enum VideoCodec {
    /// H.264 via libx264.
    H264,
    /// Stream copy.
    Copy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Audio encoder choice.
pub enum AudioCodec {
    /// AAC.
    Aac,
    /// Stream copy.
    Copy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Output duration policy.
pub enum Truncation {
    /// Run until every stream ends.
    #[default]
    None,
    /// End at the shorter of the visual and audio streams.
    ShortestStream,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Output container.
pub enum Container {
    /// MP4 video.
    Mp4,
    /// MPEG-4 audio.
    M4a,
    /// Single JPEG image.
    Jpeg,
}

impl Container {
    /// MIME type for responses.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Mp4 => "video/mp4",
            Self::M4a => "audio/mp4",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::M4a => "m4a",
            Self::Jpeg => "jpg",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Encoder and muxer choices for the single output.
pub struct OutputPolicy {
    /// Output container.
    pub container: Container,
    /// Video encoder; `None` lets the engine pick from the container.
    pub video_codec: Option<VideoCodec>,
    /// Audio encoder; `None` lets the engine pick from the container.
    pub audio_codec: Option<AudioCodec>,
    /// Output duration policy.
    pub truncation: Truncation,
    /// Constant output frame rate, enforced on the output side.
    pub frame_rate: Option<u32>,
    /// Target video bitrate (engine syntax, e.g. `3000k`).
    pub video_bitrate: Option<String>,
    /// Stop after this many video frames.
    pub max_video_frames: Option<u32>,
    /// Image quality scale for still outputs (lower is better).
    pub image_quality: Option<u8>,
}

impl OutputPolicy {
    /// Policy with only a container set.
    pub fn new(container: Container) -> Self {
        Self {
            container,
            video_codec: None,
            audio_codec: None,
            truncation: Truncation::None,
            frame_rate: None,
            video_bitrate: None,
            max_video_frames: None,
            image_quality: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Engine-agnostic description of one render.
///
/// A plan consists of:
/// - positional inputs (`inputs`), visual first, audio next
/// - filter stages in fixed order: fit, format, overlays, mapping
/// - a single output policy
///
/// Plans are produced fresh for every request and consumed once by a
/// [`crate::RenderEngine`].
pub struct RenderPlan {
    /// Operation label used in logs and engine failures.
    pub label: String,
    /// Output canvas, when the plan targets a fixed geometry.
    pub canvas: Option<CanvasSpec>,
    /// Engine inputs in positional order.
    pub inputs: Vec<PlanInput>,
    /// Filter stages in execution order.
    pub stages: Vec<FilterStage>,
    /// Output policy.
    pub output: OutputPolicy,
}

impl RenderPlan {
    /// Input at a positional index.
    pub fn input(&self, index: InputIndex) -> Option<&PlanInput> {
        self.inputs.iter().find(|i| i.index == index)
    }

    /// The slideshow or concat timeline, if the plan reads one.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.inputs.iter().find_map(|i| match &i.source {
            InputSource::Timeline(t) => Some(t),
            InputSource::Media(_) => None,
        })
    }

    /// Stage kinds in execution order.
    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(FilterStage::kind).collect()
    }

    /// `true` when stages appear as fit, format, overlays, mapping (each group optional).
    ///
    /// Overlays use final canvas coordinates, so they must never run before the fit stage.
    pub fn stage_order_is_canonical(&self) -> bool {
        self.stages.windows(2).all(|w| w[0].kind() <= w[1].kind())
    }

    /// Caption instructions in draw order.
    pub fn captions(&self) -> impl Iterator<Item = &DrawText> {
        self.stages.iter().filter_map(|s| match s {
            FilterStage::Caption(d) => Some(d),
            _ => None,
        })
    }

    /// Duration of the visual timeline, when it is known from the plan alone.
    pub fn visual_duration_sec(&self) -> Option<f64> {
        self.timeline().and_then(Timeline::total_duration_sec)
    }

    /// Expected output duration given the audio length reported by an asset probe.
    pub fn expected_duration_sec(&self, audio_duration_sec: Option<f64>) -> Option<f64> {
        let visual = self.visual_duration_sec();
        match (self.output.truncation, visual, audio_duration_sec) {
            (Truncation::ShortestStream, Some(v), Some(a)) => Some(v.min(a)),
            (Truncation::ShortestStream, None, Some(a)) => Some(a),
            (_, v, _) => v,
        }
    }

    /// Canonical JSON form of the plan.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// SHA-256 of the canonical JSON form. Identical requests yield identical fingerprints.
    pub fn fingerprint(&self) -> ReelResult<String> {
        let bytes = serde_json::to_vec(self).map_err(|e| ReelError::serde(e.to_string()))?;
        let digest = sha2::Sha256::digest(&bytes);
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
