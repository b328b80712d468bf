use crate::caption::model::Caption;
use crate::foundation::error::{ReelError, ReelResult};

/// One operation request, tagged by `op`.
///
/// Field names follow the public JSON API (`perImageSec`, `fontSize`, ...). Asset fields hold
/// references for an [`crate::assets::resolve::AssetResolver`]; the historical `*Url` names are
/// accepted as aliases.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Request {
    /// Image slideshow with optional audio and captions.
    Slideshow(SlideshowRequest),
    /// Image slideshow with required audio and captions.
    CaptionedSlideshow(SlideshowRequest),
    /// Burn a subtitle file into a video.
    BurnSubtitles(BurnSubtitlesRequest),
    /// Join videos with stream copy.
    ConcatVideos(ConcatRequest),
    /// Re-encode a video.
    Transcode(TranscodeRequest),
    /// Mix voice and music tracks.
    MixAudio(MixAudioRequest),
    /// Grab one frame as a JPEG.
    Thumbnail(ThumbnailRequest),
}

/// Body of the two slideshow operations.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideshowRequest {
    /// Image references in presentation order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Audio reference.
    #[serde(default, alias = "audioUrl")]
    pub audio: Option<String>,
    /// Seconds per image.
    #[serde(default)]
    pub per_image_sec: Option<f64>,
    /// Canvas width.
    #[serde(default)]
    pub width: Option<u32>,
    /// Canvas height.
    #[serde(default)]
    pub height: Option<u32>,
    /// Output frame rate.
    #[serde(default)]
    pub fps: Option<u32>,
    /// `cover` or `contain`.
    #[serde(default)]
    pub fit: Option<String>,
    /// Caption cues.
    #[serde(default)]
    pub captions: Vec<Caption>,
}

/// Body of `burn-subtitles`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnSubtitlesRequest {
    /// Video reference.
    #[serde(default, alias = "videoUrl")]
    pub video: Option<String>,
    /// Subtitle file reference.
    #[serde(default, alias = "srtUrl")]
    pub subs: Option<String>,
}

/// Body of `concat-videos`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcatRequest {
    /// Video references in playback order.
    #[serde(default)]
    pub videos: Vec<String>,
}

/// Body of `transcode`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeRequest {
    /// Video reference.
    #[serde(default, alias = "videoUrl")]
    pub video: Option<String>,
    /// Target width.
    #[serde(default)]
    pub width: Option<u32>,
    /// Target height.
    #[serde(default)]
    pub height: Option<u32>,
    /// Output frame rate.
    #[serde(default)]
    pub fps: Option<u32>,
    /// Target video bitrate (`3000k`).
    #[serde(default)]
    pub video_bitrate: Option<String>,
    /// Fit token used when resizing.
    #[serde(default)]
    pub fit: Option<String>,
}

/// Body of `mix-audio`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixAudioRequest {
    /// Voice track reference.
    #[serde(default, alias = "voiceUrl")]
    pub voice: Option<String>,
    /// Music bed reference.
    #[serde(default, alias = "musicUrl")]
    pub music: Option<String>,
    /// Voice gain.
    #[serde(default)]
    pub voice_gain: Option<f64>,
    /// Music gain.
    #[serde(default)]
    pub music_gain: Option<f64>,
}

/// Body of `thumbnail`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    /// Video reference.
    #[serde(default, alias = "videoUrl")]
    pub video: Option<String>,
    /// Seek position in seconds.
    #[serde(default)]
    pub time_sec: Option<f64>,
}

impl Request {
    /// Parse a request body.
    pub fn from_json_str(text: &str) -> ReelResult<Self> {
        serde_json::from_str(text).map_err(|e| ReelError::serde(format!("invalid request: {e}")))
    }

    /// Operation name as it appears in `op`.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Slideshow(_) => "slideshow",
            Self::CaptionedSlideshow(_) => "captioned-slideshow",
            Self::BurnSubtitles(_) => "burn-subtitles",
            Self::ConcatVideos(_) => "concat-videos",
            Self::Transcode(_) => "transcode",
            Self::MixAudio(_) => "mix-audio",
            Self::Thumbnail(_) => "thumbnail",
        }
    }

    /// Conventional download name for the operation's output.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Slideshow(_) => "short.mp4",
            Self::CaptionedSlideshow(_) => "short_captions.mp4",
            Self::BurnSubtitles(_) => "subtitled.mp4",
            Self::ConcatVideos(_) => "concat.mp4",
            Self::Transcode(_) => "transcoded.mp4",
            Self::MixAudio(_) => "mix.m4a",
            Self::Thumbnail(_) => "thumb.jpg",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/request.rs"]
mod tests;
