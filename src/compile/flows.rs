//! One planning entry point per service operation.
//!
//! Every planner takes already-resolved [`MediaSource`]s plus the read-only [`PlannerConfig`]
//! and returns a fresh [`RenderPlan`]. Request-level defaults (durations, canvas, gains) come from
//! the config, never from globals.

use std::path::Path;

use crate::caption::layer::CaptionLayer;
use crate::caption::model::Caption;
use crate::compile::assembler::{RenderPlanAssembler, VisualInput};
use crate::compile::config::{PlannerConfig, SlideshowDefaults};
use crate::compile::plan::{
    AudioCodec, AudioMix, Container, FilterStage, InputIndex, InputSource, MixDuration, MixInput,
    OutputPolicy, PlanInput, RenderPlan, SubtitleBurn, VideoCodec,
};
use crate::fit::transform::FitChain;
use crate::foundation::core::{CanvasSpec, FitMode, check_dimensions, require_non_negative};
use crate::foundation::error::PlanError;
use crate::foundation::escape::escape_graph_path;
use crate::timeline::builder::{MediaSource, TimelineBuilder};

/// Seconds `amix` takes to renormalize when one input ends.
pub const MIX_DROPOUT_TRANSITION_SEC: u32 = 3;
/// JPEG quality scale used for thumbnails (2 is near-lossless).
pub const THUMBNAIL_QUALITY: u8 = 2;

/// Inputs of the two slideshow flows. `None` fields take the flow's configured default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideshowParams {
    /// Images in presentation order.
    pub images: Vec<MediaSource>,
    /// Optional narration or music track.
    pub audio: Option<MediaSource>,
    /// Seconds per image.
    pub per_image_sec: Option<f64>,
    /// Canvas width.
    pub width: Option<u32>,
    /// Canvas height.
    pub height: Option<u32>,
    /// Output frame rate.
    pub fps: Option<u32>,
    /// Fit token (`cover` / `contain`).
    pub fit: Option<String>,
    /// Timed caption cues.
    pub captions: Vec<Caption>,
}

/// Inputs of the transcode flow.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscodeParams {
    /// Source video.
    pub video: MediaSource,
    /// Target width; requires `height`.
    pub width: Option<u32>,
    /// Target height; requires `width`.
    pub height: Option<u32>,
    /// Output frame rate lock.
    pub fps: Option<u32>,
    /// Target video bitrate in engine syntax (`3000k`, `2M`).
    pub video_bitrate: Option<String>,
    /// Fit token, used only when resizing.
    pub fit: Option<String>,
}

impl TranscodeParams {
    /// Re-encode `video` without changing its geometry.
    pub fn new(video: MediaSource) -> Self {
        Self {
            video,
            width: None,
            height: None,
            fps: None,
            video_bitrate: None,
            fit: None,
        }
    }
}

/// Plain slideshow: audio optional, captions drawn with the slideshow flow's defaults.
#[tracing::instrument(skip_all, fields(images = params.images.len()))]
pub fn plan_slideshow(
    params: &SlideshowParams,
    cfg: &PlannerConfig,
) -> Result<RenderPlan, PlanError> {
    slideshow_flow("slideshow", params, &cfg.slideshow, cfg, false)
}

/// Captioned slideshow: audio required, captions drawn with this flow's own defaults.
#[tracing::instrument(skip_all, fields(images = params.images.len(), captions = params.captions.len()))]
pub fn plan_captioned_slideshow(
    params: &SlideshowParams,
    cfg: &PlannerConfig,
) -> Result<RenderPlan, PlanError> {
    slideshow_flow(
        "captioned-slideshow",
        params,
        &cfg.captioned_slideshow,
        cfg,
        true,
    )
}

fn slideshow_flow(
    label: &str,
    params: &SlideshowParams,
    defaults: &SlideshowDefaults,
    cfg: &PlannerConfig,
    require_audio: bool,
) -> Result<RenderPlan, PlanError> {
    if params.images.is_empty() {
        return Err(PlanError::EmptyInput { field: "images" });
    }
    if require_audio && params.audio.is_none() {
        return Err(PlanError::MissingRequiredField { field: "audio" });
    }

    let timeline = TimelineBuilder::slideshow(
        &params.images,
        params.per_image_sec.unwrap_or(defaults.per_image_sec),
    )?;
    let fit = FitMode::parse_or(params.fit.as_deref(), defaults.fit)?;
    let canvas = CanvasSpec::new(
        params.width.unwrap_or(defaults.width),
        params.height.unwrap_or(defaults.height),
        params.fps.unwrap_or(defaults.fps),
        fit,
    )?;
    let draws = CaptionLayer::new(
        &cfg.fonts,
        &defaults.captions,
        &cfg.caption_style,
        cfg.window_policy,
    )
    .instructions(&params.captions)?;

    Ok(RenderPlanAssembler::new(label, VisualInput::Timeline(timeline))
        .canvas(canvas)
        .audio(params.audio.clone())
        .captions(draws)
        .build())
}

/// Burn a subtitle file into a video, re-encoding video and copying audio.
#[tracing::instrument(skip_all)]
pub fn plan_burn_subtitles(
    video: MediaSource,
    subtitles: MediaSource,
) -> Result<RenderPlan, PlanError> {
    require_locator("video", &video)?;
    require_locator("subs", &subtitles)?;
    let burn = SubtitleBurn {
        path: escape_graph_path(Path::new(&subtitles.locator)),
        source: subtitles,
    };
    Ok(
        RenderPlanAssembler::new("burn-subtitles", VisualInput::Video(video))
            .subtitles(burn)
            .audio_codec(AudioCodec::Copy)
            .build(),
    )
}

/// Join videos back to back with full stream copy.
///
/// Sources must share codecs and parameters; the engine reports a render failure otherwise.
#[tracing::instrument(skip_all, fields(videos = videos.len()))]
pub fn plan_concat(videos: &[MediaSource]) -> Result<RenderPlan, PlanError> {
    let timeline = TimelineBuilder::sequence(videos)?;
    Ok(RenderPlan {
        label: "concat-videos".to_string(),
        canvas: None,
        inputs: vec![PlanInput {
            index: InputIndex(0),
            source: InputSource::Timeline(timeline),
            seek_sec: None,
        }],
        stages: Vec::new(),
        output: OutputPolicy {
            video_codec: Some(VideoCodec::Copy),
            audio_codec: Some(AudioCodec::Copy),
            ..OutputPolicy::new(Container::Mp4)
        },
    })
}

/// Re-encode one video, optionally resizing, locking the frame rate and targeting a bitrate.
#[tracing::instrument(skip_all)]
pub fn plan_transcode(params: &TranscodeParams) -> Result<RenderPlan, PlanError> {
    require_locator("video", &params.video)?;

    let fit = match (params.width, params.height) {
        (Some(width), Some(height)) => {
            check_dimensions(width, height)?;
            let mode = FitMode::parse_or(params.fit.as_deref(), FitMode::Contain)?;
            Some(FitChain::new(width, height, mode))
        }
        (Some(_), None) => return Err(PlanError::MissingRequiredField { field: "height" }),
        (None, Some(_)) => return Err(PlanError::MissingRequiredField { field: "width" }),
        (None, None) => None,
    };
    if params.fps == Some(0) {
        return Err(PlanError::invalid("fps", "must be > 0"));
    }
    let bitrate = params
        .video_bitrate
        .as_deref()
        .map(check_bitrate)
        .transpose()?;

    let mut assembler =
        RenderPlanAssembler::new("transcode", VisualInput::Video(params.video.clone()))
            .frame_rate(params.fps)
            .video_bitrate(bitrate);
    if let Some(chain) = fit {
        assembler = assembler.fit(chain);
    }
    Ok(assembler.build())
}

/// Mix a voice track over a music bed into an AAC audio file.
#[tracing::instrument(skip_all)]
pub fn plan_mix_audio(
    voice: MediaSource,
    music: MediaSource,
    voice_gain: Option<f64>,
    music_gain: Option<f64>,
    cfg: &PlannerConfig,
) -> Result<RenderPlan, PlanError> {
    require_locator("voice", &voice)?;
    require_locator("music", &music)?;
    let voice_gain = require_non_negative("voiceGain", voice_gain.unwrap_or(cfg.mix.voice_gain))?;
    let music_gain = require_non_negative("musicGain", music_gain.unwrap_or(cfg.mix.music_gain))?;
    tracing::debug!(voice_gain, music_gain, "mix gains");

    let mix = AudioMix {
        inputs: vec![
            MixInput {
                input: InputIndex(0),
                gain: voice_gain,
                label: "v".to_string(),
            },
            MixInput {
                input: InputIndex(1),
                gain: music_gain,
                label: "m".to_string(),
            },
        ],
        duration: MixDuration::Longest,
        dropout_transition_sec: MIX_DROPOUT_TRANSITION_SEC,
        output_label: "aout".to_string(),
    };

    Ok(RenderPlan {
        label: "mix-audio".to_string(),
        canvas: None,
        inputs: vec![
            PlanInput {
                index: InputIndex(0),
                source: InputSource::Media(voice),
                seek_sec: None,
            },
            PlanInput {
                index: InputIndex(1),
                source: InputSource::Media(music),
                seek_sec: None,
            },
        ],
        stages: vec![FilterStage::Mix(mix)],
        output: OutputPolicy {
            audio_codec: Some(AudioCodec::Aac),
            ..OutputPolicy::new(Container::M4a)
        },
    })
}

/// Grab one frame at `time_sec` as a JPEG.
#[tracing::instrument(skip_all)]
pub fn plan_thumbnail(
    video: MediaSource,
    time_sec: Option<f64>,
    cfg: &PlannerConfig,
) -> Result<RenderPlan, PlanError> {
    require_locator("video", &video)?;
    let seek = require_non_negative("timeSec", time_sec.unwrap_or(cfg.thumbnail_time_sec))?;
    Ok(RenderPlan {
        label: "thumbnail".to_string(),
        canvas: None,
        inputs: vec![PlanInput {
            index: InputIndex(0),
            source: InputSource::Media(video),
            seek_sec: Some(seek),
        }],
        stages: Vec::new(),
        output: OutputPolicy {
            max_video_frames: Some(1),
            image_quality: Some(THUMBNAIL_QUALITY),
            ..OutputPolicy::new(Container::Jpeg)
        },
    })
}

fn require_locator(field: &'static str, source: &MediaSource) -> Result<(), PlanError> {
    if source.locator.trim().is_empty() {
        return Err(PlanError::MissingRequiredField { field });
    }
    Ok(())
}

fn check_bitrate(raw: &str) -> Result<String, PlanError> {
    let trimmed = raw.trim();
    let digits = trimmed.trim_end_matches(['k', 'K', 'm', 'M']);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(PlanError::invalid(
            "videoBitrate",
            format!("must look like 3000k or 2M (got '{raw}')"),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/compile/flows.rs"]
mod tests;
