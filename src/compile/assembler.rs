use crate::caption::layer::DrawText;
use crate::compile::plan::{
    AudioCodec, Container, FilterStage, InputIndex, InputSource, OutputPolicy, PixelFormat,
    PlanInput, RenderPlan, SubtitleBurn, Truncation, VideoCodec,
};
use crate::fit::transform::FitChain;
use crate::foundation::core::CanvasSpec;
use crate::timeline::builder::{MediaSource, Timeline};

/// The visual stream of a plan.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualInput {
    /// Image slideshow (or any concat timeline) read as one input.
    Timeline(Timeline),
    /// An existing video file.
    Video(MediaSource),
}

/// Composes a visual input, fit chain, overlays and optional audio into a [`RenderPlan`].
///
/// Assembly is pure: no IO, no clock, no randomness. Input indices are assigned strictly as
/// visual = 0, audio = 1, and stages are emitted as fit, format, overlays in declared order, so
/// identical builders always produce identical plans.
#[derive(Clone, Debug)]
pub struct RenderPlanAssembler {
    label: String,
    visual: VisualInput,
    audio: Option<MediaSource>,
    canvas: Option<CanvasSpec>,
    fit: Option<FitChain>,
    overlays: Vec<FilterStage>,
    frame_rate: Option<u32>,
    video_bitrate: Option<String>,
    audio_codec: Option<AudioCodec>,
}

impl RenderPlanAssembler {
    /// Start a plan over a visual input.
    pub fn new(label: impl Into<String>, visual: VisualInput) -> Self {
        Self {
            label: label.into(),
            visual,
            audio: None,
            canvas: None,
            fit: None,
            overlays: Vec::new(),
            frame_rate: None,
            video_bitrate: None,
            audio_codec: None,
        }
    }

    /// Fit to a canvas and lock the output frame rate to its fps.
    pub fn canvas(mut self, canvas: CanvasSpec) -> Self {
        self.fit = Some(FitChain::for_canvas(&canvas));
        self.frame_rate = Some(canvas.fps);
        self.canvas = Some(canvas);
        self
    }

    /// Use an explicit fit chain instead of the canvas default.
    pub fn fit(mut self, chain: FitChain) -> Self {
        self.fit = Some(chain);
        self
    }

    /// Attach an audio track as the second input.
    pub fn audio(mut self, audio: Option<MediaSource>) -> Self {
        self.audio = audio;
        self
    }

    /// Append caption overlays in the given order.
    pub fn captions(mut self, captions: impl IntoIterator<Item = DrawText>) -> Self {
        self.overlays
            .extend(captions.into_iter().map(FilterStage::Caption));
        self
    }

    /// Append a subtitle burn-in overlay.
    pub fn subtitles(mut self, burn: SubtitleBurn) -> Self {
        self.overlays.push(FilterStage::Subtitles(burn));
        self
    }

    /// Lock the output frame rate.
    pub fn frame_rate(mut self, fps: Option<u32>) -> Self {
        self.frame_rate = fps;
        self
    }

    /// Target video bitrate.
    pub fn video_bitrate(mut self, bitrate: Option<String>) -> Self {
        self.video_bitrate = bitrate;
        self
    }

    /// Override the audio encoder.
    pub fn audio_codec(mut self, codec: AudioCodec) -> Self {
        self.audio_codec = Some(codec);
        self
    }

    /// Produce the plan.
    pub fn build(self) -> RenderPlan {
        let mut inputs = Vec::with_capacity(2);
        let visual_is_video = matches!(self.visual, VisualInput::Video(_));
        inputs.push(PlanInput {
            index: InputIndex(0),
            source: match self.visual {
                VisualInput::Timeline(t) => InputSource::Timeline(t),
                VisualInput::Video(v) => InputSource::Media(v),
            },
            seek_sec: None,
        });

        let has_audio = self.audio.is_some();
        if let Some(audio) = self.audio {
            inputs.push(PlanInput {
                index: InputIndex(1),
                source: InputSource::Media(audio),
                seek_sec: None,
            });
        }

        let mut stages = Vec::with_capacity(2 + self.overlays.len());
        if let Some(fit) = self.fit {
            stages.push(FilterStage::Fit(fit));
        }
        stages.push(FilterStage::Format {
            format: PixelFormat::Yuv420p,
        });
        stages.extend(self.overlays);

        let audio_codec = self
            .audio_codec
            .or((has_audio || visual_is_video).then_some(AudioCodec::Aac));

        let output = OutputPolicy {
            video_codec: Some(VideoCodec::H264),
            audio_codec,
            truncation: if has_audio {
                Truncation::ShortestStream
            } else {
                Truncation::None
            },
            frame_rate: self.frame_rate,
            video_bitrate: self.video_bitrate,
            ..OutputPolicy::new(Container::Mp4)
        };

        tracing::debug!(
            label = %self.label,
            inputs = inputs.len(),
            stages = stages.len(),
            "assembled render plan"
        );

        RenderPlan {
            label: self.label,
            canvas: self.canvas,
            inputs,
            stages,
            output,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/assembler.rs"]
mod tests;
