use std::path::Path;

use crate::assets::resolve::{AssetResolver, resolve_all};
use crate::compile::config::PlannerConfig;
use crate::compile::flows::{
    SlideshowParams, TranscodeParams, plan_burn_subtitles, plan_captioned_slideshow, plan_concat,
    plan_mix_audio, plan_slideshow, plan_thumbnail, plan_transcode,
};
use crate::compile::plan::RenderPlan;
use crate::foundation::error::{PlanError, ReelError, ReelResult};
use crate::render::engine::{RenderEngine, RenderOutput};
use crate::service::request::{Request, SlideshowRequest};
use crate::timeline::builder::{MediaKind, MediaSource};

/// Resolve a request's assets and plan it. Performs no rendering.
#[tracing::instrument(skip_all, fields(op = request.op()))]
pub fn plan_request(
    request: &Request,
    resolver: &dyn AssetResolver,
    cfg: &PlannerConfig,
) -> ReelResult<RenderPlan> {
    let plan = match request {
        Request::Slideshow(body) => plan_slideshow(&slideshow_params(body, resolver)?, cfg)?,
        Request::CaptionedSlideshow(body) => {
            plan_captioned_slideshow(&slideshow_params(body, resolver)?, cfg)?
        }
        Request::BurnSubtitles(body) => {
            let video = required(resolver, body.video.as_deref(), "video", MediaKind::Video)?;
            let subs = required(resolver, body.subs.as_deref(), "subs", MediaKind::Subtitles)?;
            plan_burn_subtitles(video, subs)?
        }
        Request::ConcatVideos(body) => {
            if body.videos.is_empty() {
                return Err(PlanError::EmptyInput { field: "videos" }.into());
            }
            plan_concat(&resolve_all(resolver, &body.videos, MediaKind::Video)?)?
        }
        Request::Transcode(body) => {
            let video = required(resolver, body.video.as_deref(), "video", MediaKind::Video)?;
            plan_transcode(&TranscodeParams {
                video,
                width: body.width,
                height: body.height,
                fps: body.fps,
                video_bitrate: body.video_bitrate.clone(),
                fit: body.fit.clone(),
            })?
        }
        Request::MixAudio(body) => {
            let voice = required(resolver, body.voice.as_deref(), "voice", MediaKind::Audio)?;
            let music = required(resolver, body.music.as_deref(), "music", MediaKind::Audio)?;
            plan_mix_audio(voice, music, body.voice_gain, body.music_gain, cfg)?
        }
        Request::Thumbnail(body) => {
            let video = required(resolver, body.video.as_deref(), "video", MediaKind::Video)?;
            plan_thumbnail(video, body.time_sec, cfg)?
        }
    };
    tracing::debug!(label = %plan.label, stages = plan.stages.len(), "planned request");
    Ok(plan)
}

/// Plan a request and execute it with `engine`, writing to `output`.
///
/// Caption fonts are checked before the engine runs so a missing font is reported as a
/// configuration problem rather than an engine failure.
#[tracing::instrument(skip_all, fields(op = request.op(), engine = engine.name()))]
pub fn render_request(
    request: &Request,
    resolver: &dyn AssetResolver,
    cfg: &PlannerConfig,
    engine: &dyn RenderEngine,
    output: &Path,
) -> ReelResult<RenderOutput> {
    let plan = plan_request(request, resolver, cfg)?;
    for draw in plan.captions() {
        let font = cfg.fonts.font_for(draw.language);
        if !font.is_file() {
            return Err(ReelError::validation(format!(
                "caption font '{}' does not exist",
                font.display()
            )));
        }
    }
    engine.execute(&plan, output)
}

fn slideshow_params(
    body: &SlideshowRequest,
    resolver: &dyn AssetResolver,
) -> ReelResult<SlideshowParams> {
    if body.images.is_empty() {
        return Err(PlanError::EmptyInput { field: "images" }.into());
    }
    let images = resolve_all(resolver, &body.images, MediaKind::Image)?;
    let audio = match body.audio.as_deref().map(str::trim) {
        Some(r) if !r.is_empty() => Some(resolver.resolve(r, MediaKind::Audio)?),
        _ => None,
    };
    Ok(SlideshowParams {
        images,
        audio,
        per_image_sec: body.per_image_sec,
        width: body.width,
        height: body.height,
        fps: body.fps,
        fit: body.fit.clone(),
        captions: body.captions.clone(),
    })
}

fn required(
    resolver: &dyn AssetResolver,
    reference: Option<&str>,
    field: &'static str,
    kind: MediaKind,
) -> ReelResult<MediaSource> {
    match reference.map(str::trim) {
        Some(r) if !r.is_empty() => resolver.resolve(r, kind),
        _ => Err(PlanError::MissingRequiredField { field }.into()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/pipeline.rs"]
mod tests;
