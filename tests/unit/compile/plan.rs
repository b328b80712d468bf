use super::*;
use crate::compile::assembler::{RenderPlanAssembler, VisualInput};
use crate::foundation::core::FitMode;
use crate::timeline::builder::{MediaKind, TimelineBuilder};

fn slideshow_plan(with_audio: bool) -> RenderPlan {
    let images = MediaSource::indexed(["a.jpg", "b.jpg"], MediaKind::Image);
    let timeline = TimelineBuilder::slideshow(&images, 2.0).unwrap();
    let canvas = CanvasSpec::new(1080, 1920, 30, FitMode::Contain).unwrap();
    RenderPlanAssembler::new("slideshow", VisualInput::Timeline(timeline))
        .canvas(canvas)
        .audio(with_audio.then(|| MediaSource::new(0, "voice.mp3", MediaKind::Audio)))
        .build()
}

#[test]
fn stage_kinds_are_ordered() {
    assert!(StageKind::Fit < StageKind::Format);
    assert!(StageKind::Format < StageKind::Overlay);
    assert!(StageKind::Overlay < StageKind::Mapping);

    let plan = slideshow_plan(false);
    assert_eq!(plan.stage_kinds(), vec![StageKind::Fit, StageKind::Format]);
    assert!(plan.stage_order_is_canonical());
}

#[test]
fn out_of_order_stages_are_detected() {
    let mut plan = slideshow_plan(false);
    plan.stages.reverse();
    assert!(!plan.stage_order_is_canonical());
}

#[test]
fn inputs_are_addressable_by_index() {
    let plan = slideshow_plan(true);
    assert!(matches!(
        plan.input(InputIndex(0)).map(|i| &i.source),
        Some(InputSource::Timeline(_))
    ));
    assert!(matches!(
        plan.input(InputIndex(1)).map(|i| &i.source),
        Some(InputSource::Media(m)) if m.locator == "voice.mp3"
    ));
    assert!(plan.input(InputIndex(2)).is_none());
    assert_eq!(plan.timeline().map(Timeline::len), Some(3));
}

#[test]
fn expected_duration_follows_truncation() {
    let silent = slideshow_plan(false);
    assert_eq!(silent.visual_duration_sec(), Some(4.0));
    assert_eq!(silent.expected_duration_sec(Some(10.0)), Some(4.0));

    let voiced = slideshow_plan(true);
    assert_eq!(voiced.expected_duration_sec(Some(3.0)), Some(3.0));
    assert_eq!(voiced.expected_duration_sec(Some(10.0)), Some(4.0));
    assert_eq!(voiced.expected_duration_sec(None), Some(4.0));
}

#[test]
fn container_metadata() {
    assert_eq!(Container::Mp4.mime_type(), "video/mp4");
    assert_eq!(Container::M4a.extension(), "m4a");
    assert_eq!(Container::Jpeg.extension(), "jpg");
    assert_eq!(PixelFormat::Yuv420p.as_str(), "yuv420p");
}

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    let a = slideshow_plan(true);
    let b = slideshow_plan(true);
    let fa = a.fingerprint().unwrap();
    assert_eq!(fa.len(), 64);
    assert!(fa.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(fa, b.fingerprint().unwrap());
    assert_eq!(a.to_json_pretty().unwrap(), b.to_json_pretty().unwrap());

    let c = slideshow_plan(false);
    assert_ne!(fa, c.fingerprint().unwrap());
}

#[test]
fn json_form_tags_stages_and_inputs() {
    let json: serde_json::Value =
        serde_json::from_str(&slideshow_plan(true).to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["inputs"][0]["source"]["type"], "timeline");
    assert_eq!(json["inputs"][1]["source"]["type"], "media");
    assert_eq!(json["stages"][0]["stage"], "fit");
    assert_eq!(json["stages"][1]["stage"], "format");
    assert_eq!(json["stages"][1]["format"], "yuv420p");
    assert_eq!(json["output"]["truncation"], "shortest_stream");
}
