//! reelkit plans and renders short-form video through the system `ffmpeg`.
//!
//! A request (images, optional audio, timed captions, target geometry) is turned into a
//! [`RenderPlan`]: positional inputs, a computed timeline and a typed filter-stage list. Plans are
//! pure data. Only the serializer in [`encode`] knows engine syntax, and only a
//! [`RenderEngine`] runs processes.
//!
//! - Plan a request with [`plan_request`] (or call a flow planner in [`compile::flows`] directly)
//! - Inspect or fingerprint the [`RenderPlan`]
//! - Execute it with an engine such as [`FfmpegEngine`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Asset resolution and `ffprobe` queries.
pub mod assets;
/// Caption cues, font table and draw-instruction layer.
pub mod caption;
/// Render plan IR, assembler, flow planners and planner configuration.
pub mod compile;
/// Engine-syntax serialization.
pub mod encode;
/// Geometric fit chains and geometry prediction.
pub mod fit;
/// Errors, core value types and filter-graph escaping.
pub mod foundation;
/// Render engines.
pub mod render;
/// Request model and request-level entry points.
pub mod service;
/// Slideshow and concat timelines.
pub mod timeline;

pub use crate::assets::resolve::{AssetResolver, LocalResolver};
pub use crate::caption::fonts::FontTable;
pub use crate::caption::layer::{CaptionLayer, DrawText, WindowPolicy};
pub use crate::caption::model::{Caption, Language, Position};
pub use crate::compile::assembler::{RenderPlanAssembler, VisualInput};
pub use crate::compile::config::PlannerConfig;
pub use crate::compile::plan::{FilterStage, RenderPlan, StageKind, Truncation};
pub use crate::encode::ffmpeg::FfmpegJob;
pub use crate::fit::transform::{FitChain, FitGeometry};
pub use crate::foundation::core::{CanvasSpec, FitMode};
pub use crate::foundation::error::{PlanError, ReelError, ReelResult};
pub use crate::render::engine::{RecordingEngine, RenderEngine, RenderOutput};
pub use crate::render::ffmpeg::FfmpegEngine;
pub use crate::service::pipeline::{plan_request, render_request};
pub use crate::service::request::Request;
pub use crate::timeline::builder::{MediaKind, MediaSource, Timeline, TimelineBuilder};
