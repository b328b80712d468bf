//! Plan execution.
//!
//! [`engine::RenderEngine`] is the seam between planning and the external process; the planner
//! never spawns anything itself.

/// Engine trait, render outputs and the in-memory recording engine.
pub mod engine;
/// `ffmpeg` process engine.
pub mod ffmpeg;
