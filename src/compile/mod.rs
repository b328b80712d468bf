//! Planning: render plan IR, its assembler, per-operation flows and planner configuration.

/// Composes timelines, fit chains, overlays and audio into a plan.
pub mod assembler;
/// Planner configuration loaded once per process.
pub mod config;
/// One planner per service operation.
pub mod flows;
/// The render plan IR.
pub mod plan;
