//! Asset resolution and media probing.

/// `ffprobe` metadata and engine version queries.
pub mod probe;
/// Request references to local media sources.
pub mod resolve;
