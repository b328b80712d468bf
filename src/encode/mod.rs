//! Engine-syntax serialization.
//!
//! Plans stay engine-agnostic until this layer turns them into a concrete argv.

/// `ffmpeg` argv and side-file generation.
pub mod ffmpeg;
