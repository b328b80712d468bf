//! Request-level entry points: JSON request model, planning and rendering.

/// End-to-end planning and rendering of one request.
pub mod pipeline;
/// JSON request bodies, one variant per operation.
pub mod request;
