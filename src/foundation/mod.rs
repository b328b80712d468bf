/// Core value types shared by planners: fit modes, canvas, time helpers.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Filter-graph value escaping and concat-list quoting.
pub mod escape;
