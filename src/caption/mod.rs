/// Script family to font file mapping.
pub mod fonts;
/// Cue to draw-instruction mapping.
pub mod layer;
/// Caption cue model as it appears in requests.
pub mod model;
