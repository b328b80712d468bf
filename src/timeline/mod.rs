/// Slideshow and sequence timeline construction.
pub mod builder;
