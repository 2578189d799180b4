//! Animation composition (AnimationComposer).

/// Looping GIF output.
pub mod gif;
