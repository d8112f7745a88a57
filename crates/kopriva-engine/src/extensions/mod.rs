// extensions/mod.rs
//
// Animation helpers with no knowledge of panels or scenes.
// Components build on these; nothing here depends on the rest of the crate.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, ease};
pub use tween::Tween;
