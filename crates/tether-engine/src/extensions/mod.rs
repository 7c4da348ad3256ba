// extensions/mod.rs
//
// Optional extension modules.
// Pure math helpers games opt into. No dependency on EngineContext.

pub mod clip;
pub mod easing;
pub mod geometry;

pub use clip::{ClipPath, ClipShape};
pub use easing::{Easing, lerp, ease, tween};
pub use geometry::{distance, direction_to, Ellipse, Rect};
