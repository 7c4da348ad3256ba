pub mod api;
pub mod core;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
#[cfg(feature = "vectors")]
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use core::time::{FixedTimestep, IntervalTimer};
pub use core::rng::Rng;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};

// Extensions: geometry and easing helpers
pub use extensions::{
    Easing, lerp, ease, tween,
    distance, direction_to,
    ClipPath, ClipShape, Ellipse, Rect,
};
