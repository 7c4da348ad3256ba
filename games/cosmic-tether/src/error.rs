use thiserror::Error;
use tether_engine::EntityId;

/// Why a drag target was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRefusal {
    /// Another ideal is already held.
    AlreadyHolding,
    /// The target has entered the gravity zone.
    Shrinking,
    /// No ideal with that id is active.
    Missing,
}

/// Failures local to one subsystem. None of them stop the simulation.
#[derive(Debug, Error)]
pub enum TetherError {
    #[error("not enough energy: need {needed:.1}, have {available:.1}")]
    ResourceUnavailable { needed: f32, available: f32 },

    #[error("cannot drag ideal {}: {reason:?}", id.0)]
    InvalidDragTarget { id: EntityId, reason: DragRefusal },

    #[error("render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
