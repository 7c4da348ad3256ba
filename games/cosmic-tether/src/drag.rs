//! Pointer-driven drag: at most one ideal held, grabs cost energy,
//! drops inside the repository save the ideal.

use glam::Vec2;
use tether_engine::EntityId;

use crate::error::{DragRefusal, TetherError};
use crate::world::World;

#[derive(Debug, Clone, Copy)]
struct Held {
    id: EntityId,
    offset: Vec2,
}

/// Result of releasing the held ideal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Released inside the repository and removed from play.
    Saved { id: EntityId, pos: Vec2, category: usize },
    /// Released elsewhere; gravity resumes next tick.
    Released { id: EntityId },
}

#[derive(Debug, Default)]
pub struct DragController {
    held: Option<Held>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<EntityId> {
        self.held.map(|h| h.id)
    }

    /// Try to pick up `id` with the pointer at `pointer`.
    pub fn grab(&mut self, world: &mut World, id: EntityId, pointer: Vec2, cost: f32) -> Result<(), TetherError> {
        if self.held.is_some() {
            return Err(TetherError::InvalidDragTarget { id, reason: DragRefusal::AlreadyHolding });
        }
        let shrinking = match world.ideal(id) {
            Some(ideal) => ideal.is_shrinking(),
            None => return Err(TetherError::InvalidDragTarget { id, reason: DragRefusal::Missing }),
        };
        if shrinking {
            return Err(TetherError::InvalidDragTarget { id, reason: DragRefusal::Shrinking });
        }

        world.energy.try_spend(cost)?;

        if let Some(ideal) = world.ideal_mut(id) {
            ideal.held = true;
            ideal.vel = Vec2::ZERO;
            self.held = Some(Held { id, offset: pointer - ideal.pos });
        }
        Ok(())
    }

    /// Follow the pointer with the held ideal, if any.
    pub fn drag_to(&mut self, world: &mut World, pointer: Vec2) {
        let Some(held) = self.held else { return };
        match world.ideal_mut(held.id) {
            Some(ideal) => {
                ideal.pos = pointer - held.offset;
                ideal.vel = Vec2::ZERO;
            }
            None => self.held = None,
        }
    }

    /// Let go. Saves the ideal when its center is inside the repository.
    pub fn release(&mut self, world: &mut World) -> Option<DropOutcome> {
        let held = self.held.take()?;
        let ideal = world.ideal_mut(held.id)?;
        ideal.held = false;
        let pos = ideal.pos;
        if world.repository.contains(pos) {
            let saved = world.remove(held.id)?;
            Some(DropOutcome::Saved { id: saved.id, pos: saved.pos, category: saved.category })
        } else {
            Some(DropOutcome::Released { id: held.id })
        }
    }

    /// Abandon an in-flight drag without saving.
    pub fn cancel(&mut self, world: &mut World) {
        if let Some(held) = self.held.take() {
            if let Some(ideal) = world.ideal_mut(held.id) {
                ideal.held = false;
            }
        }
    }
}
