//! Simulation state shared by the drag controller and the gravity step.

use glam::Vec2;
use tether_engine::{EntityId, Rect};

use crate::energy::EnergyMeter;
use crate::gravity::GravityZone;
use crate::ideal::Ideal;

pub struct World {
    /// Active ideals in spawn order; later entries draw on top.
    pub ideals: Vec<Ideal>,
    pub energy: EnergyMeter,
    pub zone: GravityZone,
    /// Drop target for saves.
    pub repository: Rect,
    /// Visible area; spawns happen just outside it.
    pub bounds: Vec2,
}

impl World {
    pub fn new(bounds: Vec2, zone: GravityZone, energy: EnergyMeter) -> Self {
        Self {
            ideals: Vec::new(),
            energy,
            zone,
            repository: default_repository(bounds),
            bounds,
        }
    }

    pub fn ideal(&self, id: EntityId) -> Option<&Ideal> {
        self.ideals.iter().find(|i| i.id == id)
    }

    pub fn ideal_mut(&mut self, id: EntityId) -> Option<&mut Ideal> {
        self.ideals.iter_mut().find(|i| i.id == id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Ideal> {
        let index = self.ideals.iter().position(|i| i.id == id)?;
        Some(self.ideals.remove(index))
    }

    /// Topmost ideal under `p`.
    pub fn hit_test(&self, p: Vec2) -> Option<EntityId> {
        self.ideals.iter().rev().find(|i| i.hit(p)).map(|i| i.id)
    }

    pub fn held_count(&self) -> usize {
        self.ideals.iter().filter(|i| i.held).count()
    }
}

/// Bottom-left fifth of the world.
pub fn default_repository(bounds: Vec2) -> Rect {
    let size = bounds * 0.2;
    Rect::from_origin_size(Vec2::new(0.0, bounds.y - size.y), size)
}
