//! Ideals: the floating icons the player tries to rescue.

use glam::Vec2;
use tether_engine::{direction_to, EntityId, Rng};

use crate::config::IdealCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    /// Caught by the gravity zone. Never reverts.
    Shrinking,
}

#[derive(Debug, Clone)]
pub struct Ideal {
    pub id: EntityId,
    /// Index into the configured category table.
    pub category: usize,
    /// Center in world coordinates.
    pub pos: Vec2,
    pub vel: Vec2,
    /// Last heading toward the gravity center.
    pub dir: Vec2,
    pub radius: f32,
    pub phase: Phase,
    pub held: bool,
    pub scale: f32,
    pub opacity: f32,
}

impl Ideal {
    /// New falling ideal at `pos`, facing `center`.
    pub fn new(id: EntityId, category: usize, radius: f32, pos: Vec2, center: Vec2) -> Self {
        let (dir, _) = direction_to(pos, center, 1.0);
        Self {
            id,
            category,
            pos,
            vel: Vec2::ZERO,
            dir,
            radius,
            phase: Phase::Falling,
            held: false,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    pub fn is_shrinking(&self) -> bool {
        self.phase == Phase::Shrinking
    }

    /// Enter the shrink sequence. Returns true only on the first call.
    pub fn begin_shrinking(&mut self) -> bool {
        if self.is_shrinking() {
            return false;
        }
        self.phase = Phase::Shrinking;
        self.held = false;
        true
    }

    /// Pointer hit test against the logical radius.
    pub fn hit(&self, p: Vec2) -> bool {
        (p - self.pos).length_squared() <= self.radius * self.radius
    }
}

/// Random point `margin` outside one of the four edges of a `bounds`-sized area.
pub fn spawn_position(rng: &mut Rng, bounds: Vec2, margin: f32) -> Vec2 {
    match rng.next_int(4) {
        0 => Vec2::new(rng.next_f32() * bounds.x, -margin),
        1 => Vec2::new(bounds.x + margin, rng.next_f32() * bounds.y),
        2 => Vec2::new(rng.next_f32() * bounds.x, bounds.y + margin),
        _ => Vec2::new(-margin, rng.next_f32() * bounds.y),
    }
}

/// Pick a category and an off-screen start for a new ideal.
pub fn spawn(
    id: EntityId,
    rng: &mut Rng,
    categories: &[IdealCategory],
    bounds: Vec2,
    margin: f32,
    center: Vec2,
) -> Option<Ideal> {
    if categories.is_empty() {
        return None;
    }
    let category = rng.next_int(categories.len() as u32) as usize;
    let pos = spawn_position(rng, bounds, margin);
    Some(Ideal::new(id, category, categories[category].radius, pos, center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_categories;

    #[test]
    fn spawns_outside_visible_bounds() {
        let mut rng = Rng::new(7);
        let bounds = Vec2::new(800.0, 600.0);
        for _ in 0..200 {
            let p = spawn_position(&mut rng, bounds, 80.0);
            let outside = p.x < 0.0 || p.x > bounds.x || p.y < 0.0 || p.y > bounds.y;
            assert!(outside, "{p:?} is on screen");
        }
    }

    #[test]
    fn spawned_ideal_faces_center() {
        let mut rng = Rng::new(3);
        let center = Vec2::new(400.0, 300.0);
        let ideal = spawn(EntityId(1), &mut rng, &default_categories(), Vec2::new(800.0, 600.0), 80.0, center)
            .unwrap();
        let expected = (center - ideal.pos).normalize();
        assert!((ideal.dir - expected).length() < 1e-5);
        assert_eq!(ideal.phase, Phase::Falling);
        assert!(ideal.category < 10);
        assert_eq!(ideal.radius, 40.0);
    }

    #[test]
    fn no_categories_no_spawn() {
        let mut rng = Rng::new(1);
        assert!(spawn(EntityId(1), &mut rng, &[], Vec2::ONE, 80.0, Vec2::ZERO).is_none());
    }

    #[test]
    fn shrinking_is_entered_once() {
        let mut ideal = Ideal::new(EntityId(1), 0, 40.0, Vec2::ZERO, Vec2::X);
        assert!(ideal.begin_shrinking());
        assert!(!ideal.begin_shrinking());
        assert!(ideal.is_shrinking());
    }

    #[test]
    fn hit_uses_radius() {
        let ideal = Ideal::new(EntityId(1), 0, 40.0, Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert!(ideal.hit(Vec2::new(130.0, 100.0)));
        assert!(!ideal.hit(Vec2::new(141.0, 100.0)));
    }
}
