//! Pull toward the black hole, capture by the gravity zone, and the
//! shrink-to-destruction sequence.

use glam::Vec2;
use tether_engine::{direction_to, distance, EntityId};

use crate::config::GravityConfig;
use crate::ideal::{Ideal, Phase};

/// Capture circle around the black hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityZone {
    pub center: Vec2,
    pub radius: f32,
}

impl GravityZone {
    /// Centered on the surface, radius a fraction of its width.
    pub fn from_surface(width: f32, height: f32, radius_fraction: f32) -> Self {
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            radius: width * radius_fraction,
        }
    }

    /// Whether an ideal of `radius` at distance `dist` overlaps the zone enough to be caught.
    pub fn captures(&self, dist: f32, radius: f32, collision_multiplier: f32) -> bool {
        dist < self.radius + radius * collision_multiplier
    }
}

/// Speed of a falling ideal `dist` away from the center.
pub fn falling_speed(dist: f32, cfg: &GravityConfig) -> f32 {
    (cfg.base_speed + cfg.accel / dist.max(cfg.min_dist)).min(cfg.max_speed)
}

/// Speed of a shrinking ideal: half the pull, capped lower.
pub fn shrinking_speed(dist: f32, cfg: &GravityConfig) -> f32 {
    (cfg.base_speed + cfg.accel * cfg.shrink_accel_factor / dist.max(1.0))
        .min(cfg.max_speed * cfg.shrink_max_speed_factor)
}

/// What happened to an ideal during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    ShrinkStarted { id: EntityId, pos: Vec2 },
    Destroyed { id: EntityId, pos: Vec2 },
}

/// Advance every non-held ideal by one tick.
///
/// Walks the set back to front so destroyed ideals can be removed in place.
pub fn step(ideals: &mut Vec<Ideal>, zone: &GravityZone, cfg: &GravityConfig) -> Vec<StepOutcome> {
    let mut outcomes = Vec::new();
    for i in (0..ideals.len()).rev() {
        let ideal = &mut ideals[i];
        if ideal.held {
            continue;
        }
        let phase = ideal.phase;
        match phase {
            Phase::Falling => {
                let (dir, dist) = direction_to(ideal.pos, zone.center, cfg.min_dist);
                let speed = falling_speed(dist, cfg);
                ideal.dir = dir;
                ideal.vel = dir * speed;
                ideal.pos += ideal.vel;

                if zone.captures(dist, ideal.radius, cfg.collision_multiplier) && ideal.begin_shrinking() {
                    log::info!("ideal {} caught by the black hole", ideal.id.0);
                    outcomes.push(StepOutcome::ShrinkStarted { id: ideal.id, pos: ideal.pos });
                }
            }
            Phase::Shrinking => {
                let dist = distance(ideal.pos, zone.center);
                if dist < cfg.remove_epsilon {
                    let gone = ideals.remove(i);
                    outcomes.push(StepOutcome::Destroyed { id: gone.id, pos: gone.pos });
                    continue;
                }
                let (dir, _) = direction_to(ideal.pos, zone.center, 1.0);
                ideal.dir = dir;
                ideal.vel = dir * shrinking_speed(dist, cfg);
                ideal.pos += ideal.vel;

                ideal.scale = if zone.radius > 0.0 {
                    (dist / zone.radius).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                ideal.opacity = ideal.scale * 0.8 + 0.2;
            }
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> GravityZone {
        GravityZone::from_surface(800.0, 600.0, 0.15)
    }

    fn ideal_at(id: u32, pos: Vec2) -> Ideal {
        Ideal::new(EntityId(id), 0, 40.0, pos, zone().center)
    }

    #[test]
    fn zone_from_surface() {
        let z = zone();
        assert_eq!(z.center, Vec2::new(400.0, 300.0));
        assert!((z.radius - 120.0).abs() < 1e-4);
    }

    #[test]
    fn far_speed_is_slow() {
        let cfg = GravityConfig::default();
        let s = falling_speed(1000.0, &cfg);
        assert!((s - 0.39).abs() < 1e-4);
        assert!(s < cfg.max_speed);
    }

    #[test]
    fn speed_is_capped_and_monotonic() {
        let cfg = GravityConfig::default();
        let mut prev = f32::MAX;
        for d in [0.0, 1.0, 5.0, 10.0, 22.0, 50.0, 100.0, 500.0, 5000.0] {
            let s = falling_speed(d, &cfg);
            assert!(s <= cfg.max_speed);
            assert!(s <= prev + 1e-6);
            prev = s;
        }
        assert_eq!(falling_speed(0.0, &cfg), cfg.max_speed);
    }

    #[test]
    fn shrinking_speed_caps_lower() {
        let cfg = GravityConfig::default();
        assert!((shrinking_speed(0.5, &cfg) - 3.2).abs() < 1e-5);
        assert!((shrinking_speed(450.0, &cfg) - 0.4).abs() < 1e-5);
    }

    #[test]
    fn falling_ideal_moves_toward_center() {
        let cfg = GravityConfig::default();
        let z = zone();
        let mut ideals = vec![ideal_at(1, Vec2::new(-80.0, 300.0))];
        let before = distance(ideals[0].pos, z.center);
        let outcomes = step(&mut ideals, &z, &cfg);
        assert!(outcomes.is_empty());
        let after = distance(ideals[0].pos, z.center);
        assert!((before - after - falling_speed(before, &cfg)).abs() < 1e-3);
    }

    #[test]
    fn capture_flips_once() {
        let cfg = GravityConfig::default();
        let z = zone();
        // 130 < 120 + 40 * 0.5
        let mut ideals = vec![ideal_at(1, Vec2::new(400.0 - 130.0, 300.0))];
        let first = step(&mut ideals, &z, &cfg);
        assert_eq!(first.len(), 1);
        assert!(matches!(first[0], StepOutcome::ShrinkStarted { id: EntityId(1), .. }));
        assert!(ideals[0].is_shrinking());

        let second = step(&mut ideals, &z, &cfg);
        assert!(second.iter().all(|o| !matches!(o, StepOutcome::ShrinkStarted { .. })));
        assert!(ideals[0].is_shrinking());
    }

    #[test]
    fn outside_capture_stays_falling() {
        let cfg = GravityConfig::default();
        let z = zone();
        let mut ideals = vec![ideal_at(1, Vec2::new(400.0 - 141.0, 300.0))];
        step(&mut ideals, &z, &cfg);
        assert_eq!(ideals[0].phase, Phase::Falling);
    }

    #[test]
    fn shrinking_ideal_near_center_is_removed() {
        let cfg = GravityConfig::default();
        let z = zone();
        let mut near = ideal_at(2, z.center + Vec2::new(1.0, 0.0));
        near.begin_shrinking();
        let mut ideals = vec![ideal_at(1, Vec2::new(-80.0, 0.0)), near, ideal_at(3, Vec2::new(900.0, 0.0))];
        let outcomes = step(&mut ideals, &z, &cfg);
        assert_eq!(ideals.len(), 2);
        assert!(outcomes.contains(&StepOutcome::Destroyed { id: EntityId(2), pos: z.center + Vec2::new(1.0, 0.0) }));
        assert_eq!(ideals[0].id, EntityId(1));
        assert_eq!(ideals[1].id, EntityId(3));
    }

    #[test]
    fn shrinking_scales_with_distance() {
        let cfg = GravityConfig::default();
        let z = zone();
        let mut ideal = ideal_at(1, z.center + Vec2::new(60.0, 0.0));
        ideal.begin_shrinking();
        let mut ideals = vec![ideal];
        step(&mut ideals, &z, &cfg);
        assert!((ideals[0].scale - 0.5).abs() < 1e-4);
        assert!((ideals[0].opacity - 0.6).abs() < 1e-4);
    }

    #[test]
    fn shrinking_always_ends_in_removal() {
        let cfg = GravityConfig::default();
        let z = zone();
        let mut ideal = ideal_at(1, z.center + Vec2::new(100.0, 37.0));
        ideal.begin_shrinking();
        let mut ideals = vec![ideal];
        let mut destroyed = false;
        for _ in 0..1000 {
            if step(&mut ideals, &z, &cfg).iter().any(|o| matches!(o, StepOutcome::Destroyed { .. })) {
                destroyed = true;
                break;
            }
        }
        assert!(destroyed);
        assert!(ideals.is_empty());
    }

    #[test]
    fn held_ideals_are_skipped() {
        let cfg = GravityConfig::default();
        let z = zone();
        let mut ideal = ideal_at(1, Vec2::new(10.0, 10.0));
        ideal.held = true;
        let mut ideals = vec![ideal];
        step(&mut ideals, &z, &cfg);
        assert_eq!(ideals[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(ideals[0].vel, Vec2::ZERO);
    }
}
