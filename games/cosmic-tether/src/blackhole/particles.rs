//! Particle stream rising from under the horizon and fanning out above it.

use glam::Vec2;
use tether_engine::{ClipPath, Ellipse, Rng, VectorColor, VectorState};

/// Trapezoid the particles travel through: narrow at the bottom, wide at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleArea {
    /// Left edge and width where particles enter (bottom of the band).
    pub sx: f32,
    pub sw: f32,
    /// Left edge and width where particles leave (top of the surface).
    pub ex: f32,
    pub ew: f32,
    /// Band height, measured from the top of the surface.
    pub h: f32,
}

impl ParticleArea {
    /// Sized from the horizon: half its width on entry, twice on exit.
    pub fn from_clip(clip: &Ellipse, width: f32, height: f32) -> Self {
        let sw = clip.radii.x * 0.5;
        let ew = clip.radii.x * 2.0;
        Self {
            sx: (width - sw) / 2.0,
            sw,
            ex: (width - ew) / 2.0,
            ew,
            h: height * 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamParticle {
    pub sx: f32,
    pub dx: f32,
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub r: f32,
    pub color: VectorColor,
    /// 0 at the bottom of the band, 1 at the top.
    pub progress: f32,
}

impl StreamParticle {
    /// New particle at the bottom of the band, or anywhere in it when `scatter` is set.
    fn spawn(area: &ParticleArea, rng: &mut Rng, scatter: bool) -> Self {
        let sx = rng.range(area.sx, area.sx + area.sw);
        let ex = rng.range(area.ex, area.ex + area.ew);
        let y = if scatter { rng.range(0.0, area.h) } else { area.h };
        let mut particle = Self {
            sx,
            dx: ex - sx,
            x: 0.0,
            y,
            vy: rng.range(0.3, 1.0),
            r: rng.range(0.5, 2.5),
            color: VectorColor::WHITE.with_alpha(rng.range(0.2, 0.8)),
            progress: 0.0,
        };
        particle.place(area.h);
        particle
    }

    fn place(&mut self, h: f32) {
        self.progress = if h > 0.0 { (1.0 - self.y / h).clamp(0.0, 1.0) } else { 1.0 };
        self.x = self.sx + self.dx * self.progress;
    }
}

pub struct ParticleStream {
    area: ParticleArea,
    particles: Vec<StreamParticle>,
}

impl ParticleStream {
    pub fn new(area: ParticleArea, count: usize, rng: &mut Rng) -> Self {
        let particles = (0..count).map(|_| StreamParticle::spawn(&area, rng, true)).collect();
        Self { area, particles }
    }

    pub fn area(&self) -> &ParticleArea {
        &self.area
    }

    pub fn particles(&self) -> &[StreamParticle] {
        &self.particles
    }

    /// Rise one tick; particles leaving the top re-enter at the bottom.
    pub fn advance(&mut self, rng: &mut Rng) {
        for particle in &mut self.particles {
            particle.y -= particle.vy;
            particle.place(self.area.h);
            if particle.y < 0.0 {
                *particle = StreamParticle::spawn(&self.area, rng, false);
            }
        }
    }

    pub fn draw(&self, vectors: &mut VectorState, clip: &ClipPath) {
        for p in &self.particles {
            vectors.fill_circle_clipped(Vec2::new(p.x, p.y), p.r / 2.0, p.color, clip);
        }
    }
}
