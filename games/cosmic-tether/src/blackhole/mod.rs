//! Procedural black hole: tweened discs, a baked radial line field and a
//! particle stream, all cut to the current event horizon.

pub mod discs;
pub mod lines;
pub mod particles;

use tether_engine::{ClipPath, Rng, VectorColor, VectorState};

use crate::config::VisualConfig;
use crate::error::TetherError;
use discs::DiscField;
use lines::LineField;
use particles::{ParticleArea, ParticleStream};

/// Slack added to the horizon width when deciding whether a disc is clipped.
const DISC_CLIP_SLACK: f32 = 5.0;

/// Drawing surface size as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSurface {
    pub width: f32,
    pub height: f32,
    pub dpi: f32,
}

impl RenderSurface {
    pub fn new(width: f32, height: f32, dpi: f32) -> Self {
        Self { width, height, dpi }
    }

    pub fn validate(&self) -> Result<(), TetherError> {
        if !(self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0) {
            return Err(TetherError::RenderSurfaceUnavailable(format!(
                "surface is {}x{}",
                self.width, self.height
            )));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(TetherError::RenderSurfaceUnavailable(format!("device pixel ratio {}", self.dpi)));
        }
        Ok(())
    }
}

pub struct BlackHole {
    surface: RenderSurface,
    discs: DiscField,
    clip: ClipPath,
    lines: LineField,
    particles: ParticleStream,
    disc_speed: f32,
    disc_stride: usize,
    line_opacity: f32,
    stroke_width: f32,
    stroke_color: VectorColor,
}

impl BlackHole {
    /// Build the full visual for `surface`.
    pub fn new(surface: RenderSurface, cfg: &VisualConfig, rng: &mut Rng) -> Result<Self, TetherError> {
        surface.validate()?;

        let discs = DiscField::new(surface.width, surface.height, cfg.disc_count);
        let clip = discs.clip_path();
        let stroke_color = cfg.stroke();
        let lines = LineField::new(discs.discs(), cfg.line_count, &clip, cfg.stroke_width, stroke_color);
        let area = ParticleArea::from_clip(&discs.clip_disc().ellipse, surface.width, surface.height);
        let particles = ParticleStream::new(area, cfg.particle_count, rng);

        log::info!(
            "black hole ready: {}x{} @{}x, {} discs, {} lines, {} particles",
            surface.width,
            surface.height,
            surface.dpi,
            discs.discs().len(),
            lines.lines().len(),
            particles.particles().len()
        );

        Ok(Self {
            surface,
            discs,
            clip,
            lines,
            particles,
            disc_speed: cfg.disc_speed,
            disc_stride: cfg.disc_stride.max(1),
            line_opacity: cfg.line_opacity,
            stroke_width: cfg.stroke_width,
            stroke_color,
        })
    }

    pub fn surface(&self) -> RenderSurface {
        self.surface
    }

    pub fn discs(&self) -> &DiscField {
        &self.discs
    }

    pub fn lines(&self) -> &LineField {
        &self.lines
    }

    pub fn particles(&self) -> &ParticleStream {
        &self.particles
    }

    pub fn clip(&self) -> &ClipPath {
        &self.clip
    }

    /// One tick: slide the discs, move the horizon, lift the particles.
    pub fn advance(&mut self, rng: &mut Rng) {
        self.discs.advance(self.disc_speed);
        self.clip = self.discs.clip_path();
        self.particles.advance(rng);
    }

    /// Discs, then the line layer, then particles.
    pub fn draw(&self, vectors: &mut VectorState) {
        let horizon = self.discs.clip_disc().ellipse;
        for disc in self.discs.discs().iter().step_by(self.disc_stride) {
            let e = &disc.ellipse;
            if e.radii.x < horizon.radii.x + DISC_CLIP_SLACK && e.center.y > horizon.center.y {
                vectors.stroke_ellipse_clipped(e, self.stroke_width, self.stroke_color, &self.clip);
            } else {
                vectors.stroke_ellipse(e, self.stroke_width, self.stroke_color);
            }
        }

        vectors.composite(self.lines.layer(), self.line_opacity);

        self.particles.draw(vectors, &self.clip);
    }
}
