//! Concentric discs sliding down a tweened path into the event horizon.

use glam::Vec2;
use tether_engine::{tween, ClipPath, Easing, Ellipse, Rect};

/// Start and end ellipses every disc travels between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscPath {
    pub start: Ellipse,
    pub end: Ellipse,
}

impl DiscPath {
    pub fn for_surface(width: f32, height: f32) -> Self {
        Self {
            start: Ellipse::new(
                Vec2::new(width * 0.5, height * 0.45),
                Vec2::new(width * 0.75, height * 0.7),
            ),
            end: Ellipse::new(Vec2::new(width * 0.5, height * 0.95), Vec2::ZERO),
        }
    }

    /// Ellipse at progress `p`. Vertical position eases in, everything else is linear.
    pub fn at(&self, p: f32) -> Ellipse {
        Ellipse::new(
            Vec2::new(
                tween(self.start.center.x, self.end.center.x, p, Easing::Linear),
                tween(self.start.center.y, self.end.center.y, p, Easing::CubicIn),
            ),
            Vec2::new(
                tween(self.start.radii.x, self.end.radii.x, p, Easing::Linear),
                tween(self.start.radii.y, self.end.radii.y, p, Easing::Linear),
            ),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Progress along the path, in [0, 1).
    pub p: f32,
    pub ellipse: Ellipse,
}

pub struct DiscField {
    path: DiscPath,
    discs: Vec<Disc>,
    clip: usize,
    reference_bottom: f32,
}

impl DiscField {
    /// `count` discs evenly spread along the path, disc i at p = i / count.
    pub fn new(width: f32, height: f32, count: usize) -> Self {
        let path = DiscPath::for_surface(width, height);
        let count = count.max(1);
        let discs = (0..count)
            .map(|i| {
                let p = i as f32 / count as f32;
                Disc { p, ellipse: path.at(p) }
            })
            .collect::<Vec<_>>();
        let clip = select_clip(&discs, height);
        Self { path, discs, clip, reference_bottom: height }
    }

    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    /// The disc currently acting as the event horizon.
    pub fn clip_disc(&self) -> &Disc {
        &self.discs[self.clip]
    }

    /// Horizon ellipse plus the column above it.
    pub fn clip_path(&self) -> ClipPath {
        let e = self.clip_disc().ellipse;
        ClipPath::new().with_ellipse(e).with_rect(Rect::from_origin_size(
            Vec2::new(e.center.x - e.radii.x, 0.0),
            Vec2::new(e.radii.x * 2.0, e.center.y),
        ))
    }

    /// Move every disc `step` along the path, wrapping at 1, and reselect the horizon.
    pub fn advance(&mut self, step: f32) {
        for disc in &mut self.discs {
            disc.p = (disc.p + step).rem_euclid(1.0);
            disc.ellipse = self.path.at(disc.p);
        }
        self.clip = select_clip(&self.discs, self.reference_bottom);
    }
}

/// Scan discs from the least advanced outward and keep the last one whose
/// bottom edge does not drop below the previous disc's.
pub fn select_clip(discs: &[Disc], reference_bottom: f32) -> usize {
    let Some(first) = discs
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.p.total_cmp(&b.1.p))
        .map(|(i, _)| i)
    else {
        return 0;
    };

    let n = discs.len();
    let mut clip = first;
    let mut prev_bottom = reference_bottom;
    for k in 0..n {
        let i = (first + k) % n;
        let bottom = discs[i].ellipse.bottom();
        if bottom <= prev_bottom {
            clip = i;
        }
        prev_bottom = bottom;
    }
    clip
}
