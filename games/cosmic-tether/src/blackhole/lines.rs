//! Radial line field threading every disc, tessellated once into its own layer.

use std::f32::consts::TAU;

use glam::Vec2;
use tether_engine::{ClipPath, VectorColor, VectorState};

use super::discs::Disc;

/// One polyline per angle, one point per disc.
pub fn sample_lines(discs: &[Disc], count: usize) -> Vec<Vec<Vec2>> {
    (0..count)
        .map(|k| {
            let angle = k as f32 * TAU / count as f32;
            discs.iter().map(|d| d.ellipse.point_at(angle)).collect()
        })
        .collect()
}

/// Index of the first point after the start that lies inside `clip`.
fn entry_index(line: &[Vec2], clip: &ClipPath) -> Option<usize> {
    line.iter().skip(1).position(|&p| clip.contains(p)).map(|i| i + 1)
}

/// Stroke `lines` into a fresh layer. Each line is drawn freely until it
/// first enters the clip path and is clipped from the segment that enters it on.
pub fn bake(lines: &[Vec<Vec2>], clip: &ClipPath, width: f32, color: VectorColor) -> VectorState {
    let mut layer = VectorState::new();
    for line in lines {
        if line.len() < 2 {
            continue;
        }
        match entry_index(line, clip) {
            Some(k) => {
                layer.stroke_polyline(&line[..k], width, color);
                layer.stroke_polyline_clipped(&line[k - 1..], width, color, clip);
            }
            None => layer.stroke_polyline(line, width, color),
        }
    }
    layer
}

/// Sampled lines plus their baked layer.
pub struct LineField {
    lines: Vec<Vec<Vec2>>,
    layer: VectorState,
}

impl LineField {
    pub fn new(discs: &[Disc], count: usize, clip: &ClipPath, width: f32, color: VectorColor) -> Self {
        let lines = sample_lines(discs, count);
        let layer = bake(&lines, clip, width, color);
        log::debug!("line field baked: {} lines, {} vertices", lines.len(), layer.vertex_count());
        Self { lines, layer }
    }

    pub fn lines(&self) -> &[Vec<Vec2>] {
        &self.lines
    }

    pub fn layer(&self) -> &VectorState {
        &self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackhole::discs::DiscField;
    use tether_engine::{Ellipse, Rect};

    #[test]
    fn one_point_per_disc_per_line() {
        let field = DiscField::new(800.0, 600.0, 100);
        let lines = sample_lines(field.discs(), 100);
        assert_eq!(lines.len(), 100);
        assert!(lines.iter().all(|l| l.len() == 100));
        // angle 0 hits the right edge of the first disc
        let d0 = field.discs()[0].ellipse;
        assert_eq!(lines[0][0], Vec2::new(d0.center.x + d0.radii.x, d0.center.y));
    }

    #[test]
    fn entry_skips_the_first_point() {
        let clip = ClipPath::new().with_rect(Rect::from_origin_size(Vec2::ZERO, Vec2::splat(10.0)));
        let line = [Vec2::new(5.0, 5.0), Vec2::new(20.0, 5.0), Vec2::new(5.0, 6.0)];
        assert_eq!(entry_index(&line, &clip), Some(2));
        let outside = [Vec2::new(50.0, 5.0), Vec2::new(60.0, 5.0)];
        assert_eq!(entry_index(&outside, &clip), None);
    }

    #[test]
    fn clipping_removes_geometry_outside() {
        let line = vec![Vec2::new(-100.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)];
        let color = VectorColor::WHITE;
        let open = bake(&[line.clone()], &ClipPath::new(), 1.0, color);
        let clip = ClipPath::new().with_ellipse(Ellipse::new(Vec2::ZERO, Vec2::splat(10.0)));
        let clipped = bake(&[line], &clip, 1.0, color);
        assert!(open.vertex_count() > 0);
        assert!(clipped.vertex_count() > 0);
        let x_extent = |layer: &VectorState| {
            layer
                .as_slice()
                .chunks_exact(6)
                .map(|v| v[0])
                .fold(f32::MIN, f32::max)
        };
        assert!(x_extent(&open) > 99.0);
        assert!(x_extent(&clipped) < 12.0);
    }

    #[test]
    fn field_bakes_once_at_setup() {
        let field = DiscField::new(800.0, 600.0, 100);
        let lines = LineField::new(field.discs(), 100, &field.clip_path(), 1.0, VectorColor::WHITE);
        assert_eq!(lines.lines().len(), 100);
        assert!(lines.layer().vertex_count() > 0);
    }
}
