// extensions/clip.rs
//
// Geometric clip paths for CPU-side drawing.
// A path is the union of simple shapes; polylines are cut where they cross
// its boundary, so clipped output can go straight to the tessellator.

use glam::Vec2;
use super::geometry::{Ellipse, Rect};

/// Longest polyline step tested without subdivision.
const CLIP_STEP: f32 = 4.0;
/// Bisection rounds when locating a boundary crossing.
const BISECT_ROUNDS: u32 = 12;

/// One member of a clip path union.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipShape {
    Ellipse(Ellipse),
    Rect(Rect),
}

impl ClipShape {
    fn contains(&self, p: Vec2) -> bool {
        match self {
            ClipShape::Ellipse(e) => e.contains(p),
            ClipShape::Rect(r) => r.contains(p),
        }
    }
}

/// Union of shapes. An empty path contains nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPath {
    shapes: Vec<ClipShape>,
}

impl ClipPath {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    pub fn with_ellipse(mut self, ellipse: Ellipse) -> Self {
        self.shapes.push(ClipShape::Ellipse(ellipse));
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.shapes.push(ClipShape::Rect(rect));
        self
    }

    pub fn shapes(&self) -> &[ClipShape] {
        &self.shapes
    }

    /// True when any member shape contains `p`.
    pub fn contains(&self, p: Vec2) -> bool {
        self.shapes.iter().any(|s| s.contains(p))
    }

    /// Cut a polyline into the runs that lie inside the path.
    /// Runs shorter than two points are dropped.
    pub fn clip_polyline(&self, points: &[Vec2]) -> Vec<Vec<Vec2>> {
        let mut runs = Vec::new();
        let Some(&first) = points.first() else {
            return runs;
        };

        let mut current: Vec<Vec2> = Vec::new();
        let mut prev = first;
        let mut prev_in = self.contains(prev);
        if prev_in {
            current.push(prev);
        }

        for &next in &points[1..] {
            let seg_start = prev;
            let steps = ((next - seg_start).length() / CLIP_STEP).ceil().max(1.0) as usize;
            for s in 1..=steps {
                let q = seg_start.lerp(next, s as f32 / steps as f32);
                let q_in = self.contains(q);
                match (prev_in, q_in) {
                    (false, true) => current.push(self.crossing(q, prev)),
                    (true, false) => {
                        current.push(self.crossing(prev, q));
                        runs.push(std::mem::take(&mut current));
                    }
                    _ => {}
                }
                prev = q;
                prev_in = q_in;
            }
            if prev_in {
                current.push(next);
            }
        }

        runs.push(current);
        runs.retain(|run| run.len() >= 2);
        runs
    }

    /// Boundary point between an inside and an outside point.
    fn crossing(&self, inside: Vec2, outside: Vec2) -> Vec2 {
        let (mut lo, mut hi) = (inside, outside);
        for _ in 0..BISECT_ROUNDS {
            let mid = (lo + hi) * 0.5;
            if self.contains(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc_path() -> ClipPath {
        // Ellipse plus the rect covering everything above its center.
        let e = Ellipse::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 20.0));
        ClipPath::new()
            .with_ellipse(e)
            .with_rect(Rect::from_origin_size(Vec2::new(50.0, 0.0), Vec2::new(100.0, 100.0)))
    }

    #[test]
    fn union_containment() {
        let path = disc_path();
        assert!(path.contains(Vec2::new(100.0, 10.0))); // rect
        assert!(path.contains(Vec2::new(100.0, 115.0))); // ellipse lower half
        assert!(!path.contains(Vec2::new(100.0, 130.0)));
        assert!(!path.contains(Vec2::new(10.0, 10.0)));
        assert!(!ClipPath::new().contains(Vec2::ZERO));
    }

    #[test]
    fn fully_inside_polyline_is_one_run() {
        let path = disc_path();
        let pts = [Vec2::new(80.0, 10.0), Vec2::new(90.0, 50.0), Vec2::new(100.0, 90.0)];
        let runs = path.clip_polyline(&pts);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], pts.to_vec());
    }

    #[test]
    fn fully_outside_polyline_is_dropped() {
        let path = disc_path();
        let runs = path.clip_polyline(&[Vec2::new(0.0, 200.0), Vec2::new(300.0, 200.0)]);
        assert!(runs.is_empty());
    }

    #[test]
    fn crossing_segment_is_cut_at_boundary() {
        let path = disc_path();
        // Vertical line leaving the ellipse bottom at y = 120.
        let runs = path.clip_polyline(&[Vec2::new(100.0, 90.0), Vec2::new(100.0, 160.0)]);
        assert_eq!(runs.len(), 1);
        let end = *runs[0].last().unwrap();
        assert!((end.y - 120.0).abs() < 0.1, "cut at {}", end.y);
    }

    #[test]
    fn chord_through_shape_is_found() {
        let path = disc_path();
        // Both endpoints outside, middle passes through the ellipse.
        let runs = path.clip_polyline(&[Vec2::new(0.0, 110.0), Vec2::new(200.0, 110.0)]);
        assert_eq!(runs.len(), 1);
        let run = &runs[0];
        assert!(run[0].x > 50.0 && run[run.len() - 1].x < 150.0);
    }
}
