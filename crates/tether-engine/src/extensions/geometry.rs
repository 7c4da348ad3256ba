// extensions/geometry.rs
//
// Small 2D geometry helpers shared by simulation and drawing code.

use glam::Vec2;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector from `from` toward `to`, plus the raw distance.
///
/// The divisor is floored at `min_len`, so a point sitting on the target
/// yields a zero (or shortened) vector instead of NaN.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2, min_len: f32) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.length();
    (delta / dist.max(min_len), dist)
}

/// Axis-aligned ellipse: `center` plus half-width/half-height `radii`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ellipse {
    pub center: Vec2,
    pub radii: Vec2,
}

impl Ellipse {
    pub const fn new(center: Vec2, radii: Vec2) -> Self {
        Self { center, radii }
    }

    /// Point on the boundary at `angle` radians.
    #[inline]
    pub fn point_at(&self, angle: f32) -> Vec2 {
        Vec2::new(
            self.center.x + angle.cos() * self.radii.x,
            self.center.y + angle.sin() * self.radii.y,
        )
    }

    /// Lowest boundary y (screen coordinates grow downward).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.radii.y
    }

    /// Point-in-ellipse test, boundary inclusive. Degenerate ellipses contain nothing.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.radii.x <= 0.0 || self.radii.y <= 0.0 {
            return false;
        }
        let d = (p - self.center) / self.radii;
        d.length_squared() <= 1.0
    }

    /// Closed outline sampled at `samples` evenly spaced angles
    /// (first point repeated at the end).
    pub fn outline(&self, samples: usize) -> Vec<Vec2> {
        let samples = samples.max(3);
        let step = std::f32::consts::TAU / samples as f32;
        let mut points: Vec<Vec2> = (0..samples).map(|i| self.point_at(i as f32 * step)).collect();
        points.push(points[0]);
        points
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { min: origin, max: origin + size }
    }

    /// Containment test with inclusive bounds.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(b, a), 5.0);
    }

    #[test]
    fn direction_is_normalized() {
        let (dir, dist) = direction_to(Vec2::ZERO, Vec2::new(0.0, 100.0), 10.0);
        assert_eq!(dist, 100.0);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn direction_floor_avoids_nan() {
        let (dir, dist) = direction_to(Vec2::ONE, Vec2::ONE, 1.0);
        assert_eq!(dist, 0.0);
        assert_eq!(dir, Vec2::ZERO);
    }

    #[test]
    fn ellipse_containment() {
        let e = Ellipse::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 20.0));
        assert!(e.contains(Vec2::new(140.0, 100.0)));
        assert!(!e.contains(Vec2::new(100.0, 125.0)));
        assert_eq!(e.bottom(), 120.0);
    }

    #[test]
    fn degenerate_ellipse_contains_nothing() {
        let e = Ellipse::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert!(!e.contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn outline_is_closed() {
        let e = Ellipse::new(Vec2::ZERO, Vec2::new(2.0, 1.0));
        let pts = e.outline(16);
        assert_eq!(pts.len(), 17);
        assert_eq!(pts[0], pts[16]);
    }

    #[test]
    fn rect_bounds_are_inclusive() {
        let r = Rect::from_origin_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0));
        assert!(r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(10.1, 5.0)));
    }
}
