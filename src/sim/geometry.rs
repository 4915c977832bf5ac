//! Collision shapes
//!
//! The bird is drawn as a circle but collides as the axis-aligned square that
//! bounds it. Pipes are pairs of axis-aligned rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle (render shape of the bird)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square of side `2 * half` centered on `center`
    pub fn centered_square(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            size: Vec2::splat(half * 2.0),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap test on both axes. Shared edges count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x <= b_max.x
            && other.min.x <= a_max.x
            && self.min.y <= b_max.y
            && other.min.y <= a_max.y
    }
}

/// Bird shape for one tick: circle for drawing, square for collisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdShape {
    pub circle: Circle,
    pub bounds: Rect,
}

impl BirdShape {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            circle: Circle { center, radius },
            bounds: Rect::centered_square(center, radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_edge_counts() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 5.0, 5.0);
        let below = Rect::new(0.0, 10.0, 5.0, 5.0);
        assert!(a.intersects(&right));
        assert!(a.intersects(&below));
        // Corner contact
        assert!(a.intersects(&Rect::new(10.0, 10.0, 1.0, 1.0)));
    }

    #[test]
    fn test_separated_on_one_axis_misses() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.5, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(0.0, -6.0, 5.0, 5.5)));
    }

    #[test]
    fn test_bird_bounds_square() {
        let shape = BirdShape::new(Vec2::new(100.0, 300.0), 15.0);
        assert_eq!(shape.bounds.min, Vec2::new(85.0, 285.0));
        assert_eq!(shape.bounds.size, Vec2::new(30.0, 30.0));
        assert_eq!(shape.circle.radius, 15.0);
    }
}
