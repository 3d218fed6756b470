// Defines an Axis-Aligned Bounding Box

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB, swapping coordinates as needed so that min <= max.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Strict overlap test: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_new_orders_corners() {
        let b = AABB::new(Vec2::new(2.0, -1.0), Vec2::new(0.0, 3.0));
        assert_eq!(b.min, Vec2::new(0.0, -1.0));
        assert_eq!(b.max, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = AABB::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let touching = AABB::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let overlapping = AABB::new(Vec2::new(0.5, 0.5), Vec2::new(2.0, 2.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }
}
