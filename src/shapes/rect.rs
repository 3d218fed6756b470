use crate::math::vec2::Vec2;

/// An oriented box described by its half extents in body-local space.
/// The box is centered on the body's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub half_width: f64,
    pub half_height: f64,
}

impl Rect {
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self { half_width, half_height }
    }

    pub fn is_valid(&self) -> bool {
        self.half_width.is_finite()
            && self.half_height.is_finite()
            && self.half_width > 0.0
            && self.half_height > 0.0
    }

    /// Local-space corners in counter-clockwise order, starting bottom-left.
    pub fn local_vertices(&self) -> [Vec2; 4] {
        let (hw, hh) = (self.half_width, self.half_height);
        [
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ]
    }

    /// Moment of inertia of a solid rectangle about its center: m(w² + h²)/12.
    pub fn inertia(&self, mass: f64) -> f64 {
        let w = 2.0 * self.half_width;
        let h = 2.0 * self.half_height;
        mass * (w * w + h * h) / 12.0
    }

    /// Clamps a local-space point onto the box's closed extent.
    pub fn clamp_local(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(-self.half_width, self.half_width),
            point.y.clamp(-self.half_height, self.half_height),
        )
    }

    /// True if a local-space point lies inside the box grown by `tolerance`.
    pub fn contains_local(&self, point: Vec2, tolerance: f64) -> bool {
        point.x.abs() <= self.half_width + tolerance && point.y.abs() <= self.half_height + tolerance
    }
}
