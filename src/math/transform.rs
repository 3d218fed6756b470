use super::vec2::Vec2;

/// Position and orientation of a body, as handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Angle in radians.
    pub angle: f64,
}

impl Transform {
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self { position, angle }
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Maps a body-local point into world space (rotate, then translate).
    pub fn apply(self, local: Vec2) -> Vec2 {
        local.rotate(self.angle) + self.position
    }

    /// Maps a world-space point into body-local space.
    pub fn apply_inverse(self, world: Vec2) -> Vec2 {
        (world - self.position).rotate(-self.angle)
    }

    /// Rotates a direction into world space without translating it.
    pub fn apply_direction(self, local_dir: Vec2) -> Vec2 {
        local_dir.rotate(self.angle)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
