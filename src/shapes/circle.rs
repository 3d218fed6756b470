#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn is_valid(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0
    }

    /// Moment of inertia of a solid disc about its center.
    pub fn inertia(&self, mass: f64) -> f64 {
        0.5 * mass * self.radius * self.radius
    }
}
