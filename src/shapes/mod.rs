pub mod circle;
pub mod rect;

pub use circle::Circle;
pub use rect::Rect;

/// Enum representing the geometric shape of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Box(Rect),
}

impl Shape {
    pub fn circle(radius: f64) -> Self {
        Shape::Circle(Circle::new(radius))
    }

    pub fn rect(half_width: f64, half_height: f64) -> Self {
        Shape::Box(Rect::new(half_width, half_height))
    }

    /// Dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        match self {
            Shape::Circle(c) => c.is_valid(),
            Shape::Box(r) => r.is_valid(),
        }
    }

    pub fn inertia(&self, mass: f64) -> f64 {
        match self {
            Shape::Circle(c) => c.inertia(mass),
            Shape::Box(r) => r.inertia(mass),
        }
    }
}
