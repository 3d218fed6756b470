use crate::math::vec2::Vec2;
use crate::objects::BodyId;

/// A single point of contact between two overlapping bodies.
///
/// Contacts are produced fresh each step by a detector and consumed by the
/// resolver within the same step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Unit normal pointing from body A towards body B.
    pub normal: Vec2,
    /// Penetration depth along `normal`. Always positive.
    pub depth: f64,
    /// World-space contact point.
    pub point: Vec2,
}

impl Contact {
    /// The same contact seen from the other body.
    pub fn flipped(self) -> Self {
        Contact {
            body_a: self.body_b,
            body_b: self.body_a,
            normal: -self.normal,
            ..self
        }
    }
}
