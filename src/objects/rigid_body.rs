use std::fmt;

use crate::collision::AABB;
use crate::common::Material;
use crate::math::{Transform, Vec2};
use crate::shapes::Shape;

/// Stable handle of a body inside its [`World`](crate::world::World).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyId({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub id: BodyId,

    // Geometry
    pub shape: Shape,
    pub material: Material,

    // Primary state
    pub position: Vec2, // World position of the center of mass
    pub angle: f64,     // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Physical properties
    pub mass: f64,
    pub inv_mass: f64,    // 0.0 for static
    pub inertia: f64,     // f64::INFINITY for static
    pub inv_inertia: f64, // 0.0 for static

    // Where `reset` puts the body back
    pub origin_position: Vec2,
    pub origin_angle: f64,
}

impl RigidBody {
    /// Creates a body at rest at `position`. A mass of zero makes the body static.
    /// Inertia is derived from the shape. The position is recorded as the
    /// body's origin.
    pub fn new(id: BodyId, shape: Shape, position: Vec2, mass: f64, material: Material) -> Self {
        let (mass, inv_mass, inertia, inv_inertia) = if mass > 0.0 {
            let inertia = shape.inertia(mass);
            let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
            (mass, 1.0 / mass, inertia, inv_inertia)
        } else {
            (0.0, 0.0, f64::INFINITY, 0.0)
        };

        Self {
            id,
            shape,
            material,
            position,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            origin_position: position,
            origin_angle: 0.0,
        }
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn is_dynamic(&self) -> bool {
        !self.is_static()
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    /// World-space corners for box bodies, `None` for circles.
    pub fn world_vertices(&self) -> Option<[Vec2; 4]> {
        match &self.shape {
            Shape::Box(rect) => {
                let t = self.transform();
                Some(rect.local_vertices().map(|v| t.apply(v)))
            }
            Shape::Circle(_) => None,
        }
    }

    /// Calculates the world-space Axis-Aligned Bounding Box (AABB) for this body.
    pub fn calculate_aabb(&self) -> AABB {
        match &self.shape {
            Shape::Circle(circle) => {
                let radius_vec = Vec2::new(circle.radius, circle.radius);
                AABB::new(self.position - radius_vec, self.position + radius_vec)
            }
            Shape::Box(rect) => {
                // Extent of a rotated box along each world axis.
                let (sin_a, cos_a) = self.angle.sin_cos();
                let ex = rect.half_width * cos_a.abs() + rect.half_height * sin_a.abs();
                let ey = rect.half_width * sin_a.abs() + rect.half_height * cos_a.abs();
                let extent = Vec2::new(ex, ey);
                AABB::new(self.position - extent, self.position + extent)
            }
        }
    }

    /// Applies an impulse at offset `r` (contact point minus center of mass).
    /// Static bodies are left untouched.
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        if self.is_static() {
            return;
        }
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia;
    }

    /// Velocity of a material point at offset `r` from the center of mass.
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.linear_velocity + Vec2::cross_scalar(self.angular_velocity, r)
    }

    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static() {
            return 0.0;
        }
        0.5 * self.mass * self.linear_velocity.magnitude_squared()
            + 0.5 * self.inertia * self.angular_velocity * self.angular_velocity
    }

    /// Puts the body back where it was created, at rest.
    /// Scales the linear velocity down so its magnitude is at most `max_speed`.
    pub fn limit_speed(&mut self, max_speed: f64) {
        let speed_sq = self.linear_velocity.magnitude_squared();
        if speed_sq > max_speed * max_speed {
            self.linear_velocity = self.linear_velocity * (max_speed / speed_sq.sqrt());
        }
    }

    pub fn reset_to_origin(&mut self) {
        self.position = self.origin_position;
        self.angle = self.origin_angle;
        self.linear_velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }
}
