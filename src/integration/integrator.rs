use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Advances body state through time. Split in two halves so the world can
/// resolve contacts between the velocity and the position update.
pub trait Integrator {
    /// Applies gravity to the velocity of a dynamic body.
    fn integrate_velocity(&self, body: &mut RigidBody, gravity: Vec2, dt: f64);

    /// Moves a dynamic body along its current velocities.
    fn integrate_position(&self, body: &mut RigidBody, dt: f64);
}

/// Semi-Implicit (symplectic) Euler: velocity first, then position using the
/// updated velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn integrate_velocity(&self, body: &mut RigidBody, gravity: Vec2, dt: f64) {
        if body.is_static() {
            // Static object, do not integrate
            return;
        }
        // v = v + g*dt
        body.linear_velocity += gravity * dt;
    }

    fn integrate_position(&self, body: &mut RigidBody, dt: f64) {
        if body.is_static() {
            return;
        }
        // p = p + v*dt
        body.position += body.linear_velocity * dt;
        // theta = theta + omega*dt, kept within [-PI, PI]
        body.angle = wrap_angle(body.angle + body.angular_velocity * dt);
    }
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Material;
    use crate::objects::BodyId;
    use crate::shapes::Shape;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn test_body(mass: f64) -> RigidBody {
        RigidBody::new(BodyId(0), Shape::circle(1.0), Vec2::ZERO, mass, Material::default())
    }

    #[test]
    fn test_integrate_linear_motion_no_gravity() {
        let mut rb = test_body(1.0);
        rb.linear_velocity = Vec2::new(10.0, -5.0);
        let dt = 0.1;

        SemiImplicitEuler.integrate_velocity(&mut rb, Vec2::ZERO, dt);
        SemiImplicitEuler.integrate_position(&mut rb, dt);

        assert!((rb.position.x - 1.0).abs() < EPSILON);
        assert!((rb.position.y - -0.5).abs() < EPSILON);
        assert_eq!(rb.linear_velocity, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_integrate_uses_updated_velocity() {
        let mut rb = test_body(2.0);
        let dt = 0.1;

        SemiImplicitEuler.integrate_velocity(&mut rb, Vec2::new(0.0, -10.0), dt);
        SemiImplicitEuler.integrate_position(&mut rb, dt);

        // v = 0 + (-10)*0.1 = -1; p = 0 + (-1)*0.1 = -0.1, independent of mass
        assert!((rb.linear_velocity.y - -1.0).abs() < EPSILON);
        assert!((rb.position.y - -0.1).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_angular_motion() {
        let mut rb = test_body(1.0);
        rb.angular_velocity = 2.0;

        SemiImplicitEuler.integrate_position(&mut rb, 0.1);

        assert!((rb.angle - 0.2).abs() < EPSILON);
        assert!((rb.angular_velocity - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_static_object() {
        let mut rb = test_body(0.0);
        rb.position = Vec2::new(1.0, 1.0);
        rb.angle = 1.0;
        rb.linear_velocity = Vec2::new(1.0, 1.0);
        rb.angular_velocity = 1.0;

        let initial_state = rb.clone();
        SemiImplicitEuler.integrate_velocity(&mut rb, Vec2::new(0.0, -9.81), 0.1);
        SemiImplicitEuler.integrate_position(&mut rb, 0.1);

        assert_eq!(rb, initial_state);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0) - 0.0).abs() < EPSILON);
        assert!((wrap_angle(PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!((wrap_angle(2.0 * PI) - 0.0).abs() < EPSILON);
    }
}
