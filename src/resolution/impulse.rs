use log::trace;

use super::Resolver;
use crate::collision::Contact;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Sequential-impulse contact response with Coulomb friction and
/// linear positional correction.
#[derive(Debug, Clone, Copy)]
pub struct ImpulseResolver {
    /// Fraction of the penetration removed per correction pass.
    pub correction_percent: f64,
    /// Penetration left alone so resting contacts stay in contact.
    pub correction_slop: f64,
}

impl ImpulseResolver {
    pub const DEFAULT_CORRECTION_PERCENT: f64 = 0.2;
    pub const DEFAULT_CORRECTION_SLOP: f64 = 0.01;

    pub fn new(correction_percent: f64, correction_slop: f64) -> Self {
        Self {
            correction_percent,
            correction_slop,
        }
    }
}

impl Default for ImpulseResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CORRECTION_PERCENT, Self::DEFAULT_CORRECTION_SLOP)
    }
}

/// Inverse effective mass of the pair along `direction` at the given offsets.
fn effective_inv_mass(a: &RigidBody, b: &RigidBody, ra: Vec2, rb: Vec2, direction: Vec2) -> f64 {
    let ra_d = ra.cross(direction);
    let rb_d = rb.cross(direction);
    a.inv_mass + b.inv_mass + ra_d * ra_d * a.inv_inertia + rb_d * rb_d * b.inv_inertia
}

impl Resolver for ImpulseResolver {
    fn resolve_velocity(&self, contact: &Contact, body_a: &mut RigidBody, body_b: &mut RigidBody) {
        let normal = contact.normal;
        let r_a = contact.point - body_a.position;
        let r_b = contact.point - body_b.position;

        let relative_velocity = body_b.velocity_at(r_b) - body_a.velocity_at(r_a);
        let relative_velocity_normal = relative_velocity.dot(normal);

        // Already separating
        if relative_velocity_normal > 0.0 {
            return;
        }

        let inv_mass_normal = effective_inv_mass(body_a, body_b, r_a, r_b, normal);
        if inv_mass_normal <= 0.0 {
            return;
        }

        let e = body_a.material.combined_restitution(&body_b.material);
        let j = -(1.0 + e) * relative_velocity_normal / inv_mass_normal;
        let impulse = normal * j;
        body_a.apply_impulse(-impulse, r_a);
        body_b.apply_impulse(impulse, r_b);

        trace!(
            "impulse {} <-> {}: vn={:.4} e={:.2} j={:.4}",
            contact.body_a,
            contact.body_b,
            relative_velocity_normal,
            e,
            j
        );

        // Friction along the tangent, using the post-impulse velocities.
        let relative_velocity = body_b.velocity_at(r_b) - body_a.velocity_at(r_a);
        let tangent_velocity = relative_velocity - normal * relative_velocity.dot(normal);
        if tangent_velocity.magnitude_squared() < 1e-18 {
            return;
        }
        let tangent = tangent_velocity.normalize();

        let inv_mass_tangent = effective_inv_mass(body_a, body_b, r_a, r_b, tangent);
        if inv_mass_tangent <= 0.0 {
            return;
        }

        let mu = body_a.material.combined_friction(&body_b.material);
        let max_friction = mu * j.abs();
        let jt = (-relative_velocity.dot(tangent) / inv_mass_tangent).clamp(-max_friction, max_friction);
        let friction_impulse = tangent * jt;
        body_a.apply_impulse(-friction_impulse, r_a);
        body_b.apply_impulse(friction_impulse, r_b);
    }

    fn correct_position(&self, contact: &Contact, body_a: &mut RigidBody, body_b: &mut RigidBody) {
        let correction_magnitude = (contact.depth - self.correction_slop).max(0.0);
        if correction_magnitude < 1e-9 {
            return;
        }

        let total_inv_mass = body_a.inv_mass + body_b.inv_mass;
        if total_inv_mass < 1e-12 {
            return;
        }

        let correction = contact.normal * (correction_magnitude / total_inv_mass * self.correction_percent);
        if body_a.is_dynamic() {
            body_a.position -= correction * body_a.inv_mass;
        }
        if body_b.is_dynamic() {
            body_b.position += correction * body_b.inv_mass;
        }
    }
}
