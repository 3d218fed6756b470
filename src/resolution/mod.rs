use crate::collision::Contact;
use crate::objects::rigid_body::RigidBody;

pub mod impulse;

pub use impulse::ImpulseResolver;

/// Turns a contact into velocity and position changes on the two bodies.
///
/// Implementations must never change a static body.
pub trait Resolver {
    /// Applies the normal (restitution) and tangent (friction) impulses.
    fn resolve_velocity(&self, contact: &Contact, body_a: &mut RigidBody, body_b: &mut RigidBody);

    /// Pushes the bodies apart to remove penetration.
    fn correct_position(&self, contact: &Contact, body_a: &mut RigidBody, body_b: &mut RigidBody);

    /// Full single-pass resolution of one contact.
    fn resolve(&self, contact: &Contact, body_a: &mut RigidBody, body_b: &mut RigidBody) {
        self.resolve_velocity(contact, body_a, body_b);
        self.correct_position(contact, body_a, body_b);
    }
}
