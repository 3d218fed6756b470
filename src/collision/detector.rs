use log::trace;

use super::detection::check_collision;
use super::manifold::Contact;
use crate::objects::rigid_body::RigidBody;

/// Finds the contacts between a set of bodies.
pub trait Detector {
    /// Returns every contact among `bodies`. The output order must be a pure
    /// function of the input order.
    fn detect(&self, bodies: &[RigidBody]) -> Vec<Contact>;
}

/// All-pairs broad-phase with an AABB early-out, followed by the exact
/// shape tests. Fine for a chess set's worth of bodies.
#[derive(Debug, Clone, Copy)]
pub struct PairwiseDetector {
    pub epsilon: f64,
}

impl PairwiseDetector {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl Default for PairwiseDetector {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

impl Detector for PairwiseDetector {
    fn detect(&self, bodies: &[RigidBody]) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let aabbs: Vec<_> = bodies.iter().map(RigidBody::calculate_aabb).collect();

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (body_a, body_b) = (&bodies[i], &bodies[j]);
                if body_a.is_static() && body_b.is_static() {
                    continue;
                }
                if !aabbs[i].overlaps(&aabbs[j]) {
                    continue;
                }
                if let Some(contact) = check_collision(body_a, body_b, self.epsilon) {
                    trace!(
                        "contact {} -> {}: normal=({:.3}, {:.3}) depth={:.4}",
                        contact.body_a,
                        contact.body_b,
                        contact.normal.x,
                        contact.normal.y,
                        contact.depth
                    );
                    contacts.push(contact);
                }
            }
        }
        contacts
    }
}
