use log::debug;

use crate::collision::{Contact, Detector, PairwiseDetector};
use crate::common::{Material, PhysicsError, Result, WorldConfig};
use crate::integration::{Integrator, SemiImplicitEuler};
use crate::math::{Transform, Vec2};
use crate::objects::rigid_body::{BodyId, RigidBody};
use crate::resolution::{ImpulseResolver, Resolver};
use crate::shapes::Shape;

/// Owns every body and advances them through fixed steps.
///
/// Bodies are never removed, so a [`BodyId`] is also the body's index.
pub struct World {
    bodies: Vec<RigidBody>,
    detector: Box<dyn Detector>,
    resolver: Box<dyn Resolver>,
    integrator: Box<dyn Integrator>,
    pub gravity: Vec2,
    /// Nominal fixed step, used by callers that drive the world in real time.
    pub timestep: f64,
    /// Velocity-impulse passes over the contact list per step.
    pub solver_iterations: usize,
    /// Farthest a body may move in one step.
    pub max_translation: f64,
    elapsed: f64,
    step_count: u64,
    last_contact_count: usize,
}

impl World {
    /// Creates a new, empty world with default settings.
    pub fn new() -> Self {
        let config = WorldConfig::default();
        Self::assemble(
            &config,
            Box::new(PairwiseDetector::new(config.contact_epsilon)),
            Box::new(ImpulseResolver::new(config.correction_percent, config.correction_slop)),
            Box::new(SemiImplicitEuler),
        )
    }

    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        Self::with_components(
            config,
            Box::new(PairwiseDetector::new(config.contact_epsilon)),
            Box::new(ImpulseResolver::new(config.correction_percent, config.correction_slop)),
            Box::new(SemiImplicitEuler),
        )
    }

    /// Builds a world around caller-supplied pipeline stages.
    pub fn with_components(
        config: &WorldConfig,
        detector: Box<dyn Detector>,
        resolver: Box<dyn Resolver>,
        integrator: Box<dyn Integrator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, detector, resolver, integrator))
    }

    fn assemble(
        config: &WorldConfig,
        detector: Box<dyn Detector>,
        resolver: Box<dyn Resolver>,
        integrator: Box<dyn Integrator>,
    ) -> Self {
        Self {
            bodies: Vec::new(),
            detector,
            resolver,
            integrator,
            gravity: config.gravity,
            timestep: config.timestep,
            solver_iterations: config.solver_iterations,
            max_translation: config.max_translation,
            elapsed: 0.0,
            step_count: 0,
            last_contact_count: 0,
        }
    }

    /// Adds a body at rest and returns its id. A mass of zero makes it static.
    /// Restitution and friction are clamped to [0, 1].
    pub fn create_body(
        &mut self,
        shape: Shape,
        position: Vec2,
        mass: f64,
        restitution: f64,
        friction: f64,
    ) -> Result<BodyId> {
        if !shape.is_valid() {
            return Err(PhysicsError::InvalidShape);
        }
        if !(mass.is_finite() && mass >= 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        if !position.is_finite() {
            return Err(PhysicsError::InvalidPosition);
        }

        let id = BodyId(self.bodies.len() as u32);
        let material = Material::new(restitution, friction);
        self.bodies.push(RigidBody::new(id, shape, position, mass, material));
        Ok(id)
    }

    /// Advances the simulation by one time step `dt`.
    ///
    /// Order: gravity into velocities, contact detection, velocity impulses
    /// (`solver_iterations` passes), positional correction, then positions.
    /// Linear speed is capped at `max_translation / dt` so a fast body cannot
    /// skip across a wall in one step. An invalid `dt` leaves the world untouched.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidTimestep(dt));
        }

        // 1. Gravity
        for body in self.bodies.iter_mut() {
            self.integrator.integrate_velocity(body, self.gravity, dt);
        }

        // 2. Collision detection
        let contacts = self.detector.detect(&self.bodies);

        // 3. Solve collisions (impulses)
        for _ in 0..self.solver_iterations {
            for contact in &contacts {
                if let Some((body_a, body_b)) = body_pair_mut(&mut self.bodies, contact) {
                    self.resolver.resolve_velocity(contact, body_a, body_b);
                }
            }
        }

        // 4. Positional correction (to prevent sinking)
        for contact in &contacts {
            if let Some((body_a, body_b)) = body_pair_mut(&mut self.bodies, contact) {
                self.resolver.correct_position(contact, body_a, body_b);
            }
        }

        // 5. Positions and angles, never more than max_translation per step
        let max_speed = self.max_translation / dt;
        for body in self.bodies.iter_mut() {
            body.limit_speed(max_speed);
            self.integrator.integrate_position(body, dt);
        }

        self.elapsed += dt;
        self.step_count += 1;
        self.last_contact_count = contacts.len();
        debug!(
            "step {} (t={:.4}): {} bodies, {} contacts",
            self.step_count,
            self.elapsed,
            self.bodies.len(),
            contacts.len()
        );
        Ok(())
    }

    pub fn body(&self, id: BodyId) -> Result<&RigidBody> {
        self.bodies.get(id.0 as usize).ok_or(PhysicsError::UnknownBody(id))
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Direct access for the shake controller and the board loader.
    pub(crate) fn bodies_mut(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }

    pub fn transform(&self, id: BodyId) -> Result<Transform> {
        self.body(id).map(RigidBody::transform)
    }

    /// Overwrites the velocities of a dynamic body.
    pub fn set_velocity(&mut self, id: BodyId, linear: Vec2, angular: f64) -> Result<()> {
        if !(linear.is_finite() && angular.is_finite()) {
            return Err(PhysicsError::InvalidVelocity);
        }
        let body = self.dynamic_body_mut(id)?;
        body.linear_velocity = linear;
        body.angular_velocity = angular;
        Ok(())
    }

    /// Applies an impulse at offset `r` from the body's center of mass.
    pub fn apply_impulse(&mut self, id: BodyId, impulse: Vec2, r: Vec2) -> Result<()> {
        if !(impulse.is_finite() && r.is_finite()) {
            return Err(PhysicsError::InvalidVelocity);
        }
        self.dynamic_body_mut(id)?.apply_impulse(impulse, r);
        Ok(())
    }

    fn dynamic_body_mut(&mut self, id: BodyId) -> Result<&mut RigidBody> {
        let body = self
            .bodies
            .get_mut(id.0 as usize)
            .ok_or(PhysicsError::UnknownBody(id))?;
        if body.is_static() {
            return Err(PhysicsError::StaticBodyMutation(id));
        }
        Ok(body)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(RigidBody::kinetic_energy).sum()
    }

    /// Simulated seconds since creation.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Number of contacts found during the most recent step.
    pub fn last_contact_count(&self) -> usize {
        self.last_contact_count
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable references to both bodies of a contact, using `split_at_mut` to
/// satisfy the borrow checker. `None` for self-contacts or stale ids.
fn body_pair_mut<'a>(
    bodies: &'a mut [RigidBody],
    contact: &Contact,
) -> Option<(&'a mut RigidBody, &'a mut RigidBody)> {
    let (i, j) = (contact.body_a.0 as usize, contact.body_b.0 as usize);
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn zero_gravity_world() -> World {
        let mut world = World::new();
        world.gravity = Vec2::ZERO;
        world
    }

    #[test]
    fn test_world_new() {
        let world = World::new();
        assert!(world.bodies().is_empty());
        assert_eq!(world.gravity, Vec2::new(0.0, -9.81));
        assert_eq!(world.solver_iterations, 10);
        assert_eq!(world.elapsed(), 0.0);
        assert_eq!(world.step_count(), 0);
    }

    #[test]
    fn test_create_body_assigns_sequential_ids() {
        let mut world = World::new();
        let a = world.create_body(Shape::circle(1.0), Vec2::ZERO, 1.0, 0.2, 0.5).unwrap();
        let b = world.create_body(Shape::rect(1.0, 1.0), Vec2::new(3.0, 0.0), 0.0, 0.2, 0.5).unwrap();
        assert_eq!(a, BodyId(0));
        assert_eq!(b, BodyId(1));
        assert_eq!(world.bodies().len(), 2);
        assert!(world.body(b).unwrap().is_static());
        assert_eq!(world.body(a).unwrap().origin_position, Vec2::ZERO);
    }

    #[test]
    fn test_create_body_rejects_bad_input() {
        let mut world = World::new();
        assert_eq!(
            world.create_body(Shape::circle(-1.0), Vec2::ZERO, 1.0, 0.2, 0.5),
            Err(PhysicsError::InvalidShape)
        );
        assert_eq!(
            world.create_body(Shape::rect(1.0, 0.0), Vec2::ZERO, 1.0, 0.2, 0.5),
            Err(PhysicsError::InvalidShape)
        );
        assert_eq!(
            world.create_body(Shape::circle(1.0), Vec2::ZERO, -2.0, 0.2, 0.5),
            Err(PhysicsError::InvalidMass(-2.0))
        );
        assert!(matches!(
            world.create_body(Shape::circle(1.0), Vec2::ZERO, f64::NAN, 0.2, 0.5),
            Err(PhysicsError::InvalidMass(_))
        ));
        assert_eq!(
            world.create_body(Shape::circle(1.0), Vec2::new(f64::INFINITY, 0.0), 1.0, 0.2, 0.5),
            Err(PhysicsError::InvalidPosition)
        );
        assert!(world.bodies().is_empty());
    }

    #[test]
    fn test_create_body_clamps_material() {
        let mut world = World::new();
        let id = world.create_body(Shape::circle(1.0), Vec2::ZERO, 1.0, 3.0, -1.0).unwrap();
        let material = world.body(id).unwrap().material;
        assert_eq!(material.restitution, 1.0);
        assert_eq!(material.friction, 0.0);
    }

    #[test]
    fn test_step_gravity() {
        let mut world = World::new();
        world.gravity = Vec2::new(0.0, -10.0);
        let id = world.create_body(Shape::circle(1.0), Vec2::ZERO, 1.0, 0.2, 0.5).unwrap();

        world.step(0.1).unwrap();

        let body = world.body(id).unwrap();
        assert!((body.linear_velocity.x - 0.0).abs() < EPSILON);
        assert!((body.linear_velocity.y - -1.0).abs() < EPSILON);
        assert!((body.position.x - 0.0).abs() < EPSILON);
        assert!((body.position.y - -0.1).abs() < EPSILON);
        assert!((world.elapsed() - 0.1).abs() < EPSILON);
        assert_eq!(world.step_count(), 1);
    }

    #[test]
    fn test_step_no_gravity_on_static() {
        let mut world = World::new();
        world.gravity = Vec2::new(0.0, -10.0);
        let id = world.create_body(Shape::circle(1.0), Vec2::new(2.0, 3.0), 0.0, 0.2, 0.5).unwrap();
        let initial_state = world.body(id).unwrap().clone();

        for _ in 0..50 {
            world.step(0.1).unwrap();
        }
        assert_eq!(world.body(id).unwrap(), &initial_state);
    }

    #[test]
    fn test_step_rejects_invalid_timestep() {
        let mut world = World::new();
        world.create_body(Shape::circle(1.0), Vec2::ZERO, 1.0, 0.2, 0.5).unwrap();
        let before = world.bodies().to_vec();

        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = world.step(dt).unwrap_err();
            assert!(matches!(err, PhysicsError::InvalidTimestep(_)));
        }
        assert_eq!(world.bodies(), before.as_slice());
        assert_eq!(world.elapsed(), 0.0);
        assert_eq!(world.step_count(), 0);
    }

    #[test]
    fn test_unknown_body() {
        let mut world = World::new();
        world.create_body(Shape::circle(1.0), Vec2::ZERO, 1.0, 0.2, 0.5).unwrap();
        assert_eq!(
            world.transform(BodyId(5)),
            Err(PhysicsError::UnknownBody(BodyId(5)))
        );
        assert_eq!(
            world.set_velocity(BodyId(5), Vec2::ZERO, 0.0),
            Err(PhysicsError::UnknownBody(BodyId(5)))
        );
    }

    #[test]
    fn test_static_body_motion_is_rejected() {
        let mut world = World::new();
        let wall = world.create_body(Shape::rect(1.0, 1.0), Vec2::ZERO, 0.0, 0.2, 0.5).unwrap();
        let err = world.set_velocity(wall, Vec2::new(1.0, 0.0), 0.0).unwrap_err();
        assert_eq!(err, PhysicsError::StaticBodyMutation(wall));
        assert_eq!(err.kind(), crate::common::ErrorKind::InvariantViolation);
        assert!(world.apply_impulse(wall, Vec2::new(1.0, 0.0), Vec2::ZERO).is_err());
        assert_eq!(world.body(wall).unwrap().linear_velocity, Vec2::ZERO);
    }

    #[test]
    fn test_set_velocity_and_impulse() {
        let mut world = zero_gravity_world();
        let id = world.create_body(Shape::circle(1.0), Vec2::ZERO, 2.0, 0.2, 0.5).unwrap();
        world.set_velocity(id, Vec2::new(1.0, 0.0), 0.5).unwrap();
        world.apply_impulse(id, Vec2::new(0.0, 4.0), Vec2::ZERO).unwrap();

        let body = world.body(id).unwrap();
        assert_eq!(body.linear_velocity, Vec2::new(1.0, 2.0));
        assert_eq!(body.angular_velocity, 0.5);
        assert_eq!(
            world.set_velocity(id, Vec2::new(f64::NAN, 0.0), 0.0),
            Err(PhysicsError::InvalidVelocity)
        );
    }

    #[test]
    fn test_transform_snapshot() {
        let mut world = zero_gravity_world();
        let id = world.create_body(Shape::rect(0.5, 0.5), Vec2::new(1.0, 2.0), 1.0, 0.2, 0.5).unwrap();
        world.set_velocity(id, Vec2::new(1.0, 0.0), 1.0).unwrap();
        world.step(0.2).unwrap();

        let t = world.transform(id).unwrap();
        assert!((t.position - Vec2::new(1.2, 2.0)).magnitude() < EPSILON);
        assert!((t.angle - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_step_caps_translation() {
        let mut world = zero_gravity_world();
        let id = world.create_body(Shape::circle(0.3), Vec2::ZERO, 1.0, 0.2, 0.5).unwrap();
        world.set_velocity(id, Vec2::new(0.0, 300.0), 0.0).unwrap();

        world.step(0.01).unwrap();

        let body = world.body(id).unwrap();
        assert!((body.position.y - world.max_translation).abs() < EPSILON);
        assert!((body.linear_velocity.y - world.max_translation / 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_from_config_validates() {
        let bad_gravity = WorldConfig {
            gravity: Vec2::new(f64::NAN, 0.0),
            ..WorldConfig::default()
        };
        assert!(matches!(World::from_config(&bad_gravity), Err(PhysicsError::InvalidConfig(_))));
        let no_iterations = WorldConfig {
            solver_iterations: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(World::from_config(&no_iterations), Err(PhysicsError::InvalidConfig(_))));
        assert!(World::from_config(&WorldConfig::default()).is_ok());
    }

    #[test]
    fn test_head_on_equal_circles_swap_velocities() {
        let mut world = zero_gravity_world();
        let a = world.create_body(Shape::circle(1.0), Vec2::new(-0.99, 0.0), 1.0, 1.0, 0.0).unwrap();
        let b = world.create_body(Shape::circle(1.0), Vec2::new(0.99, 0.0), 1.0, 1.0, 0.0).unwrap();
        world.set_velocity(a, Vec2::new(5.0, 0.0), 0.0).unwrap();
        world.set_velocity(b, Vec2::new(-5.0, 0.0), 0.0).unwrap();

        world.step(1.0 / 60.0).unwrap();

        assert_eq!(world.last_contact_count(), 1);
        let (va, vb) = (world.body(a).unwrap().linear_velocity, world.body(b).unwrap().linear_velocity);
        assert!((va - Vec2::new(-5.0, 0.0)).magnitude() < EPSILON);
        assert!((vb - Vec2::new(5.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_energy_does_not_increase() {
        let mut world = zero_gravity_world();
        let a = world.create_body(Shape::circle(0.5), Vec2::new(-2.0, 0.0), 1.0, 0.5, 0.3).unwrap();
        let b = world.create_body(Shape::circle(0.5), Vec2::new(2.0, 0.1), 1.0, 0.5, 0.3).unwrap();
        world.set_velocity(a, Vec2::new(3.0, 0.0), 0.0).unwrap();
        world.set_velocity(b, Vec2::new(-3.0, 0.0), 0.0).unwrap();

        let initial = world.kinetic_energy();
        let mut previous = initial;
        for _ in 0..120 {
            world.step(1.0 / 60.0).unwrap();
            let energy = world.kinetic_energy();
            assert!(energy <= previous + 1e-9, "energy rose from {previous} to {energy}");
            previous = energy;
        }
        assert!(previous < initial);
    }

    #[test]
    fn test_ball_rests_on_static_floor() {
        let mut world = World::new();
        world.create_body(Shape::rect(5.0, 0.5), Vec2::ZERO, 0.0, 0.2, 0.5).unwrap();
        let ball = world.create_body(Shape::circle(0.5), Vec2::new(0.0, 1.0), 1.0, 0.2, 0.5).unwrap();

        for _ in 0..120 {
            world.step(1.0 / 60.0).unwrap();
        }

        let y = world.body(ball).unwrap().position.y;
        assert!(y > 0.9 && y < 1.05, "ball at y={y}");
    }

    struct NoContacts;

    impl Detector for NoContacts {
        fn detect(&self, _bodies: &[RigidBody]) -> Vec<Contact> {
            Vec::new()
        }
    }

    #[test]
    fn test_custom_detector_is_used() {
        let config = WorldConfig {
            gravity: Vec2::ZERO,
            ..WorldConfig::default()
        };
        let mut world = World::with_components(
            &config,
            Box::new(NoContacts),
            Box::new(ImpulseResolver::default()),
            Box::new(SemiImplicitEuler),
        )
        .unwrap();
        let a = world.create_body(Shape::circle(1.0), Vec2::ZERO, 1.0, 0.2, 0.5).unwrap();
        world.create_body(Shape::circle(1.0), Vec2::new(0.5, 0.0), 1.0, 0.2, 0.5).unwrap();

        world.step(0.1).unwrap();
        assert_eq!(world.last_contact_count(), 0);
        assert_eq!(world.body(a).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_body_pair_mut_either_order() {
        let mut bodies = vec![
            RigidBody::new(BodyId(0), Shape::circle(1.0), Vec2::ZERO, 1.0, Material::default()),
            RigidBody::new(BodyId(1), Shape::circle(1.0), Vec2::new(1.0, 0.0), 1.0, Material::default()),
        ];
        let contact = Contact {
            body_a: BodyId(1),
            body_b: BodyId(0),
            normal: Vec2::new(-1.0, 0.0),
            depth: 1.0,
            point: Vec2::new(0.5, 0.0),
        };
        let (a, b) = body_pair_mut(&mut bodies, &contact).unwrap();
        assert_eq!(a.id, BodyId(1));
        assert_eq!(b.id, BodyId(0));

        let self_contact = Contact { body_b: BodyId(1), ..contact };
        assert!(body_pair_mut(&mut bodies, &self_contact).is_none());
    }
}
