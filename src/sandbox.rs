//! Command surface for a presentation layer: owns the world, the shake
//! controller, the seeded random source and a fixed-timestep clock.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{self, BoardHandles, Layout};
use crate::common::{PhysicsError, Result, SandboxConfig};
use crate::math::{Transform, Vec2};
use crate::objects::{BodyId, RigidBody};
use crate::shake::ShakeController;
use crate::shapes::Shape;
use crate::world::World;

pub struct Sandbox {
    world: World,
    shake: ShakeController,
    rng: StdRng,
    board: Option<BoardHandles>,
    timestep: f64,
    max_substeps: u32,
    accumulator: f64,
    paused: bool,
}

impl Sandbox {
    /// An empty sandbox. The configuration is validated first.
    pub fn new(config: SandboxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world: World::from_config(&config.world)?,
            shake: ShakeController::new(&config.shake),
            rng: StdRng::seed_from_u64(config.seed),
            board: None,
            timestep: config.world.timestep,
            max_substeps: config.max_substeps,
            accumulator: 0.0,
            paused: false,
        })
    }

    /// A sandbox holding the standard chess starting position.
    pub fn chess(config: SandboxConfig) -> Result<Self> {
        Self::with_layout(config, &Layout::standard())
    }

    pub fn with_layout(config: SandboxConfig, layout: &Layout) -> Result<Self> {
        let board_config = config.board.clone();
        let mut sandbox = Self::new(config)?;
        sandbox.board = Some(board::populate(&mut sandbox.world, layout, &board_config)?);
        Ok(sandbox)
    }

    pub fn create_body(
        &mut self,
        shape: Shape,
        position: Vec2,
        mass: f64,
        restitution: f64,
        friction: f64,
    ) -> Result<BodyId> {
        self.world
            .create_body(shape, position, mass, restitution, friction)
            .map_err(|e| rejected("create_body", e))
    }

    /// Runs exactly one step of `dt`, paused or not.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        self.world.step(dt).map_err(|e| rejected("step", e))
    }

    /// Feeds `elapsed` wall-clock seconds into the fixed-step clock and runs
    /// the steps that fit, at most `max_substeps`. Backlog beyond the cap is
    /// dropped. Returns the number of steps taken.
    pub fn advance(&mut self, elapsed: f64) -> Result<u32> {
        if !(elapsed.is_finite() && elapsed >= 0.0) {
            return Err(rejected("advance", PhysicsError::InvalidTimestep(elapsed)));
        }
        if self.paused {
            return Ok(0);
        }

        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < self.max_substeps {
            self.world.step(self.timestep)?;
            self.accumulator -= self.timestep;
            steps += 1;
        }
        if self.accumulator >= self.timestep {
            debug!(
                "advance: dropping {:.4}s after {} substeps",
                self.accumulator, steps
            );
            self.accumulator = 0.0;
        }
        Ok(steps)
    }

    pub fn get_transform(&self, id: BodyId) -> Result<Transform> {
        self.world.transform(id).map_err(|e| rejected("get_transform", e))
    }

    /// Raises or lowers the shake intensity and kicks every piece.
    pub fn disturb(&mut self, delta: i32) -> Result<()> {
        self.shake
            .disturb(&mut self.world, delta, &mut self.rng)
            .map_err(|e| rejected("disturb", e))
    }

    pub fn reset(&mut self) {
        self.shake.reset(&mut self.world);
        self.accumulator = 0.0;
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("simulation paused at t={:.3}", self.world.elapsed());
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.accumulator = 0.0;
            info!("simulation resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn intensity(&self) -> i32 {
        self.shake.intensity()
    }

    pub fn bodies(&self) -> &[RigidBody] {
        self.world.bodies()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Piece and frame ids when the sandbox was built from a layout.
    pub fn board(&self) -> Option<&BoardHandles> {
        self.board.as_ref()
    }
}

fn rejected(command: &str, error: PhysicsError) -> PhysicsError {
    warn!("{} rejected: {}", command, error);
    error
}
