//! Tunable parameters for the world, the solver, the shake gag and the board.
//!
//! Every struct deserializes with defaults for missing fields, so a partial
//! JSON document such as `{"world": {"gravity": {"x": 0, "y": 0}}}` is valid.

use serde::{Deserialize, Serialize};

use crate::common::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    /// World is y-up: the default pulls towards negative y.
    pub gravity: Vec2,
    /// Fixed step used by the sandbox loop, in seconds.
    pub timestep: f64,
    /// Velocity-impulse passes over the contact list per step.
    pub solver_iterations: usize,
    /// Fraction of the penetration removed per step by positional correction.
    pub correction_percent: f64,
    /// Penetration tolerated without positional correction.
    pub correction_slop: f64,
    /// Contacts shallower than this are ignored.
    pub contact_epsilon: f64,
    /// Farthest a body may travel in one step; faster bodies are slowed.
    pub max_translation: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            timestep: 1.0 / 60.0,
            solver_iterations: 10,
            correction_percent: 0.2,
            correction_slop: 0.01,
            contact_epsilon: 1e-6,
            max_translation: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShakeConfig {
    /// Velocity kick range per intensity level.
    pub impulse_per_level: f64,
    /// Angular velocity kick range per intensity level. Zero disables spin.
    pub spin_per_level: f64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            impulse_per_level: 1.5,
            spin_per_level: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Edge length of one board square.
    pub cell_size: f64,
    /// Thickness of the static frame around the 8x8 grid.
    pub wall_thickness: f64,
    pub piece_restitution: f64,
    pub piece_friction: f64,
    pub frame_restitution: f64,
    pub frame_friction: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            wall_thickness: 1.0,
            piece_restitution: 0.3,
            piece_friction: 0.4,
            frame_restitution: 0.2,
            frame_friction: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SandboxConfig {
    pub world: WorldConfig,
    pub shake: ShakeConfig,
    pub board: BoardConfig,
    /// Seed for the shake RNG; the same seed replays the same shakes.
    pub seed: u64,
    /// Upper bound on fixed steps run by a single `advance` call.
    pub max_substeps: u32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            shake: ShakeConfig::default(),
            board: BoardConfig::default(),
            seed: 0x5eed,
            max_substeps: 8,
        }
    }
}

impl SandboxConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SandboxConfig =
            serde_json::from_str(json).map_err(|e| PhysicsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PhysicsError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.shake.validate()?;
        self.board.validate()?;
        if self.max_substeps == 0 {
            return Err(invalid("maxSubsteps must be at least 1"));
        }
        Ok(())
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(invalid("world.gravity must be finite"));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(invalid("world.timestep must be positive"));
        }
        if self.solver_iterations == 0 {
            return Err(invalid("world.solverIterations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.correction_percent) {
            return Err(invalid("world.correctionPercent must be within [0, 1]"));
        }
        if !(self.correction_slop.is_finite() && self.correction_slop >= 0.0) {
            return Err(invalid("world.correctionSlop must be non-negative"));
        }
        if !(self.contact_epsilon.is_finite() && self.contact_epsilon >= 0.0) {
            return Err(invalid("world.contactEpsilon must be non-negative"));
        }
        if !(self.max_translation.is_finite() && self.max_translation > 0.0) {
            return Err(invalid("world.maxTranslation must be positive"));
        }
        Ok(())
    }
}

impl ShakeConfig {
    /// Largest accepted per-level rate. Keeps `intensity * rate` far away
    /// from values whose sampling range would overflow.
    pub const MAX_RATE: f64 = 1.0e6;

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=Self::MAX_RATE).contains(&self.impulse_per_level) {
            return Err(invalid("shake.impulsePerLevel must be within [0, 1e6]"));
        }
        if !(0.0..=Self::MAX_RATE).contains(&self.spin_per_level) {
            return Err(invalid("shake.spinPerLevel must be within [0, 1e6]"));
        }
        Ok(())
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(invalid("board.cellSize must be positive"));
        }
        if !(self.wall_thickness.is_finite() && self.wall_thickness > 0.0) {
            return Err(invalid("board.wallThickness must be positive"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> PhysicsError {
    PhysicsError::InvalidConfig(reason.to_string())
}
