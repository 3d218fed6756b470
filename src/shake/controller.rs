use log::info;
use rand::Rng;

use crate::common::{PhysicsError, Result, ShakeConfig};
use crate::world::World;

/// Highest cumulative intensity, and the largest accepted single delta.
pub const MAX_INTENSITY: i32 = 10;

/// Turns "shake the board" commands into random velocity kicks and restores
/// the scene on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct ShakeController {
    intensity: i32,
    pub impulse_per_level: f64,
    pub spin_per_level: f64,
}

impl ShakeController {
    pub fn new(config: &ShakeConfig) -> Self {
        Self {
            intensity: 0,
            impulse_per_level: config.impulse_per_level,
            spin_per_level: config.spin_per_level,
        }
    }

    /// Current cumulative intensity in `[0, MAX_INTENSITY]`.
    pub fn intensity(&self) -> i32 {
        self.intensity
    }

    /// Adjusts the intensity by `delta` and kicks every dynamic body.
    ///
    /// Each body gets `vx ~ U(-s, s)`, `vy ~ U(0, s)` with
    /// `s = intensity * impulse_per_level`, added straight to its velocity,
    /// plus a spin `~ U(-k, k)` with `k = intensity * spin_per_level`.
    /// Draws happen in body order, so a seeded `rng` replays exactly.
    pub fn disturb<R: Rng + ?Sized>(&mut self, world: &mut World, delta: i32, rng: &mut R) -> Result<()> {
        if delta.unsigned_abs() > MAX_INTENSITY as u32 {
            return Err(PhysicsError::IntensityOutOfRange {
                delta,
                max: MAX_INTENSITY,
            });
        }

        let intensity = (self.intensity + delta).clamp(0, MAX_INTENSITY);
        let speed = intensity as f64 * self.impulse_per_level;
        let spin = intensity as f64 * self.spin_per_level;
        // Sampling from [-x, x] needs a finite width.
        if !(2.0 * speed).is_finite() || !(2.0 * spin).is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "shake rates too large: speed {} spin {}",
                speed, spin
            )));
        }
        self.intensity = intensity;

        let mut kicked = 0;
        if self.intensity > 0 {
            for body in world.bodies_mut().iter_mut().filter(|b| b.is_dynamic()) {
                if speed > 0.0 {
                    body.linear_velocity.x += rng.gen_range(-speed..=speed);
                    body.linear_velocity.y += rng.gen_range(0.0..=speed);
                }
                if spin > 0.0 {
                    body.angular_velocity += rng.gen_range(-spin..=spin);
                }
                kicked += 1;
            }
        }

        info!(
            "disturb {:+}: intensity {} (speed {:.2}, spin {:.2}), {} bodies kicked",
            delta, self.intensity, speed, spin, kicked
        );
        Ok(())
    }

    /// Puts every body back at its origin, at rest, and zeroes the intensity.
    pub fn reset(&mut self, world: &mut World) {
        let bodies = world.bodies_mut();
        for body in bodies.iter_mut() {
            body.reset_to_origin();
        }
        self.intensity = 0;
        info!("reset {} bodies to their origin", bodies.len());
    }
}

impl Default for ShakeController {
    fn default() -> Self {
        Self::new(&ShakeConfig::default())
    }
}
