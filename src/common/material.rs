//! Defines physical material properties.

use serde::{Deserialize, Serialize};

/// Surface properties of a rigid body affecting collisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb friction coefficient. Range [0, 1].
    pub friction: f64,
}

impl Material {
    /// Creates a new material, clamping both coefficients into [0, 1].
    /// Non-finite inputs fall back to zero.
    pub fn new(restitution: f64, friction: f64) -> Self {
        Material {
            restitution: clamp_unit(restitution),
            friction: clamp_unit(friction),
        }
    }

    /// Restitution used for a contact between two materials.
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }

    /// Friction used for a contact between two materials (geometric mean).
    pub fn combined_friction(&self, other: &Material) -> f64 {
        (self.friction * other.friction).sqrt()
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl Default for Material {
    /// Moderate restitution, moderate friction.
    fn default() -> Self {
        Material {
            restitution: 0.2,
            friction: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_clamps() {
        let m = Material::new(1.5, -0.3);
        assert_eq!(m.restitution, 1.0);
        assert_eq!(m.friction, 0.0);
        let m = Material::new(f64::NAN, 0.4);
        assert_eq!(m.restitution, 0.0);
        assert_eq!(m.friction, 0.4);
    }

    #[test]
    fn test_material_combination() {
        let a = Material::new(0.8, 0.25);
        let b = Material::new(0.3, 1.0);
        assert_eq!(a.combined_restitution(&b), 0.3);
        assert!((a.combined_friction(&b) - 0.5).abs() < 1e-12);
    }
}
