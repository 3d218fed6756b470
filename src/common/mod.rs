pub mod config;
pub mod error;
pub mod material;

pub use config::{BoardConfig, SandboxConfig, ShakeConfig, WorldConfig};
pub use error::{ErrorKind, PhysicsError, Result};
pub use material::Material;
