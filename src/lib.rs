//! Deterministic 2D rigid-body core for a "shake the chess board" sandbox.
//!
//! Circles and boxes, impulse-based contacts with friction, a seeded shake
//! controller and a chess-set scene loader. [`Sandbox`] is the entry point for
//! an interactive front end; [`World`] can be driven directly.

pub mod board;
pub mod collision;
pub mod common;
pub mod integration;
pub mod math;
pub mod objects;
pub mod resolution;
pub mod sandbox;
pub mod shake;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use board::{BoardHandles, Layout, Piece, PieceKind, Side, Square};
pub use collision::Contact;
pub use common::{ErrorKind, Material, PhysicsError, Result, SandboxConfig};
pub use math::{Transform, Vec2};
pub use objects::{BodyId, RigidBody};
pub use sandbox::Sandbox;
pub use shake::ShakeController;
pub use shapes::{Circle, Rect, Shape};
pub use world::World;
