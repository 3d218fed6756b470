pub mod controller;

pub use controller::{ShakeController, MAX_INTENSITY};
