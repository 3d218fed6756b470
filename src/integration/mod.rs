pub mod integrator;

pub use integrator::{wrap_angle, Integrator, SemiImplicitEuler};
