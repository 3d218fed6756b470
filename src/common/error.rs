use crate::objects::rigid_body::BodyId;

/// Broad category of a [`PhysicsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something the core cannot accept.
    InvalidArgument,
    /// The call would break a physical invariant (e.g. moving a static body).
    InvariantViolation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    InvalidTimestep(f64),
    UnknownBody(BodyId),
    IntensityOutOfRange { delta: i32, max: i32 },
    InvalidShape,
    InvalidMass(f64),
    InvalidPosition,
    InvalidVelocity,
    InvalidLayout(String),
    InvalidConfig(String),
    StaticBodyMutation(BodyId),
}

impl PhysicsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PhysicsError::StaticBodyMutation(_) => ErrorKind::InvariantViolation,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicsError::InvalidTimestep(dt) => {
                write!(f, "Timestep must be positive and finite, got {dt}")
            }
            PhysicsError::UnknownBody(id) => write!(f, "Unknown body {id}"),
            PhysicsError::IntensityOutOfRange { delta, max } => {
                write!(f, "Intensity delta {delta} outside [-{max}, {max}]")
            }
            PhysicsError::InvalidShape => {
                write!(f, "Shape dimensions must be positive and finite")
            }
            PhysicsError::InvalidMass(mass) => {
                write!(f, "Mass must be zero (static) or positive, got {mass}")
            }
            PhysicsError::InvalidPosition => write!(f, "Position must be finite"),
            PhysicsError::InvalidVelocity => write!(f, "Velocity must be finite"),
            PhysicsError::InvalidLayout(reason) => write!(f, "Invalid board layout: {reason}"),
            PhysicsError::InvalidConfig(reason) => write!(f, "Invalid configuration: {reason}"),
            PhysicsError::StaticBodyMutation(id) => {
                write!(f, "Cannot change the motion of static body {id}")
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

pub type Result<T> = std::result::Result<T, PhysicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(PhysicsError::InvalidTimestep(0.0).kind(), ErrorKind::InvalidArgument);
        assert_eq!(PhysicsError::UnknownBody(BodyId(3)).kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            PhysicsError::StaticBodyMutation(BodyId(0)).kind(),
            ErrorKind::InvariantViolation
        );
    }

    #[test]
    fn test_error_display() {
        let msg = PhysicsError::UnknownBody(BodyId(7)).to_string();
        assert_eq!(msg, "Unknown body BodyId(7)");
        let msg = PhysicsError::IntensityOutOfRange { delta: 12, max: 10 }.to_string();
        assert_eq!(msg, "Intensity delta 12 outside [-10, 10]");
    }
}
