pub mod aabb;
pub mod detection;
pub mod detector;
pub mod manifold;

pub use aabb::AABB;
pub use detection::check_collision;
pub use detector::{Detector, PairwiseDetector};
pub use manifold::Contact;
