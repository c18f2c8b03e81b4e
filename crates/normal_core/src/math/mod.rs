//! Vector and angle mathematics.
//!
//! - [`vector`]: `Vec2`, `Vec3` and the [`NormalVector`](vector::NormalVector) abstraction
//!   shared by every sampling strategy
//! - [`angular`]: degree/radian conversion and angular differences between directions

pub mod angular;
pub mod vector;

pub use angular::{
    to_degrees, to_radians, unsigned_angular_difference, unsigned_unit_angular_difference,
};
pub use vector::{NormalVector, Vec2, Vec3};
