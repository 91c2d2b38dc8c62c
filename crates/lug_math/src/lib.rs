//! Quaternion algebra and the vector types it operates on.

#[macro_use]
mod macros;

pub mod quaternion;
pub mod vector;

pub use quaternion::{
    Quaternion, QuaternionError, Result, reflect_point, reflect_point_in_plane, rotate_point,
    rotate_point_with,
};
pub use vector::{UnitVector3, Vector3};
