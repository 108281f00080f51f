mod vector3;
mod matrix4;
mod quaternion;

pub use vector3::*;
pub use matrix4::*;
pub use quaternion::*;

#[cfg(test)]
mod quaternion_tests;
