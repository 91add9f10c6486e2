pub mod glam_ext;
mod transform;

pub use glam::{
    DMat3 as Mat3, DMat4 as Mat4, DQuat as Quat, DVec2 as Vec2, DVec3 as Vec3, DVec4 as Vec4,
};
pub use transform::Transform;

/// Scalar type used throughout the crate.
pub type Real = f64;
