//! Shared math types for the viewer: glam re-exports and [`Transform`].

pub use glam::{Mat4, Quat, Vec3, vec3};

pub mod transform;

pub use transform::Transform;
