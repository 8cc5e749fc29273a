//! Math foundation for the glim renderer.
//!
//! Everything is built on glam's f64 types. The aliases below give the
//! rendering code domain names for what is otherwise the same vector:
//! a position, a direction, and an RGB triple all live in [`DVec3`].

pub use glam::{DMat3, DMat4, DVec2, DVec3};

mod aabb;
mod onb;
mod ray;

pub use aabb::Aabb;
pub use onb::Onb;
pub use ray::Ray;

/// Direction or offset in world space.
pub type Vec3 = DVec3;
/// Location in world space.
pub type Point3 = DVec3;
/// Linear RGB color. Components may exceed 1.0 for emitters.
pub type Color = DVec3;
