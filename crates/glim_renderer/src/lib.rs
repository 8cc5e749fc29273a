//! glim renderer - CPU path tracing.
//!
//! A tile-based multithreaded Monte Carlo path tracer. Scenes are built
//! from spheres, axis-aligned rects, disks, triangle meshes and instancing
//! transforms, shaded with a small set of physically-based materials, and
//! rendered through [`RenderEngine`] into a [`Film`].

mod aarect;
mod arena;
mod bvh;
mod camera;
mod disk;
mod engine;
mod error;
mod film;
mod hittable;
mod integrator;
mod material;
mod mesh;
mod pdf;
mod sampler;
mod scene;
mod sphere;
mod texture;
mod transform;
mod triangle;

pub use aarect::{XyRect, XzRect, YzRect};
pub use arena::MemoryArena;
pub use bvh::BvhNode;
pub use camera::Camera;
pub use disk::Disk;
pub use engine::{RenderEngine, RenderSettings};
pub use error::RenderError;
pub use film::{Film, Tile, TileQueue};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::ray_color;
pub use material::{
    Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterKind, ScatterRecord,
};
pub use mesh::{Mesh, RawMeshInfo};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
pub use sampler::Sampler;
pub use scene::Scene;
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, SolidColor, Texture};
pub use transform::Transform;
pub use triangle::Triangle;

/// Re-export the common math types from glim_math.
pub use glim_math::{Aabb, Color, Onb, Point3, Ray, Vec3};
