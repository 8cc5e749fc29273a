//! Monte Carlo path tracing integrator.
//!
//! Estimates the rendering equation by recursive sampling:
//! - Specular surfaces follow their single reflected or refracted ray
//! - Diffuse surfaces importance-sample a mixture of the surface density
//!   and the scene light list
//! - Russian roulette keyed to the surface attenuation keeps dark paths
//!   from running long
//!
//! Rays that leave the scene pick up the skybox texture, looked up with
//! the same spherical parameterization spheres use.

use glim_math::{Color, Point3, Ray, Vec3};

use crate::arena::MemoryArena;
use crate::hittable::Hittable;
use crate::material::{Material, ScatterKind};
use crate::pdf::{HittablePdf, MixturePdf, Pdf};
use crate::sampler::Sampler;
use crate::scene::Scene;
use crate::sphere::sphere_uv;
use crate::texture::Texture;

/// Recursion levels after which a path is cut off and contributes black.
const MAX_DEPTH: u32 = 12;

/// Minimum hit distance. Keeps scattered rays from re-hitting the surface
/// they just left.
const T_MIN: f64 = 1e-3;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Compute the radiance arriving along `ray`.
///
/// `depth` counts completed bounces and starts at zero for camera rays.
/// The scene must have been initialized so its world BVH is current.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    arena: &MemoryArena,
    sampler: &mut Sampler,
    depth: u32,
) -> Color {
    if depth > MAX_DEPTH {
        return Color::ZERO;
    }

    let Some(rec) = scene.world().hit(ray, T_MIN, f64::INFINITY) else {
        // Escaped rays sample the environment by direction.
        let (u, v) = sphere_uv(ray.direction.normalize());
        return scene.skybox_texture().value(u, v, Point3::ZERO);
    };

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    let Some(srec) = rec.material.scatter(ray, &rec, arena, sampler) else {
        return emitted;
    };

    let surface_pdf = match srec.kind {
        ScatterKind::Specular(specular_ray) => {
            return srec.attenuation
                * rec.normal.dot(specular_ray.direction)
                * ray_color(&specular_ray, scene, arena, sampler, depth + 1);
        }
        ScatterKind::Diffuse(pdf) => pdf,
    };

    // Russian roulette. Paths through dark surfaces die early; survivors
    // are boosted to keep the estimator unbiased.
    let p_kill = (1.0 - srec.attenuation.length() / SQRT_3).max(0.0);
    if sampler.next_f64() < p_kill {
        return Color::ZERO;
    }
    let boost = 1.0 / (1.0 - p_kill);

    let lights = scene.lights();
    let (scattered, pdf_value) = if lights.is_empty() {
        sample_direction(surface_pdf, rec.p, sampler)
    } else {
        let light_pdf = HittablePdf::new(lights, rec.p);
        let mixture = MixturePdf::new(surface_pdf, &light_pdf);
        sample_direction(&mixture, rec.p, sampler)
    };

    emitted
        + srec.attenuation
            * rec.material.bsdf(ray, &rec, &scattered)
            * rec.normal.dot(scattered.direction)
            * ray_color(&scattered, scene, arena, sampler, depth + 1)
            * boost
            / pdf_value
}

/// Draw directions until one lands where the density is nonzero.
fn sample_direction(pdf: &dyn Pdf, origin: Point3, sampler: &mut Sampler) -> (Ray, f64) {
    loop {
        let direction = pdf.generate(sampler);
        let value = pdf.value(direction);
        if value > 0.0 {
            return (Ray::new(origin, direction), value);
        }
    }
}
