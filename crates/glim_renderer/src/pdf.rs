use std::f64::consts::{PI, TAU};

use glim_math::{Onb, Point3, Vec3};

use crate::hittable::Hittable;
use crate::sampler::Sampler;

/// A probability density over directions, used for importance sampling.
///
/// `value` and `generate` must describe the same distribution: the density
/// returned by `value` is what divides the integrand for directions drawn
/// from `generate`.
pub trait Pdf {
    /// Density of `direction` with respect to solid angle.
    fn value(&self, direction: Vec3) -> f64;

    /// Draw a direction distributed according to this density.
    fn generate(&self, sampler: &mut Sampler) -> Vec3;
}

/// Cosine-weighted density over the hemisphere around a surface normal.
///
/// This matches the Lambertian BSDF exactly, so sampling it gives zero
/// variance for a diffuse surface under constant lighting.
#[derive(Copy, Clone)]
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(w: Vec3) -> Self {
        Self {
            uvw: Onb::build_from_w(w),
        }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3) -> f64 {
        let cosine = direction.normalize().dot(self.uvw.w);
        if cosine <= 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }

    fn generate(&self, sampler: &mut Sampler) -> Vec3 {
        self.uvw
            .local_vec(random_cosine_direction(sampler))
            .normalize()
    }
}

/// Cosine-weighted direction in the local frame (z is up).
fn random_cosine_direction(sampler: &mut Sampler) -> Vec3 {
    let r1 = sampler.next_f64();
    let r2 = sampler.next_f64();
    let z = (1.0 - r2).sqrt();
    let phi = TAU * r1;
    Vec3::new(phi.cos() * r2.sqrt(), phi.sin() * r2.sqrt(), z)
}

/// Density of directions from a fixed origin towards a hittable.
///
/// Delegates to the hittable's own `pdf_value`/`random` pair, so it is only
/// useful for shapes that override them (the light-shaped ones).
#[derive(Copy, Clone)]
pub struct HittablePdf<'a> {
    origin: Point3,
    target: &'a dyn Hittable,
}

impl<'a> HittablePdf<'a> {
    pub fn new(target: &'a dyn Hittable, origin: Point3) -> Self {
        Self { origin, target }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3) -> f64 {
        self.target.pdf_value(self.origin, direction)
    }

    fn generate(&self, sampler: &mut Sampler) -> Vec3 {
        self.target.random(self.origin, sampler)
    }
}

/// Even 50/50 mixture of two densities.
///
/// The integrator mixes the surface density with the light density; either
/// component alone would make some scenes unrenderable (caustic-like paths
/// for the light density, tiny bright lights for the surface density).
#[derive(Copy, Clone)]
pub struct MixturePdf<'a> {
    p0: &'a dyn Pdf,
    p1: &'a dyn Pdf,
}

impl<'a> MixturePdf<'a> {
    pub fn new(p0: &'a dyn Pdf, p1: &'a dyn Pdf) -> Self {
        Self { p0, p1 }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3) -> f64 {
        0.5 * self.p0.value(direction) + 0.5 * self.p1.value(direction)
    }

    fn generate(&self, sampler: &mut Sampler) -> Vec3 {
        if sampler.next_f64() < 0.5 {
            self.p0.generate(sampler)
        } else {
            self.p1.generate(sampler)
        }
    }
}
