use std::f64::consts::PI;
use std::sync::Arc;

use glim_math::{Color, Point3, Ray, Vec3};

use crate::arena::MemoryArena;
use crate::hittable::HitRecord;
use crate::pdf::{CosinePdf, Pdf};
use crate::sampler::Sampler;
use crate::texture::{SolidColor, Texture};

/// How a surface continues a path: either a fixed mirror-like ray or a
/// density to importance-sample a direction from.
pub enum ScatterKind<'a> {
    Specular(Ray),
    Diffuse(&'a dyn Pdf),
}

/// Result of a scattering event.
///
/// The PDF for the diffuse case is allocated from the worker's arena, which
/// is why the record borrows the arena's lifetime.
pub struct ScatterRecord<'a> {
    pub attenuation: Color,
    pub kind: ScatterKind<'a>,
}

impl ScatterRecord<'_> {
    pub fn is_specular(&self) -> bool {
        matches!(self.kind, ScatterKind::Specular(_))
    }
}

/// Surface response to light.
///
/// The defaults describe a black body: absorbs everything, emits nothing.
/// `bsdf` returns the albedo-normalized BSDF value (the attenuation carries
/// the albedo), which the integrator multiplies with the geometry cosine.
pub trait Material: Send + Sync {
    fn scatter<'a>(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _arena: &'a MemoryArena,
        _sampler: &mut Sampler,
    ) -> Option<ScatterRecord<'a>> {
        None
    }

    fn bsdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        0.0
    }

    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }
}

/// Ideal diffuse surface with a textured albedo.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Lambertian {
    fn scatter<'a>(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        arena: &'a MemoryArena,
        _sampler: &mut Sampler,
    ) -> Option<ScatterRecord<'a>> {
        Some(ScatterRecord {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            kind: ScatterKind::Diffuse(arena.alloc(CosinePdf::new(rec.normal))),
        })
    }

    fn bsdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        1.0 / PI
    }
}

/// Mixture of a mirror and a tinted diffuse lobe.
///
/// `fuzz` is the probability of the diffuse branch: 0 is a perfect mirror,
/// 1 is a diffuse surface with a metallic tint.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl Material for Metal {
    fn scatter<'a>(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        arena: &'a MemoryArena,
        sampler: &mut Sampler,
    ) -> Option<ScatterRecord<'a>> {
        let kind = if sampler.next_f64() > self.fuzz {
            let reflected = reflect(ray_in.direction.normalize(), rec.normal);
            ScatterKind::Specular(Ray::new(rec.p, reflected))
        } else {
            ScatterKind::Diffuse(arena.alloc(CosinePdf::new(rec.normal)))
        };
        Some(ScatterRecord {
            attenuation: self.albedo,
            kind,
        })
    }

    fn bsdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        1.0 / PI
    }
}

/// Clear glass-like surface described by its refractive index.
pub struct Dielectric {
    ref_idx: f64,
}

impl Dielectric {
    pub fn new(ref_idx: f64) -> Self {
        Self { ref_idx }
    }
}

impl Material for Dielectric {
    fn scatter<'a>(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _arena: &'a MemoryArena,
        sampler: &mut Sampler,
    ) -> Option<ScatterRecord<'a>> {
        // Treat the outside medium as air with index 1.
        let etai_over_etat = if rec.front_face {
            1.0 / self.ref_idx
        } else {
            self.ref_idx
        };
        let unit_direction = ray_in.direction.normalize();

        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection, then Schlick-weighted reflection,
        // otherwise refraction.
        let direction = if etai_over_etat * sin_theta > 1.0 {
            reflect(unit_direction, rec.normal)
        } else if sampler.next_f64() < schlick(cos_theta, self.ref_idx) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, etai_over_etat)
        };

        Some(ScatterRecord {
            attenuation: Color::ONE,
            kind: ScatterKind::Specular(Ray::new(rec.p, direction)),
        })
    }
}

/// Emits a constant color from both sides and scatters nothing.
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.emit
    }
}

#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of the Fresnel reflectance.
#[inline]
fn schlick(cosine: f64, ref_idx: f64) -> f64 {
    let r0 = (1.0 - ref_idx) / (1.0 + ref_idx);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(ray: &Ray, material: &'a dyn Material, outward_normal: Vec3) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, Point3::ZERO, outward_normal, 0.5, 0.5, material)
    }

    #[test]
    fn test_lambertian_scatters_diffuse() {
        let material = Lambertian::from_color(Color::new(0.8, 0.2, 0.1));
        let arena = MemoryArena::new();
        let mut sampler = Sampler::new(1);
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = record(&ray, &material, Vec3::Y);

        let scatter = material
            .scatter(&ray, &rec, &arena, &mut sampler)
            .unwrap();
        assert!(!scatter.is_specular());
        assert_eq!(scatter.attenuation, Color::new(0.8, 0.2, 0.1));
        assert!((material.bsdf(&ray, &rec, &ray) - 1.0 / PI).abs() < 1e-12);
    }

    #[test]
    fn test_metal_fuzz_zero_is_mirror() {
        let material = Metal::new(Color::ONE, 0.0);
        let arena = MemoryArena::new();
        let mut sampler = Sampler::new(2);
        let ray = Ray::new(Point3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -1.0, 1.0));
        let rec = record(&ray, &material, Vec3::Y);

        for _ in 0..100 {
            let scatter = material
                .scatter(&ray, &rec, &arena, &mut sampler)
                .unwrap();
            match scatter.kind {
                ScatterKind::Specular(reflected) => {
                    let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
                    assert!((reflected.direction - expected).length() < 1e-12);
                }
                ScatterKind::Diffuse(_) => panic!("fuzz 0 must stay specular"),
            }
        }
    }

    #[test]
    fn test_metal_fuzz_one_is_diffuse() {
        let material = Metal::new(Color::ONE, 1.0);
        let arena = MemoryArena::new();
        let mut sampler = Sampler::new(3);
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = record(&ray, &material, Vec3::Y);

        for _ in 0..100 {
            let scatter = material
                .scatter(&ray, &rec, &arena, &mut sampler)
                .unwrap();
            assert!(!scatter.is_specular());
        }
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        let material = Metal::new(Color::ONE, 3.0);
        assert_eq!(material.fuzz, 1.0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        let arena = MemoryArena::new();
        let mut sampler = Sampler::new(4);
        // Grazing ray leaving the glass: sin(theta) * 1.5 > 1, so the ray
        // must reflect back inside regardless of the Fresnel draw.
        let ray = Ray::new(Point3::new(0.0, -1.0, 0.0), Vec3::new(0.9, 0.436, 0.0));
        let rec = record(&ray, &material, Vec3::Y);
        assert!(!rec.front_face);

        let scatter = material
            .scatter(&ray, &rec, &arena, &mut sampler)
            .unwrap();
        match scatter.kind {
            ScatterKind::Specular(reflected) => {
                assert!(reflected.direction.y < 0.0);
                assert!(reflected.direction.x > 0.8);
            }
            ScatterKind::Diffuse(_) => panic!("dielectric is always specular"),
        }
    }

    #[test]
    fn test_dielectric_mostly_refracts_head_on() {
        let material = Dielectric::new(1.5);
        let arena = MemoryArena::new();
        let mut sampler = Sampler::new(5);
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = record(&ray, &material, Vec3::Y);

        // Head-on reflectance is schlick(1, 1.5) = 4%; out of 200 draws the
        // reflected count stays far below half.
        let mut refracted = 0;
        for _ in 0..200 {
            let scatter = material
                .scatter(&ray, &rec, &arena, &mut sampler)
                .unwrap();
            if let ScatterKind::Specular(out) = scatter.kind {
                if out.direction.y < 0.0 {
                    // Straight-on refraction keeps the direction.
                    assert!((out.direction - -Vec3::Y).length() < 1e-9);
                    refracted += 1;
                }
            }
        }
        assert!(refracted > 170, "refracted {refracted} of 200");
    }

    #[test]
    fn test_diffuse_light_emits_and_absorbs() {
        let material = DiffuseLight::new(Color::new(12.0, 12.0, 12.0));
        let arena = MemoryArena::new();
        let mut sampler = Sampler::new(6);
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = record(&ray, &material, Vec3::Y);

        assert!(material.scatter(&ray, &rec, &arena, &mut sampler).is_none());
        assert_eq!(
            material.emitted(0.0, 0.0, Point3::ZERO),
            Color::new(12.0, 12.0, 12.0)
        );
        assert_eq!(material.bsdf(&ray, &rec, &ray), 0.0);
    }

    #[test]
    fn test_reflect_mirrors_across_normal() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_schlick_at_normal_incidence() {
        // ((1 - 1.5) / (1 + 1.5))^2 = 0.04
        assert!((schlick(1.0, 1.5) - 0.04).abs() < 1e-12);
        // Grazing incidence reflects everything.
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-12);
    }
}
