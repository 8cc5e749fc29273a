use std::sync::Arc;

use glim_math::{Aabb, Point3, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;
use crate::sampler::Sampler;

/// Rectangle in the plane z = k, spanning [x0, x1] x [y0, y1].
pub struct XyRect {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    k: f64,
    material: Arc<dyn Material>,
}

impl XyRect {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, k: f64, material: Arc<dyn Material>) -> Self {
        Self {
            x0,
            x1,
            y0,
            y1,
            k,
            material,
        }
    }
}

impl Hittable for XyRect {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let t = (self.k - ray.origin.z) / ray.direction.z;
        if t < t_min || t > t_max {
            return None;
        }

        let x = ray.origin.x + t * ray.direction.x;
        let y = ray.origin.y + t * ray.direction.y;
        if x < self.x0 || x > self.x1 || y < self.y0 || y > self.y1 {
            return None;
        }

        let u = (x - self.x0) / (self.x1 - self.x0);
        let v = (y - self.y0) / (self.y1 - self.y0);
        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            Vec3::Z,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            Point3::new(self.x0, self.y0, self.k),
            Point3::new(self.x1, self.y1, self.k),
        )
    }
}

/// Rectangle in the plane y = k, spanning [x0, x1] x [z0, z1].
///
/// This is the ceiling-light shape, so it also knows how to be importance
/// sampled: `pdf_value` converts the rect's area density to a solid-angle
/// density at the receiving point, `random` picks a uniform point on the
/// rect and returns the direction to it.
pub struct XzRect {
    x0: f64,
    x1: f64,
    z0: f64,
    z1: f64,
    k: f64,
    material: Arc<dyn Material>,
}

impl XzRect {
    pub fn new(x0: f64, x1: f64, z0: f64, z1: f64, k: f64, material: Arc<dyn Material>) -> Self {
        Self {
            x0,
            x1,
            z0,
            z1,
            k,
            material,
        }
    }
}

impl Hittable for XzRect {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let t = (self.k - ray.origin.y) / ray.direction.y;
        if t < t_min || t > t_max {
            return None;
        }

        let x = ray.origin.x + t * ray.direction.x;
        let z = ray.origin.z + t * ray.direction.z;
        if x < self.x0 || x > self.x1 || z < self.z0 || z > self.z1 {
            return None;
        }

        let u = (x - self.x0) / (self.x1 - self.x0);
        let v = (z - self.z0) / (self.z1 - self.z0);
        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            Vec3::Y,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            Point3::new(self.x0, self.k, self.z0),
            Point3::new(self.x1, self.k, self.z1),
        )
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3) -> f64 {
        let Some(rec) = self.hit(&Ray::new(origin, direction), 0.001, f64::INFINITY) else {
            return 0.0;
        };

        let area = (self.x1 - self.x0) * (self.z1 - self.z0);
        let distance_squared = rec.t * rec.t * direction.length_squared();
        let cosine = (direction.dot(rec.normal) / direction.length()).abs();

        distance_squared / (cosine * area)
    }

    fn random(&self, origin: Point3, sampler: &mut Sampler) -> Vec3 {
        let random_point = Point3::new(
            sampler.next_range(self.x0, self.x1),
            self.k,
            sampler.next_range(self.z0, self.z1),
        );
        (random_point - origin).normalize()
    }
}

/// Rectangle in the plane x = k, spanning [y0, y1] x [z0, z1].
pub struct YzRect {
    y0: f64,
    y1: f64,
    z0: f64,
    z1: f64,
    k: f64,
    material: Arc<dyn Material>,
}

impl YzRect {
    pub fn new(y0: f64, y1: f64, z0: f64, z1: f64, k: f64, material: Arc<dyn Material>) -> Self {
        Self {
            y0,
            y1,
            z0,
            z1,
            k,
            material,
        }
    }
}

impl Hittable for YzRect {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let t = (self.k - ray.origin.x) / ray.direction.x;
        if t < t_min || t > t_max {
            return None;
        }

        let y = ray.origin.y + t * ray.direction.y;
        let z = ray.origin.z + t * ray.direction.z;
        if y < self.y0 || y > self.y1 || z < self.z0 || z > self.z1 {
            return None;
        }

        let u = (y - self.y0) / (self.y1 - self.y0);
        let v = (z - self.z0) / (self.z1 - self.z0);
        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            Vec3::X,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            Point3::new(self.k, self.y0, self.z0),
            Point3::new(self.k, self.y1, self.z1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::pdf::{HittablePdf, Pdf};
    use glim_math::Color;

    fn white() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Color::ONE))
    }

    #[test]
    fn test_xy_rect_hit_and_uv() {
        let rect = XyRect::new(0.0, 2.0, 0.0, 4.0, 1.0, white());
        let ray = Ray::new(Point3::new(0.5, 1.0, 0.0), Vec3::Z);
        let rec = rect.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!((rec.u - 0.25).abs() < 1e-12);
        assert!((rec.v - 0.25).abs() < 1e-12);
        // The ray runs along +z into the +z outward normal, so this is a
        // back-face hit and the shading normal is flipped.
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_xy_rect_miss_outside_extent() {
        let rect = XyRect::new(0.0, 2.0, 0.0, 4.0, 1.0, white());
        let ray = Ray::new(Point3::new(3.0, 1.0, 0.0), Vec3::Z);
        assert!(rect.hit(&ray, 0.001, f64::INFINITY).is_none());
    }

    #[test]
    fn test_xz_rect_hit_from_below() {
        let rect = XzRect::new(-1.0, 1.0, -1.0, 1.0, 2.0, white());
        let ray = Ray::new(Point3::ZERO, Vec3::Y);
        let rec = rect.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert_eq!(rec.normal, -Vec3::Y);
    }

    #[test]
    fn test_yz_rect_hit_and_uv() {
        let rect = YzRect::new(0.0, 1.0, 0.0, 1.0, 5.0, white());
        let ray = Ray::new(Point3::new(0.0, 0.5, 0.25), Vec3::X);
        let rec = rect.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 5.0).abs() < 1e-12);
        assert!((rec.u - 0.5).abs() < 1e-12);
        assert!((rec.v - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_xz_rect_pdf_value_closed_form() {
        // Unit-area rect one unit above the origin, sampled straight up:
        // distance^2 = 1, cosine = 1, area = 1, so the density is exactly 1.
        let rect = XzRect::new(-0.5, 0.5, -0.5, 0.5, 1.0, white());
        let pdf = rect.pdf_value(Point3::ZERO, Vec3::Y);
        assert!((pdf - 1.0).abs() < 1e-12);

        // Doubling the distance quadruples the density.
        let rect = XzRect::new(-0.5, 0.5, -0.5, 0.5, 2.0, white());
        let pdf = rect.pdf_value(Point3::ZERO, Vec3::Y);
        assert!((pdf - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_xz_rect_pdf_zero_when_missed() {
        let rect = XzRect::new(-0.5, 0.5, -0.5, 0.5, 1.0, white());
        assert_eq!(rect.pdf_value(Point3::ZERO, -Vec3::Y), 0.0);
        assert_eq!(rect.pdf_value(Point3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_xz_rect_random_points_at_rect() {
        let rect = XzRect::new(-0.5, 0.5, -0.5, 0.5, 1.0, white());
        let mut sampler = Sampler::new(21);
        for _ in 0..500 {
            let d = rect.random(Point3::ZERO, &mut sampler);
            assert!((d.length() - 1.0).abs() < 1e-9);
            // Every sampled direction must actually reach the rect.
            assert!(rect
                .hit(&Ray::new(Point3::ZERO, d), 0.001, f64::INFINITY)
                .is_some());
        }
    }

    #[test]
    fn test_hittable_pdf_delegates_to_rect() {
        let rect = XzRect::new(-0.5, 0.5, -0.5, 0.5, 1.0, white());
        let pdf = HittablePdf::new(&rect, Point3::ZERO);
        assert!((pdf.value(Vec3::Y) - 1.0).abs() < 1e-12);

        let mut sampler = Sampler::new(22);
        let d = pdf.generate(&mut sampler);
        assert!(pdf.value(d) > 0.0);
    }
}
