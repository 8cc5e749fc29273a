use std::f64::consts::TAU;
use std::sync::Arc;

use glim_math::{Aabb, Point3, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;

/// A flat annulus in an xz plane with a +y outward normal.
///
/// `inner_radius` of zero gives a full disk; nonzero cuts a hole in the
/// middle. v runs from 1 at the inner edge to 0 at the rim, u is the angle
/// around the plane.
pub struct Disk {
    center: Point3,
    radius: f64,
    inner_radius: f64,
    material: Arc<dyn Material>,
}

impl Disk {
    pub fn new(
        center: Point3,
        radius: f64,
        inner_radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center,
            radius,
            inner_radius,
            material,
        }
    }
}

impl Hittable for Disk {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let t = (self.center.y - ray.origin.y) / ray.direction.y;
        if t > t_max || t < t_min {
            return None;
        }

        let hit_point = ray.at(t);
        let dist2 = (hit_point.x - self.center.x) * (hit_point.x - self.center.x)
            + (hit_point.z - self.center.z) * (hit_point.z - self.center.z);
        if dist2 > self.radius * self.radius || dist2 < self.inner_radius * self.inner_radius {
            return None;
        }

        let u = hit_point.z.atan2(hit_point.x) / TAU;
        let u = if u < 0.0 { u + 1.0 } else { u };
        let dist = dist2.sqrt();
        let v = 1.0 - (dist - self.inner_radius) / (self.radius - self.inner_radius);

        Some(HitRecord::new(
            ray,
            t,
            hit_point,
            Vec3::Y,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            self.center - Vec3::new(self.radius, 0.0, self.radius),
            self.center + Vec3::new(self.radius, 0.0, self.radius),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use glim_math::Color;

    fn ring() -> Disk {
        Disk::new(
            Point3::new(0.0, 1.0, 0.0),
            2.0,
            0.5,
            Arc::new(Lambertian::from_color(Color::ONE)),
        )
    }

    #[test]
    fn test_hit_within_annulus() {
        let disk = ring();
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::Y);
        let rec = disk.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert_eq!(rec.normal, -Vec3::Y);
        // Hit point (1, 1, 0): angle 0 so u = 0; radial distance 1 is a
        // third of the way from inner to rim, so v = 1 - 1/3.
        assert!((rec.u - 0.0).abs() < 1e-12);
        assert!((rec.v - (1.0 - 0.5 / 1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_miss_through_hole() {
        let disk = ring();
        let ray = Ray::new(Point3::new(0.25, 0.0, 0.0), Vec3::Y);
        assert!(disk.hit(&ray, 0.001, f64::INFINITY).is_none());
    }

    #[test]
    fn test_miss_past_rim() {
        let disk = ring();
        let ray = Ray::new(Point3::new(2.5, 0.0, 0.0), Vec3::Y);
        assert!(disk.hit(&ray, 0.001, f64::INFINITY).is_none());
    }

    #[test]
    fn test_u_wraps_for_negative_angles() {
        let disk = ring();
        // Hit point at (0, 1, -1): atan2(-1, 0) is negative, so u wraps
        // into [0, 1) as 0.75.
        let ray = Ray::new(Point3::new(0.0, 0.0, -1.0), Vec3::Y);
        let rec = disk.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.u - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box_is_thin_but_padded() {
        let disk = ring();
        let b = disk.bounding_box();
        assert_eq!(b.min.x, -2.0);
        assert_eq!(b.max.x, 2.0);
        assert!(b.max.y > b.min.y);
        assert!(b.max.y - b.min.y < 0.001);
    }
}
