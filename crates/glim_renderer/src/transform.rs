use std::sync::Arc;

use glim_math::{Aabb, DMat3, Point3, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};

/// Places a child hittable in the world with translation, rotation and
/// non-uniform scale, without touching the child's own coordinates.
///
/// Rays are mapped into the child's local space (inverse translate, inverse
/// rotate, inverse scale, then re-normalized), and hits are mapped back
/// out. `t` on the returned record is the world-space distance from the
/// ray origin, which matches the camera's unit-length ray directions.
pub struct Transform {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    scale: Vec3,
    rotation: DMat3,
    rotation_inv: DMat3,
    bbox: Aabb,
}

impl Transform {
    /// `rotation` is XYZ Euler angles in degrees; the forward rotation is
    /// applied as Rz * Ry * Rx.
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        let rotation_matrix = DMat3::from_rotation_z(rotation.z.to_radians())
            * DMat3::from_rotation_y(rotation.y.to_radians())
            * DMat3::from_rotation_x(rotation.x.to_radians());
        let rotation_inv = rotation_matrix.transpose();

        // Rotate the child's box corners, take the world-axis extremes,
        // then scale and translate the result.
        let child_box = object.bounding_box();
        let mut min = Point3::splat(f64::INFINITY);
        let mut max = Point3::splat(f64::NEG_INFINITY);
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let corner = Point3::new(
                        if i == 0 { child_box.min.x } else { child_box.max.x },
                        if j == 0 { child_box.min.y } else { child_box.max.y },
                        if k == 0 { child_box.min.z } else { child_box.max.z },
                    );
                    let tester = rotation_matrix * corner;
                    min = min.min(tester);
                    max = max.max(tester);
                }
            }
        }
        let bbox = Aabb::from_points(min * scale + offset, max * scale + offset);

        Self {
            object,
            offset,
            scale,
            rotation: rotation_matrix,
            rotation_inv,
            bbox,
        }
    }
}

impl Hittable for Transform {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let origin = self.rotation_inv * (ray.origin - self.offset) / self.scale;
        let direction = (self.rotation_inv * ray.direction / self.scale).normalize();
        let local_ray = Ray::new(origin, direction);

        let rec = self.object.hit(&local_ray, t_min, t_max)?;

        let p = self.rotation * (rec.p * self.scale) + self.offset;
        let outward_normal = self.rotation * (rec.normal / self.scale).normalize();
        // Local t is meaningless in world units after the scale, so measure
        // the distance directly.
        let t = (p - ray.origin).length();

        Some(HitRecord::new(
            ray,
            t,
            p,
            outward_normal,
            rec.u,
            rec.v,
            rec.material,
        ))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aarect::XyRect;
    use crate::material::Lambertian;
    use crate::sphere::Sphere;
    use glim_math::Color;

    fn unit_sphere() -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            Point3::ZERO,
            0.5,
            Arc::new(Lambertian::from_color(Color::ONE)),
        ))
    }

    #[test]
    fn test_translation_moves_hit() {
        let moved = Transform::new(
            unit_sphere(),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ONE,
        );
        let ray = Ray::new(Point3::new(5.0, 0.0, -5.0), Vec3::Z);
        let rec = moved.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 4.5).abs() < 1e-9);
        assert!((rec.p - Point3::new(5.0, 0.0, -0.5)).length() < 1e-9);
        assert!((rec.normal - -Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_rotation_reorients_geometry() {
        let rect = Arc::new(XyRect::new(
            -0.5,
            0.5,
            -0.5,
            0.5,
            0.0,
            Arc::new(Lambertian::from_color(Color::ONE)),
        ));
        // Rotate the xy rect 90 degrees about y so it faces along x.
        let turned = Transform::new(rect, Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0), Vec3::ONE);

        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::X);
        let rec = turned.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 5.0).abs() < 1e-9);
        assert!(rec.p.length() < 1e-9);
        assert!((rec.normal - -Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_scale_stretches_hit_point() {
        let stretched = Transform::new(
            unit_sphere(),
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(2.0, 1.0, 1.0),
        );
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::X);
        let rec = stretched.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-9);
        assert!((rec.p - Point3::new(-1.0, 0.0, 0.0)).length() < 1e-9);
        assert!((rec.normal - -Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_scaled_normal_stays_perpendicular() {
        // On a stretched sphere the normal is not just the scaled local
        // normal; hit a point off-axis and check it is still unit length.
        let stretched = Transform::new(
            unit_sphere(),
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(3.0, 1.0, 1.0),
        );
        let ray = Ray::new(Point3::new(0.4, 5.0, 0.0), -Vec3::Y);
        let rec = stretched.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.normal.length() - 1.0).abs() < 1e-9);
        assert!(rec.normal.y > 0.0);
    }

    #[test]
    fn test_bounding_box_translated() {
        let moved = Transform::new(
            unit_sphere(),
            Vec3::new(5.0, 1.0, 0.0),
            Vec3::ZERO,
            Vec3::ONE,
        );
        let b = moved.bounding_box();
        assert!((b.min - Point3::new(4.5, 0.5, -0.5)).length() < 1e-9);
        assert!((b.max - Point3::new(5.5, 1.5, 0.5)).length() < 1e-9);
    }

    #[test]
    fn test_bounding_box_covers_rotated_child() {
        let rect = Arc::new(XyRect::new(
            0.0,
            1.0,
            0.0,
            1.0,
            0.0,
            Arc::new(Lambertian::from_color(Color::ONE)),
        ));
        let turned = Transform::new(rect, Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0), Vec3::ONE);
        let b = turned.bounding_box();
        // The unit square in xy maps to a square in yz with x near zero.
        assert!(b.min.z < -0.99);
        assert!(b.max.z < 0.01);
        assert!(b.min.x.abs() < 0.01 && b.max.x.abs() < 0.01);
        assert!(b.min.y <= 0.0 && b.max.y >= 1.0);
    }
}
