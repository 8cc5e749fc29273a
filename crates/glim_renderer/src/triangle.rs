use std::sync::Arc;

use glim_math::{Aabb, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::mesh::Mesh;

/// One face of a [`Mesh`], counter-clockwise winding.
///
/// Holds only the parent mesh and a face index; vertex data is read from
/// the mesh on every hit. The face normal and bounding box are the only
/// precomputed pieces.
pub struct Triangle {
    mesh: Arc<Mesh>,
    face: usize,
    normal: Vec3,
    bbox: Aabb,
}

impl Triangle {
    pub(crate) fn new(mesh: Arc<Mesh>, face: usize) -> Self {
        let v0 = mesh.position(face, 0);
        let v1 = mesh.position(face, 1);
        let v2 = mesh.position(face, 2);
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        let bbox = Aabb::from_points(v0.min(v1).min(v2), v0.max(v1).max(v2));
        Self {
            mesh,
            face,
            normal,
            bbox,
        }
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let v0 = self.mesh.position(self.face, 0);
        let v1 = self.mesh.position(self.face, 1);
        let v2 = self.mesh.position(self.face, 2);

        let denom = self.normal.dot(ray.direction);
        if denom == 0.0 {
            return None;
        }

        // Solve for the intersection with the face plane n . p = d.
        let d = self.normal.dot(v0);
        let t = (d - self.normal.dot(ray.origin)) / denom;
        if t > t_max || t < t_min {
            return None;
        }
        let p = ray.at(t);

        // The point is inside iff it lies to the left of all three edges.
        if (v1 - v0).cross(p - v0).dot(self.normal) < 0.0 {
            return None;
        }
        if (v2 - v1).cross(p - v1).dot(self.normal) < 0.0 {
            return None;
        }
        if (v0 - v2).cross(p - v2).dot(self.normal) < 0.0 {
            return None;
        }

        // Barycentric weights from the opposing sub-triangle areas.
        let total2 = (v1 - v0).cross(v2 - v0).length();
        let wa = (p - v2).cross(p - v1).length() / total2;
        let wb = (p - v0).cross(p - v2).length() / total2;
        let wc = (p - v1).cross(p - v0).length() / total2;

        let (u, v) = if self.mesh.has_uvs() {
            let uv = self.mesh.uv(self.face, 0) * wa
                + self.mesh.uv(self.face, 1) * wb
                + self.mesh.uv(self.face, 2) * wc;
            (uv.x, uv.y)
        } else {
            (0.0, 0.0)
        };

        let outward_normal = if self.mesh.has_normals() && self.mesh.smooth_shading() {
            (self.mesh.normal(self.face, 0) * wa
                + self.mesh.normal(self.face, 1) * wb
                + self.mesh.normal(self.face, 2) * wc)
                .normalize()
        } else {
            self.normal
        };

        Some(HitRecord::new(
            ray,
            t,
            p,
            outward_normal,
            u,
            v,
            self.mesh.material(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::mesh::RawMeshInfo;
    use glim_math::{Color, DMat4, DVec2, Point3, Vec3};

    fn single_triangle(info_extra: impl FnOnce(&mut RawMeshInfo), smooth: bool) -> Arc<Mesh> {
        let mut info = RawMeshInfo {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            position_indices: vec![0, 1, 2],
            ..Default::default()
        };
        info_extra(&mut info);
        Arc::new(Mesh::new(
            info,
            DMat4::IDENTITY,
            smooth,
            Arc::new(Lambertian::from_color(Color::ONE)),
        ))
    }

    #[test]
    fn test_hit_at_centroid() {
        let mesh = single_triangle(|_| {}, false);
        let tri = Triangle::new(Arc::clone(&mesh), 0);

        let ray = Ray::new(Point3::new(1.0 / 3.0, 1.0 / 3.0, 1.0), -Vec3::Z);
        let rec = tri.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
        // No uvs authored: they default to zero.
        assert_eq!((rec.u, rec.v), (0.0, 0.0));
    }

    #[test]
    fn test_miss_outside_hypotenuse() {
        let mesh = single_triangle(|_| {}, false);
        let tri = Triangle::new(Arc::clone(&mesh), 0);

        let ray = Ray::new(Point3::new(0.7, 0.7, 1.0), -Vec3::Z);
        assert!(tri.hit(&ray, 0.001, f64::INFINITY).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let mesh = single_triangle(|_| {}, false);
        let tri = Triangle::new(Arc::clone(&mesh), 0);

        let ray = Ray::new(Point3::new(0.2, 0.2, 1.0), Vec3::X);
        assert!(tri.hit(&ray, 0.001, f64::INFINITY).is_none());
    }

    #[test]
    fn test_uv_interpolation_is_barycentric() {
        let mesh = single_triangle(
            |info| {
                info.uvs = vec![
                    DVec2::new(0.0, 0.0),
                    DVec2::new(1.0, 0.0),
                    DVec2::new(0.0, 1.0),
                ];
                info.uv_indices = vec![0, 1, 2];
            },
            false,
        );
        let tri = Triangle::new(Arc::clone(&mesh), 0);

        // With these corner uvs the interpolated uv equals the hit point's
        // xy coordinates.
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), -Vec3::Z);
        let rec = tri.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.u - 0.25).abs() < 1e-9);
        assert!((rec.v - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_smooth_shading_interpolates_normals() {
        let tilt = |x: f64, y: f64| Vec3::new(x, y, 1.0).normalize();
        let mesh = single_triangle(
            |info| {
                info.normals = vec![tilt(-1.0, 0.0), tilt(1.0, 0.0), tilt(0.0, 1.0)];
                info.normal_indices = vec![0, 1, 2];
            },
            true,
        );
        let tri = Triangle::new(Arc::clone(&mesh), 0);

        // At the centroid all weights are equal, so the x tilts cancel and
        // a third of the y tilt remains.
        let ray = Ray::new(Point3::new(1.0 / 3.0, 1.0 / 3.0, 1.0), -Vec3::Z);
        let rec = tri.hit(&ray, 0.001, f64::INFINITY).unwrap();
        let expected = Vec3::new(0.0, 1.0, 3.0).normalize();
        assert!((rec.normal - expected).length() < 1e-9);
    }

    #[test]
    fn test_flat_shading_ignores_vertex_normals() {
        let mesh = single_triangle(
            |info| {
                info.normals = vec![Vec3::X, Vec3::X, Vec3::X];
                info.normal_indices = vec![0, 1, 2];
            },
            false,
        );
        let tri = Triangle::new(Arc::clone(&mesh), 0);

        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), -Vec3::Z);
        let rec = tri.hit(&ray, 0.001, f64::INFINITY).unwrap();
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_bounding_box_covers_vertices_with_padding() {
        let mesh = single_triangle(|_| {}, false);
        let tri = Triangle::new(Arc::clone(&mesh), 0);
        let b = tri.bounding_box();
        assert!(b.min.x <= 0.0 && b.max.x >= 1.0);
        assert!(b.min.y <= 0.0 && b.max.y >= 1.0);
        // The z extent is degenerate but the box still has thickness.
        assert!(b.max.z > b.min.z);
    }
}
