use glim_math::{Point3, Ray, Vec3};

use crate::sampler::Sampler;

/// Thin-lens perspective camera.
///
/// `get_ray` takes film coordinates (s, t) in [0, 1] with (0, 0) at the
/// lower-left corner of the viewport. Ray directions are unit length;
/// downstream code (the transform wrapper in particular) relies on that
/// when it measures distances along rays.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    origin: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left_corner: Point3,
    u: Vec3,
    v: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// `vfov` is the vertical field of view in degrees. `focus_dist` sets
    /// the plane of perfect focus; `aperture` is the lens diameter, zero
    /// for a pinhole.
    pub fn new(
        look_from: Point3,
        look_at: Point3,
        vup: Vec3,
        vfov: f64,
        aspect_ratio: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Self {
            origin,
            horizontal,
            vertical,
            lower_left_corner,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    pub fn get_ray(&self, s: f64, t: f64, sampler: &mut Sampler) -> Ray {
        let rd = self.lens_radius * sampler.in_unit_disk();
        let offset = self.u * rd.x + self.v * rd.y;
        Ray::new(
            self.origin + offset,
            (self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset)
                .normalize(),
        )
    }
}
