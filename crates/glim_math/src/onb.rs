use crate::Vec3;

/// Orthonormal basis around a normal direction.
///
/// Built from a single vector `w`; the other two axes are chosen to be
/// perpendicular. Lets sampling code work in a local frame where `w` is
/// "up" and then map the result back to world space.
#[derive(Debug, Copy, Clone)]
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    /// Build an orthonormal basis whose w axis points along `n`.
    pub fn build_from_w(n: Vec3) -> Self {
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self { u, v, w }
    }

    /// Map local coordinates (a, b, c) into world space.
    pub fn local(&self, a: f64, b: f64, c: f64) -> Vec3 {
        a * self.u + b * self.v + c * self.w
    }

    /// Map a local-space vector into world space.
    pub fn local_vec(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}
