use crate::{Point3, Ray};

/// Axis-aligned bounding box, stored as min/max corners.
///
/// Used by the BVH and by every hittable's `bounding_box`. Boxes built
/// through [`Aabb::from_points`] are padded so no axis is thinner than
/// `MIN_AXIS_WIDTH`, which keeps the slab test reliable for flat geometry
/// such as axis-aligned rectangles and triangles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

/// Padding applied to degenerate axes so flat boxes still have volume.
const MIN_AXIS_WIDTH: f64 = 1e-4;

impl Aabb {
    /// The empty box: the identity for [`Aabb::surrounding`].
    ///
    /// min is +infinity and max is -infinity on every axis, so any union with
    /// it yields the other box and the slab test can never report a hit.
    pub const EMPTY: Aabb = Aabb {
        min: Point3::splat(f64::INFINITY),
        max: Point3::splat(f64::NEG_INFINITY),
    };

    /// Create a box from two opposite corners, padding degenerate axes.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        let mut min = a.min(b);
        let mut max = a.max(b);
        for axis in 0..3 {
            if max[axis] - min[axis] < MIN_AXIS_WIDTH {
                min[axis] -= MIN_AXIS_WIDTH / 2.0;
                max[axis] += MIN_AXIS_WIDTH / 2.0;
            }
        }
        Self { min, max }
    }

    /// Smallest box containing both inputs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Aabb {
        Aabb {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Slab intersection test: does the ray pass through this box anywhere
    /// in [t_min, t_max]?
    ///
    /// Divides by the direction component directly. A zero component gives
    /// IEEE infinities which fall out of the interval comparison correctly,
    /// so parallel rays need no special case.
    pub fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> bool {
        let mut t_min = t_min;
        let mut t_max = t_max;
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = if t0 > t_min { t0 } else { t_min };
            t_max = if t1 < t_max { t1 } else { t_max };
            if t_max <= t_min {
                return false;
            }
        }
        true
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
