//! Bounding volume hierarchy over the scene's hittables.
//!
//! Median-count splits on a randomly chosen axis, rebuilt from scratch
//! whenever the scene changes. Intersection cost is what matters here;
//! build cost is a rounding error next to a render.

use std::cmp::Ordering;
use std::sync::Arc;

use glim_math::{Aabb, Ray};

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::sampler::Sampler;

/// A binary tree node. `right` is absent for single-object leaves, so every
/// object is owned exactly once in the tree.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Option<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a tree over `objects`. Axis choices come from the sampler, so
    /// the same seed reproduces the same tree.
    pub fn new(objects: Vec<Arc<dyn Hittable>>, sampler: &mut Sampler) -> Self {
        if objects.is_empty() {
            // Degenerate tree: an empty leaf whose box rejects every ray.
            return Self {
                left: Arc::new(HittableList::new()),
                right: None,
                bbox: Aabb::EMPTY,
            };
        }
        Self::build(objects, sampler)
    }

    fn build(mut objects: Vec<Arc<dyn Hittable>>, sampler: &mut Sampler) -> Self {
        let axis = sampler.next_axis();
        let comparator = |a: &Arc<dyn Hittable>, b: &Arc<dyn Hittable>| {
            a.bounding_box().min[axis]
                .partial_cmp(&b.bounding_box().min[axis])
                .unwrap_or(Ordering::Equal)
        };

        match objects.len() {
            1 => {
                let left = objects.remove(0);
                let bbox = left.bounding_box();
                Self {
                    left,
                    right: None,
                    bbox,
                }
            }
            2 => {
                objects.sort_unstable_by(comparator);
                let right = objects.remove(1);
                let left = objects.remove(0);
                let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
                Self {
                    left,
                    right: Some(right),
                    bbox,
                }
            }
            len => {
                objects.sort_unstable_by(comparator);
                let right_objects = objects.split_off(len / 2);
                let left: Arc<dyn Hittable> = Arc::new(Self::build(objects, sampler));
                let right: Arc<dyn Hittable> = Arc::new(Self::build(right_objects, sampler));
                let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
                Self {
                    left,
                    right: Some(right),
                    bbox,
                }
            }
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, t_min, t_max) {
            return None;
        }

        let hit_left = self.left.hit(ray, t_min, t_max);
        // The right subtree only needs to beat the left's hit.
        let right_t_max = hit_left.as_ref().map_or(t_max, |rec| rec.t);
        let hit_right = self
            .right
            .as_ref()
            .and_then(|right| right.hit(ray, t_min, right_t_max));

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
