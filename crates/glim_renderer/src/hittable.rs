use std::sync::Arc;

use glim_math::{Aabb, Point3, Ray, Vec3};

use crate::material::Material;
use crate::sampler::Sampler;

/// Everything the integrator needs to know about a ray-surface intersection.
///
/// The normal always faces against the incoming ray; `front_face` records
/// whether that meant flipping the geometric outward normal, which is how
/// dielectrics tell entering from exiting.
pub struct HitRecord<'a> {
    pub p: Point3,
    pub normal: Vec3,
    pub material: &'a dyn Material,
    pub t: f64,
    pub u: f64,
    pub v: f64,
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal, orienting it
    /// against the ray.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ray: &Ray,
        t: f64,
        p: Point3,
        outward_normal: Vec3,
        u: f64,
        v: f64,
        material: &'a dyn Material,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            material,
            t,
            u,
            v,
            front_face,
        }
    }
}

/// Anything a ray can intersect.
///
/// `bounding_box` is mandatory and infallible: every hittable in this
/// renderer has finite bounds, so the BVH build never has to handle an
/// unbounded primitive. The `pdf_value`/`random` pair is only meaningful for
/// light-shaped hittables; the defaults make everything else contribute
/// nothing to light sampling.
pub trait Hittable: Send + Sync {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>>;

    fn bounding_box(&self) -> Aabb;

    /// Probability density of sampling `direction` from `origin` towards
    /// this object, with respect to solid angle.
    fn pdf_value(&self, _origin: Point3, _direction: Vec3) -> f64 {
        0.0
    }

    /// Random direction from `origin` towards this object.
    fn random(&self, _origin: Point3, _sampler: &mut Sampler) -> Vec3 {
        Vec3::X
    }
}

/// A flat collection of hittables, itself hittable.
///
/// Keeps its bounding box up to date as objects are added so the scene can
/// hand a finished list to the BVH build without another pass.
#[derive(Default)]
pub struct HittableList {
    pub objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let mut closest_so_far = t_max;
        let mut closest_hit = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, t_min, closest_so_far) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3) -> f64 {
        if self.objects.is_empty() {
            return 0.0;
        }
        let weight = 1.0 / self.objects.len() as f64;
        self.objects
            .iter()
            .map(|object| weight * object.pdf_value(origin, direction))
            .sum()
    }

    fn random(&self, origin: Point3, sampler: &mut Sampler) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }
        let index = sampler.next_index(self.objects.len());
        self.objects[index].random(origin, sampler)
    }
}
