//! Scene container tying together geometry, lights, camera and environment.
//!
//! The scene owns a flat list of hittables plus a separate list of the
//! objects the integrator should importance-sample as lights. Calling
//! [`Scene::init`] builds a BVH over the flat list; the accelerated world
//! is only rebuilt when geometry has changed since the last build.

use std::sync::Arc;
use std::time::Instant;

use glim_math::Color;

use crate::bvh::BvhNode;
use crate::camera::Camera;
use crate::hittable::{Hittable, HittableList};
use crate::sampler::Sampler;
use crate::texture::{SolidColor, Texture};

/// Seed for the sampler that drives BVH split-axis selection. Fixed so
/// identical scenes always produce an identical tree.
const BUILD_SEED: u64 = 42;

/// A renderable scene.
pub struct Scene {
    main_cam: Option<Camera>,
    skybox: Arc<dyn Texture>,
    raw_hittables: HittableList,
    lights: HittableList,
    world: Arc<dyn Hittable>,
    dirty: bool,
}

impl Scene {
    /// Create an empty scene with no camera and a black environment.
    pub fn new() -> Self {
        Self {
            main_cam: None,
            skybox: Arc::new(SolidColor::new(Color::ZERO)),
            raw_hittables: HittableList::new(),
            lights: HittableList::new(),
            world: Arc::new(HittableList::new()),
            dirty: false,
        }
    }

    /// Add an object to the scene. The acceleration structure is marked
    /// stale and will be rebuilt on the next [`Scene::init`].
    pub fn add_hittable(&mut self, object: Arc<dyn Hittable>) {
        self.raw_hittables.add(object);
        self.dirty = true;
    }

    /// Add every object of a list to the scene. Used for meshes, which
    /// expand into one hittable per triangle.
    pub fn add_hittables(&mut self, objects: HittableList) {
        for object in objects.objects {
            self.raw_hittables.add(object);
        }
        self.dirty = true;
    }

    /// Add a light. The object participates in normal intersection like
    /// any other hittable and is additionally importance-sampled by the
    /// integrator.
    pub fn add_light(&mut self, light: Arc<dyn Hittable>) {
        self.raw_hittables.add(light.clone());
        self.lights.add(light);
        self.dirty = true;
    }

    pub fn set_main_cam(&mut self, camera: Camera) {
        self.main_cam = Some(camera);
    }

    pub fn main_cam(&self) -> Option<&Camera> {
        self.main_cam.as_ref()
    }

    /// Replace the environment texture sampled by rays that escape the
    /// scene.
    pub fn set_skybox_texture(&mut self, texture: Arc<dyn Texture>) {
        self.skybox = texture;
    }

    pub fn skybox_texture(&self) -> &dyn Texture {
        self.skybox.as_ref()
    }

    /// Number of objects added so far, lights included.
    pub fn hittable_count(&self) -> usize {
        self.raw_hittables.len()
    }

    /// Objects the integrator samples directly.
    pub fn lights(&self) -> &HittableList {
        &self.lights
    }

    /// The accelerated geometry, valid after [`Scene::init`].
    pub fn world(&self) -> &dyn Hittable {
        self.world.as_ref()
    }

    /// Build the BVH over all added geometry. No-op when nothing changed
    /// since the previous build.
    pub fn init(&mut self) {
        if !self.dirty {
            return;
        }
        let start = Instant::now();
        let objects = self.raw_hittables.objects.clone();
        let count = objects.len();
        self.world = Arc::new(BvhNode::new(objects, &mut Sampler::new(BUILD_SEED)));
        self.dirty = false;
        log::info!("built BVH over {} objects in {:.2?}", count, start.elapsed());
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
