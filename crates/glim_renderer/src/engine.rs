//! Multithreaded tile renderer.
//!
//! [`RenderEngine::init`] partitions the film into tiles and queues them.
//! [`RenderEngine::execute`] spawns a worker per configured thread; each
//! worker pulls tiles until the queue is empty, traces every pixel of the
//! tile, and merges the result into the shared film.
//!
//! Pixels are seeded individually from the settings seed and their film
//! coordinates, so the output is identical for any tile size and thread
//! count.

use std::sync::Arc;

use glim_math::Color;

use crate::arena::MemoryArena;
use crate::camera::Camera;
use crate::error::RenderError;
use crate::film::{Film, Tile, TileQueue};
use crate::integrator::ray_color;
use crate::sampler::Sampler;
use crate::scene::Scene;

/// Settings for a render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub threads: u32,
    pub tile_size: u32,
    /// Base seed for per-pixel sampler streams.
    pub seed: u64,
}

impl RenderSettings {
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            ..Self::default()
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.image_width as f64 / self.image_height as f64
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            samples_per_pixel: 20,
            threads: 4,
            tile_size: 64,
            seed: 0,
        }
    }
}

/// Tile-based multithreaded renderer.
pub struct RenderEngine {
    film: Option<Arc<Film>>,
    tiles: Option<Arc<TileQueue>>,
    has_initialized: bool,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self {
            film: None,
            tiles: None,
            has_initialized: false,
        }
    }

    /// Allocate the film and queue the tile partition. Must be called
    /// before [`RenderEngine::execute`].
    pub fn init(&mut self, settings: &RenderSettings) {
        let film = Arc::new(Film::new(settings.image_width, settings.image_height));
        let tiles = Arc::new(TileQueue::new());
        for tile in partition_tiles(
            settings.image_width,
            settings.image_height,
            settings.tile_size,
        ) {
            tiles.push(tile);
        }
        self.film = Some(film);
        self.tiles = Some(tiles);
        self.has_initialized = true;
    }

    /// Render the scene into the film.
    ///
    /// Builds the scene's BVH if geometry changed, then drains the tile
    /// queue across `settings.threads` workers. Fails without spawning
    /// anything if the engine is uninitialized, the scene has no camera,
    /// or the scene has no geometry.
    pub fn execute(
        &mut self,
        settings: &RenderSettings,
        scene: &mut Scene,
    ) -> Result<(), RenderError> {
        if !self.has_initialized {
            return Err(RenderError::NotInitialized);
        }
        if scene.main_cam().is_none() {
            return Err(RenderError::MissingCamera);
        }
        if scene.hittable_count() == 0 {
            return Err(RenderError::EmptyScene);
        }

        scene.init();
        let scene: &Scene = scene;
        let camera = *scene.main_cam().ok_or(RenderError::MissingCamera)?;

        let (film, tiles) = match (&self.film, &self.tiles) {
            (Some(film), Some(tiles)) => (Arc::clone(film), Arc::clone(tiles)),
            _ => return Err(RenderError::NotInitialized),
        };

        let thread_count = settings.threads.max(1);
        log::info!(
            "rendering {} tiles on {} threads",
            tiles.remaining(),
            thread_count
        );

        std::thread::scope(|scope| {
            for _ in 0..thread_count {
                let film = Arc::clone(&film);
                let tiles = Arc::clone(&tiles);
                let settings = *settings;
                scope.spawn(move || {
                    let mut arena = MemoryArena::default();
                    while let Some(mut tile) = tiles.pop() {
                        render_tile(&mut tile, scene, &camera, &settings, &arena);
                        film.write_tile(&tile);
                        log::debug!(
                            "tile ({}, {}) done, {} queued",
                            tile.left,
                            tile.top,
                            tiles.remaining()
                        );
                        arena.reset();
                    }
                });
            }
        });

        Ok(())
    }

    /// The film of the last [`RenderEngine::init`], if any.
    pub fn film(&self) -> Option<Arc<Film>> {
        self.film.clone()
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Split the image into row-major tiles starting at the top-left film
/// coordinate, clipping tiles at the right and bottom edges.
fn partition_tiles(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    let tile_size = tile_size.max(1);
    let mut tiles = Vec::new();
    let mut remaining_height = height;
    while remaining_height > 0 {
        let tile_height = tile_size.min(remaining_height);
        let top = height - remaining_height;
        let mut remaining_width = width;
        while remaining_width > 0 {
            let tile_width = tile_size.min(remaining_width);
            let left = width - remaining_width;
            tiles.push(Tile::new(top, left, tile_width, tile_height));
            remaining_width -= tile_width;
        }
        remaining_height -= tile_height;
    }
    tiles
}

/// Trace every pixel of a tile into its local storage.
fn render_tile(
    tile: &mut Tile,
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    arena: &MemoryArena,
) {
    for y in tile.top..tile.top + tile.height {
        for x in tile.left..tile.left + tile.width {
            let mut sampler = Sampler::for_pixel(settings.seed, x, y);
            let mut color = Color::ZERO;
            for _ in 0..settings.samples_per_pixel {
                let s = (x as f64 + sampler.next_f64()) / (settings.image_width - 1) as f64;
                let t = (y as f64 + sampler.next_f64()) / (settings.image_height - 1) as f64;
                let ray = camera.get_ray(s, t, &mut sampler);
                color += ray_color(&ray, scene, arena, &mut sampler, 0);
            }
            let index = tile.index(x, y);
            tile.colors[index] = color / settings.samples_per_pixel as f64;
        }
    }
}
