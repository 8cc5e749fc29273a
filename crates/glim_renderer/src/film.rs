//! Film buffer and tile bookkeeping for the render loop.
//!
//! The image is partitioned into tiles. Workers pull tiles from a shared
//! queue, render into tile-local storage, then merge the finished tile
//! into the film under its mutex. Row 0 of the film is the bottom of the
//! image, matching the camera's viewport parameterization.

use std::collections::VecDeque;
use std::sync::Mutex;

use glim_math::Color;

/// A rectangular region of the film plus its local pixel storage.
///
/// `top`/`left` are film coordinates of the tile origin. Local storage is
/// row-major, `width * height` entries.
#[derive(Debug, Clone)]
pub struct Tile {
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
    pub colors: Vec<Color>,
}

impl Tile {
    pub fn new(top: u32, left: u32, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
            colors: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Local storage index for the film pixel `(x, y)`. The pixel must lie
    /// inside the tile.
    pub fn index(&self, x: u32, y: u32) -> usize {
        ((y - self.top) * self.width + x - self.left) as usize
    }
}

/// Work queue the render workers drain.
#[derive(Default)]
pub struct TileQueue {
    queue: Mutex<VecDeque<Tile>>,
}

impl TileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, tile: Tile) {
        self.queue.lock().unwrap().push_back(tile);
    }

    /// Take the next tile, or `None` once the queue is drained.
    pub fn pop(&self) -> Option<Tile> {
        self.queue.lock().unwrap().pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}

/// Accumulated render output in linear color.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Mutex<Vec<Color>>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: Mutex::new(vec![Color::ZERO; (width * height) as usize]),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Merge a finished tile. The tile must lie inside the film.
    pub fn write_tile(&self, tile: &Tile) {
        let mut pixels = self.pixels.lock().unwrap();
        for j in 0..tile.height {
            for i in 0..tile.width {
                let film_index = ((j + tile.top) * self.width + i + tile.left) as usize;
                pixels[film_index] = tile.colors[(j * tile.width + i) as usize];
            }
        }
    }

    /// Snapshot of the current pixel buffer.
    pub fn pixels(&self) -> Vec<Color> {
        self.pixels.lock().unwrap().clone()
    }

    /// Convert to packed 8-bit RGB rows, bottom row first, with gamma 2
    /// encoding.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let pixels = self.pixels.lock().unwrap();
        let mut data = Vec::with_capacity(pixels.len() * 3);
        for color in pixels.iter() {
            data.push(encode_channel(color.x));
            data.push(encode_channel(color.y));
            data.push(encode_channel(color.z));
        }
        data
    }
}

/// Gamma-encode one linear channel to a byte. Negative values, which
/// refraction can produce through the specular weighting, map to zero
/// rather than NaN.
#[inline]
fn encode_channel(linear: f64) -> u8 {
    let gamma = if linear > 0.0 { linear.sqrt() } else { 0.0 };
    (255.0 * gamma.clamp(0.0, 1.0)) as u8
}
