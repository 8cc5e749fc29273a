use std::f64::consts::TAU;
use std::sync::Arc;

use glim_math::{Color, Point3};

/// Source of surface color, looked up by surface UV and hit point.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A texture with the same color everywhere.
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.color
    }
}

/// Checkerboard over the surface UVs, eight squares per UV period.
pub struct CheckerTexture {
    odd: Arc<dyn Texture>,
    even: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(odd: Arc<dyn Texture>, even: Arc<dyn Texture>) -> Self {
        Self { odd, even }
    }

    pub fn from_colors(c1: Color, c2: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(c1)), Arc::new(SolidColor::new(c2)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let frequency = 8.0;
        // The sign of the sines alternates in a checker pattern.
        let sines = (frequency * u * TAU).sin() * (frequency * v * TAU).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Nearest-neighbor lookup into an 8-bit RGB image.
///
/// Rows are stored top to bottom, so v is flipped at lookup time to match
/// the renderer's bottom-up convention.
pub struct ImageTexture {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

const BYTES_PER_PIXEL: usize = 3;

impl ImageTexture {
    /// Wrap a raw RGB8 buffer. An empty buffer is allowed and produces the
    /// debug color, so a failed image load can degrade visibly instead of
    /// aborting the render.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        if self.data.is_empty() {
            return Color::new(0.5, 0.0, 0.5);
        }

        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let mut i = (u * self.width as f64) as usize;
        let mut j = (v * self.height as f64) as usize;
        if i >= self.width as usize {
            i = self.width as usize - 1;
        }
        if j >= self.height as usize {
            j = self.height as usize - 1;
        }

        let color_scale = 1.0 / 255.0;
        let pixel = (j * self.width as usize + i) * BYTES_PER_PIXEL;
        Color::new(
            color_scale * self.data[pixel] as f64,
            color_scale * self.data[pixel + 1] as f64,
            color_scale * self.data[pixel + 2] as f64,
        )
    }
}
