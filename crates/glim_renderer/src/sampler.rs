use glim_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random number source for one worker or one pixel.
///
/// Every random decision in the renderer draws from a `Sampler`, never from
/// a global generator. Seeding a fresh sampler per pixel from the render
/// seed and the pixel coordinates makes the image independent of tile size,
/// tile order and thread count.
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Sampler seeded directly, for scene-level work such as the BVH build.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sampler for a single pixel, decorrelated from its neighbors.
    ///
    /// The pixel coordinates are folded into the render seed and run
    /// through a splitmix64 finalizer so adjacent pixels land far apart
    /// in seed space.
    pub fn for_pixel(seed: u64, x: u32, y: u32) -> Self {
        let mut state = seed
            .wrapping_add((x as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
            .wrapping_add((y as u64).wrapping_mul(0xbf58_476d_1ce4_e5b9));
        state = (state ^ (state >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        state = (state ^ (state >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        state ^= state >> 31;
        Self::new(state)
    }

    /// Uniform draw in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Uniform draw in [min, max).
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    /// Uniform axis index in {0, 1, 2}, used by the BVH build.
    #[inline]
    pub fn next_axis(&mut self) -> usize {
        self.rng.gen_range(0..3)
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Rejection-sampled point in the unit disk on the xy plane.
    ///
    /// Used for the thin-lens aperture offset.
    pub fn in_unit_disk(&mut self) -> Vec3 {
        loop {
            let p = Vec3::new(self.next_range(-1.0, 1.0), self.next_range(-1.0, 1.0), 0.0);
            if p.length_squared() < 1.0 {
                return p;
            }
        }
    }
}
