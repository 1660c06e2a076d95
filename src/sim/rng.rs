//! Seeded random source for the simulation

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform integer and float draws over a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Integer in `[min, max)`. An empty range yields `min`.
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// Float in the half-open range between the bounds, which may come in
    /// either order. Equal bounds yield `min`.
    pub fn float(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if lo == hi || !lo.is_finite() || !hi.is_finite() {
            return min;
        }
        self.rng.random_range(lo..hi)
    }

    /// Whole-degree angle in `[0, 360)`
    pub fn angle_degrees(&mut self) -> f32 {
        self.int(0, 360) as f32
    }

    /// Uniformly chosen element. Returns `None` for an empty slice.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..items.len());
        Some(items[index])
    }

    /// Fair coin
    pub fn coin(&mut self) -> bool {
        self.int(0, 2) == 0
    }
}
