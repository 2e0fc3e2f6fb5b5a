//! Coherent 2D noise sources feeding the height field.
//!
//! The height field only needs a deterministic function from `(x, z)` to
//! `[0, 1]`. The default source is seeded Perlin noise with its own four
//! inner octaves (amplitude falloff 0.5 per octave), which gives the
//! characteristic soft rolling look. Constant noise is used for flat terrain
//! and for pinning down exact heights in tests.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::config::{NOISE_DETAIL_FALLOFF, NOISE_DETAIL_OCTAVES};

/// A deterministic coherent noise function.
pub trait NoiseSource: Send + Sync {
    /// Sample at `(x, z)`. Implementations return values in `[0, 1]` and the
    /// same value for the same coordinates on every call.
    fn sample(&self, x: f32, z: f32) -> f32;
}

/// Seeded fractal Perlin noise normalized to `[0, 1]`.
pub struct PerlinNoise {
    noise: FastNoiseLite,
    seed: i32,
}

impl PerlinNoise {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        // Coordinates arrive pre-scaled by the height field.
        noise.set_frequency(Some(1.0));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(NOISE_DETAIL_OCTAVES));
        noise.set_fractal_gain(Some(NOISE_DETAIL_FALLOFF));
        noise.set_fractal_lacunarity(Some(2.0));
        Self { noise, seed }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f32, z: f32) -> f32 {
        let raw = self.noise.get_noise_2d(x, z);
        // fBm Perlin outputs roughly [-1, 1]; normalize to [0, 1]
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Noise that returns the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_bounds() {
        let noise = PerlinNoise::new(7);
        for i in 0..200 {
            for j in 0..50 {
                let v = noise.sample(i as f32 * 0.37, j as f32 * 0.61);
                assert!((0.0..=1.0).contains(&v), "sample {v} out of bounds");
            }
        }
    }

    #[test]
    fn test_perlin_deterministic_for_seed() {
        let a = PerlinNoise::new(42);
        let b = PerlinNoise::new(42);
        for i in 0..100 {
            let (x, z) = (i as f32 * 0.13, i as f32 * 0.29);
            assert_eq!(a.sample(x, z), b.sample(x, z));
            assert_eq!(a.sample(x, z), a.sample(x, z));
        }
    }

    #[test]
    fn test_perlin_is_not_flat() {
        let noise = PerlinNoise::new(1);
        let samples: Vec<f32> = (0..100)
            .map(|i| noise.sample(i as f32 * 0.21, i as f32 * 0.17))
            .collect();
        let min = samples.iter().copied().fold(f32::INFINITY, f32::min);
        let max = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.05, "noise range too small: {min}..{max}");
    }

    #[test]
    fn test_constant_noise() {
        let noise = ConstantNoise(0.5);
        assert_eq!(noise.sample(0.0, 0.0), 0.5);
        assert_eq!(noise.sample(-12.0, 99.5), 0.5);
    }
}
