//! Square grid of terrain heights synthesized from three noise octaves.
//!
//! Each cell samples the noise source at the base frequency, double and
//! quadruple, weights the samples `0.5 / 0.25 / 0.125` and maps the sum from
//! `[0, 0.875]` onto `[0, height_scale]`. Regeneration is a full recompute:
//! the new grid is built off to the side and swapped in whole, so a reader
//! never observes a half-updated field.

use bevy::math::FloatExt;

use crate::config::{OCTAVE_FREQUENCIES, OCTAVE_WEIGHTS, OCTAVE_WEIGHT_SUM};
use crate::noise::NoiseSource;

#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    size: usize,
    /// The height scale the current heights were mapped onto.
    height_scale: f32,
    /// Row-major by `z`: index `z * size + x`.
    heights: Vec<f32>,
}

impl HeightField {
    /// A flat field of `size x size` zero heights.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            height_scale: 0.0,
            heights: vec![0.0; size * size],
        }
    }

    /// Build a field from scratch.
    pub fn generate(
        size: usize,
        noise: &dyn NoiseSource,
        noise_scale: f32,
        height_scale: f32,
    ) -> Self {
        let mut heights = Vec::with_capacity(size * size);
        for z in 0..size {
            for x in 0..size {
                let raw = octave_sum(noise, x as f32, z as f32, noise_scale);
                heights.push(raw.remap(0.0, OCTAVE_WEIGHT_SUM, 0.0, height_scale));
            }
        }
        Self {
            size,
            height_scale,
            heights,
        }
    }

    /// Recompute every cell for new parameters, keeping the grid size.
    pub fn regenerate(&mut self, noise: &dyn NoiseSource, noise_scale: f32, height_scale: f32) {
        *self = Self::generate(self.size, noise, noise_scale, height_scale);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Height at grid cell `(x, z)`.
    ///
    /// Panics if the cell is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        debug_assert!(x < self.size && z < self.size);
        self.heights[z * self.size + x]
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Lowest and highest height in the field, `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.heights.iter().fold(None, |acc, &h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }
}

/// Weighted three-octave sample, in `[0, OCTAVE_WEIGHT_SUM]` for a `[0, 1]`
/// noise source.
fn octave_sum(noise: &dyn NoiseSource, x: f32, z: f32, noise_scale: f32) -> f32 {
    OCTAVE_FREQUENCIES
        .iter()
        .zip(OCTAVE_WEIGHTS.iter())
        .map(|(&freq, &weight)| {
            let s = noise_scale * freq;
            noise.sample(x * s, z * s) * weight
        })
        .sum()
}
