//! Per-vertex brightness and the one-bit fill decision.
//!
//! Brightness does not use the real surface normal. Every vertex starts from
//! the same diffuse term (an up-facing normal against a fixed light), gains a
//! bonus proportional to its height, and is attenuated by its planar distance
//! from the rotation origin. The result is mapped from `[-1, 1]` to
//! `[0, 255]` and thresholded into black or white.

use bevy::math::{FloatExt, Vec3};

use crate::config::{FAR_ATTENUATION, HEIGHT_INFLUENCE, LIGHT_DIRECTION};

/// One of the two output colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    #[default]
    Black,
    White,
}

impl Fill {
    /// Luminance of the fill.
    pub fn value(self) -> u8 {
        match self {
            Fill::Black => 0,
            Fill::White => 255,
        }
    }

    /// White when `luminance` is strictly above `threshold`.
    pub fn from_luminance(luminance: f32, threshold: u8) -> Self {
        if luminance > f32::from(threshold) {
            Fill::White
        } else {
            Fill::Black
        }
    }
}

/// Lighting constants for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    diffuse: f32,
    height_scale: f32,
    falloff_distance: f32,
}

impl Lighting {
    /// Lighting for heights in `[0, height_scale]` drawn on a
    /// `canvas_size` canvas.
    pub fn new(height_scale: f32, canvas_size: f32) -> Self {
        Self {
            diffuse: diffuse_term(),
            height_scale,
            falloff_distance: canvas_size / 2.0,
        }
    }

    pub fn diffuse(&self) -> f32 {
        self.diffuse
    }

    /// Composite brightness before the luminance mapping, nominally `[-1, 1]`.
    pub fn brightness(&self, height: f32, rx: f32, rz: f32) -> f32 {
        let height_bonus = if self.height_scale == 0.0 {
            0.0
        } else {
            height.remap(0.0, self.height_scale, 0.0, HEIGHT_INFLUENCE)
        };
        let distance = (rx * rx + rz * rz).sqrt();
        // Not clamped: points past the falloff distance keep dimming.
        let attenuation = distance.remap(0.0, self.falloff_distance, 1.0, FAR_ATTENUATION);
        (self.diffuse + height_bonus) * attenuation
    }

    /// Output luminance of a vertex, `[0, 255]` while the composite
    /// brightness stays within `[-1, 1]`.
    pub fn luminance(&self, height: f32, rx: f32, rz: f32) -> f32 {
        self.brightness(height, rx, rz).remap(-1.0, 1.0, 0.0, 255.0)
    }
}

/// Dot product of the up normal with the normalized light direction.
pub fn diffuse_term() -> f32 {
    let [x, y, z] = LIGHT_DIRECTION;
    Vec3::Y.dot(Vec3::new(x, y, z).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lighting() -> Lighting {
        Lighting::new(20.0, 800.0)
    }

    #[test]
    fn test_diffuse_term() {
        // 0.5 / sqrt(2.25)
        assert!((diffuse_term() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_at_ground_level() {
        let lum = lighting().luminance(0.0, 0.0, 0.0);
        // (0.333 + 1) / 2 * 255
        assert!((lum - 170.0).abs() < 0.01, "got {lum}");
    }

    #[test]
    fn test_origin_at_full_height() {
        let l = lighting();
        let b = l.brightness(20.0, 0.0, 0.0);
        assert!((b - (1.0 / 3.0 + 0.3)).abs() < 1e-6);
        let lum = l.luminance(20.0, 0.0, 0.0);
        assert!((lum - 208.25).abs() < 0.01, "got {lum}");
    }

    #[test]
    fn test_attenuation_at_falloff_distance() {
        let l = lighting();
        // distance 400 → factor 0.5
        let b = l.brightness(0.0, 240.0, 320.0);
        assert!((b - (1.0 / 3.0) * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_attenuation_extrapolates_past_falloff() {
        let l = lighting();
        // distance 1200 → factor 1 - 0.5 * 3 = -0.5, brightness turns negative
        let b = l.brightness(0.0, 1200.0, 0.0);
        assert!((b + (1.0 / 3.0) * 0.5).abs() < 1e-6);
        let lum = l.luminance(0.0, 1200.0, 0.0);
        assert!(lum < 127.5);
    }

    #[test]
    fn test_luminance_within_byte_range_over_canvas() {
        let l = lighting();
        for h in [0.0, 10.0, 20.0] {
            for rx in [-400.0_f32, -100.0, 0.0, 250.0, 400.0] {
                for rz in [-400.0_f32, 0.0, 400.0] {
                    let b = l.brightness(h, rx, rz);
                    let lum = l.luminance(h, rx, rz);
                    if (-1.0..=1.0).contains(&b) {
                        assert!((0.0..=255.0).contains(&lum), "lum {lum} for b {b}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_height_scale_drops_height_term() {
        let l = Lighting::new(0.0, 800.0);
        let b = l.brightness(5.0, 0.0, 0.0);
        assert!((b - 1.0 / 3.0).abs() < 1e-6);
        assert!(b.is_finite());
    }

    #[test]
    fn test_fill_threshold_is_strict() {
        assert_eq!(Fill::from_luminance(128.0, 128), Fill::Black);
        assert_eq!(Fill::from_luminance(128.01, 128), Fill::White);
        assert_eq!(Fill::from_luminance(170.0, 255), Fill::Black);
        assert_eq!(Fill::from_luminance(0.0, 0), Fill::Black);
        assert_eq!(Fill::from_luminance(f32::NAN, 0), Fill::Black);
    }

    #[test]
    fn test_fill_values_are_binary() {
        assert_eq!(Fill::Black.value(), 0);
        assert_eq!(Fill::White.value(), 255);
    }
}
