//! Live viewing parameters: rotation, zoom and the shading threshold.
//!
//! Nothing here triggers regeneration. Pointer input and the per-frame
//! rotation write these fields directly; the renderer reads them once per
//! frame.

use crate::config::{
    DEFAULT_CAMERA_DISTANCE, DEFAULT_ROTATION_SPEED, DEFAULT_THRESHOLD, DRAG_SENSITIVITY,
    MAX_CAMERA_DISTANCE, MIN_CAMERA_DISTANCE,
};
use crate::error::{ensure_finite, TerrainError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Rotation about the vertical axis in radians. Unbounded.
    angle: f32,
    /// Radians added to `angle` every frame.
    rotation_speed: f32,
    /// Perspective divisor, always within `[MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE]`.
    camera_distance: f32,
    /// Luminance above which a vertex is filled white.
    threshold: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ViewState {
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Advance the automatic rotation by one frame.
    pub fn advance(&mut self) {
        self.angle += self.rotation_speed;
    }

    /// Horizontal pointer drag of `dx` pixels.
    pub fn apply_drag(&mut self, dx: f32) {
        if dx.is_finite() {
            self.angle += dx * DRAG_SENSITIVITY;
        }
    }

    /// Scroll by `delta` pixels; positive moves the camera away.
    pub fn apply_scroll(&mut self, delta: f32) {
        if delta.is_finite() {
            self.set_camera_distance(self.camera_distance + delta);
        }
    }

    pub fn set_angle(&mut self, angle: f32) -> Result<(), TerrainError> {
        self.angle = ensure_finite("angle", angle)?;
        Ok(())
    }

    pub fn set_rotation_speed(&mut self, speed: f32) -> Result<(), TerrainError> {
        self.rotation_speed = ensure_finite("rotation speed", speed)?;
        Ok(())
    }

    /// Set the camera distance, clamped into the allowed range. NaN is ignored.
    pub fn set_camera_distance(&mut self, distance: f32) {
        if !distance.is_nan() {
            self.camera_distance = distance.clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
        }
    }

    pub fn set_threshold(&mut self, threshold: i64) -> Result<(), TerrainError> {
        self.threshold =
            u8::try_from(threshold).map_err(|_| TerrainError::ThresholdOutOfRange(threshold))?;
        Ok(())
    }
}
