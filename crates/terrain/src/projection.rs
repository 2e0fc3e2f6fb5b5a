//! Grid-to-screen transform: scale to world units, rotate about the vertical
//! axis, perspective-divide, then translate to the canvas center.
//!
//! Only X/Z are rotated. The height goes straight into screen Y, scaled by
//! the same perspective factor as X.
//!
//! The divide `d / (d + rz)` is not guarded. When `d + rz` approaches zero
//! the scale diverges and coordinates become huge or non-finite; the
//! rasterizer clips or skips those triangles instead.

use bevy::math::Vec2;

use crate::view_state::ViewState;

/// Per-frame constants of the transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    cos: f32,
    sin: f32,
    camera_distance: f32,
    cell_size: f32,
    center: f32,
}

/// A vertex after rotation and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Rotated world X, before the perspective divide.
    pub rx: f32,
    /// Rotated world Z (depth), before the perspective divide.
    pub rz: f32,
    /// Perspective factor `d / (d + rz)`.
    pub scale: f32,
    /// Canvas position in pixels.
    pub screen: Vec2,
}

impl Projection {
    /// Transform for a `grid_size` grid stretched over a `canvas_size` canvas.
    pub fn new(view: &ViewState, grid_size: usize, canvas_size: f32) -> Self {
        let (sin, cos) = view.angle().sin_cos();
        let cell_size = if grid_size == 0 {
            0.0
        } else {
            canvas_size / grid_size as f32
        };
        Self {
            cos,
            sin,
            camera_distance: view.camera_distance(),
            cell_size,
            center: canvas_size / 2.0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Rotate a world-space point about the vertical axis.
    #[inline]
    pub fn rotate(&self, world_x: f32, world_z: f32) -> (f32, f32) {
        (
            world_x * self.cos - world_z * self.sin,
            world_x * self.sin + world_z * self.cos,
        )
    }

    /// Project grid cell `(grid_x, grid_z)` lifted to `height`.
    #[inline]
    pub fn project(&self, grid_x: usize, grid_z: usize, height: f32) -> ProjectedPoint {
        let world_x = grid_x as f32 * self.cell_size;
        let world_z = grid_z as f32 * self.cell_size;
        let (rx, rz) = self.rotate(world_x, world_z);
        let scale = self.camera_distance / (self.camera_distance + rz);
        ProjectedPoint {
            rx,
            rz,
            scale,
            screen: Vec2::new(rx * scale + self.center, height * scale + self.center),
        }
    }
}

impl ProjectedPoint {
    /// True when the perspective divide blew up for this point.
    pub fn is_degenerate(&self) -> bool {
        !(self.screen.x.is_finite() && self.screen.y.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn view_with(angle: f32, distance: f32) -> ViewState {
        let mut view = ViewState::default();
        view.set_angle(angle).unwrap();
        view.set_camera_distance(distance);
        view
    }

    #[test]
    fn test_origin_lands_on_center() {
        let proj = Projection::new(&view_with(1.234, 400.0), 100, 800.0);
        let p = proj.project(0, 0, 0.0);
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.screen, Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_cell_size() {
        let proj = Projection::new(&ViewState::default(), 100, 800.0);
        assert_eq!(proj.cell_size(), 8.0);
        let proj = Projection::new(&ViewState::default(), 0, 800.0);
        assert_eq!(proj.cell_size(), 0.0);
    }

    #[test]
    fn test_unrotated_projection() {
        // angle 0: rx = worldX, rz = worldZ
        let proj = Projection::new(&view_with(0.0, 400.0), 100, 800.0);
        let p = proj.project(10, 50, 20.0);
        assert_eq!(p.rx, 80.0);
        assert_eq!(p.rz, 400.0);
        assert!((p.scale - 0.5).abs() < 1e-6);
        assert!((p.screen.x - (40.0 + 400.0)).abs() < 1e-4);
        assert!((p.screen.y - (10.0 + 400.0)).abs() < 1e-4);
    }

    #[test]
    fn test_quarter_turn_rotation() {
        let proj = Projection::new(&view_with(FRAC_PI_2, 400.0), 100, 800.0);
        let (rx, rz) = proj.rotate(100.0, 0.0);
        assert!(rx.abs() < 1e-4);
        assert!((rz - 100.0).abs() < 1e-4);
        let (rx, rz) = proj.rotate(0.0, 100.0);
        assert!((rx + 100.0).abs() < 1e-4);
        assert!(rz.abs() < 1e-4);
    }

    #[test]
    fn test_height_is_not_rotated() {
        let a = Projection::new(&view_with(0.0, 400.0), 10, 800.0).project(0, 0, 30.0);
        let b = Projection::new(&view_with(2.0, 400.0), 10, 800.0).project(0, 0, 30.0);
        assert_eq!(a.screen, b.screen);
        assert_eq!(a.screen.y, 430.0);
    }

    #[test]
    fn test_perspective_singularity_is_flagged() {
        // angle pi: rz = -worldZ, and worldZ = 1 * 100 cancels the distance
        let proj = Projection::new(&view_with(std::f32::consts::PI, 100.0), 8, 800.0);
        let p = proj.project(0, 1, 5.0);
        assert!(p.scale.abs() > 1e5 || !p.scale.is_finite());

        let exact = ProjectedPoint {
            rx: 1.0,
            rz: -100.0,
            scale: f32::INFINITY,
            screen: Vec2::new(f32::INFINITY, f32::NAN),
        };
        assert!(exact.is_degenerate());
        assert!(!proj.project(0, 0, 5.0).is_degenerate());
    }
}
