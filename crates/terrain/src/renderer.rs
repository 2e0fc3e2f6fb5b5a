//! Per-frame strip mesh: projection and shading of every grid vertex.
//!
//! Rows `z = 0 .. N-2` each become one triangle strip. Walking the columns,
//! a strip takes `(x, z)` then `(x, z + 1)`, so consecutive triangles share
//! an edge and every strip holds `2N` vertices. Nothing is cached between
//! frames; the whole mesh is rebuilt from the height field and view state.

use bevy::math::Vec2;

use crate::heightfield::HeightField;
use crate::lighting::{Fill, Lighting};
use crate::projection::Projection;
use crate::view_state::ViewState;

/// A projected, shaded vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripVertex {
    pub position: Vec2,
    pub luminance: f32,
    pub fill: Fill,
}

impl StripVertex {
    pub fn is_degenerate(&self) -> bool {
        !(self.position.x.is_finite() && self.position.y.is_finite())
    }
}

/// Vertices of one row pair, in strip order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strip {
    pub vertices: Vec<StripVertex>,
}

impl Strip {
    /// Triangles of the strip; triangle `i` is `(v[i], v[i+1], v[i+2])`.
    pub fn triangles(&self) -> impl Iterator<Item = [StripVertex; 3]> + '_ {
        self.vertices.windows(3).map(|w| [w[0], w[1], w[2]])
    }
}

/// Counters describing one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub vertices: usize,
    pub triangles: usize,
    pub white_vertices: usize,
    /// Vertices whose perspective divide produced a non-finite position.
    pub degenerate_vertices: usize,
}

/// The mesh for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub strips: Vec<Strip>,
}

impl Frame {
    pub fn stats(&self) -> FrameStats {
        let mut stats = FrameStats::default();
        for strip in &self.strips {
            stats.vertices += strip.vertices.len();
            stats.triangles += strip.vertices.len().saturating_sub(2);
            for v in &strip.vertices {
                if v.fill == Fill::White {
                    stats.white_vertices += 1;
                }
                if v.is_degenerate() {
                    stats.degenerate_vertices += 1;
                }
            }
        }
        stats
    }

    pub fn vertices(&self) -> impl Iterator<Item = &StripVertex> {
        self.strips.iter().flat_map(|s| s.vertices.iter())
    }
}

/// Build the strip mesh for `field` seen through `view` on a square canvas.
pub fn render(field: &HeightField, view: &ViewState, canvas_size: f32) -> Frame {
    let size = field.size();
    let projection = Projection::new(view, size, canvas_size);
    let lighting = Lighting::new(field.height_scale(), canvas_size);
    let threshold = view.threshold();

    let shade = |x: usize, z: usize| -> StripVertex {
        let height = field.get(x, z);
        let p = projection.project(x, z, height);
        let luminance = lighting.luminance(height, p.rx, p.rz);
        StripVertex {
            position: p.screen,
            luminance,
            fill: Fill::from_luminance(luminance, threshold),
        }
    };

    let strips = (0..size.saturating_sub(1))
        .map(|z| {
            let mut vertices = Vec::with_capacity(size * 2);
            for x in 0..size {
                vertices.push(shade(x, z));
                vertices.push(shade(x, z + 1));
            }
            Strip { vertices }
        })
        .collect();

    Frame { strips }
}
