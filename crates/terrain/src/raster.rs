//! One-bit software rasterizer for strip meshes.
//!
//! The canvas is cleared to black, then every strip triangle is filled flat
//! with the fill of its last vertex and, unless disabled, outlined with a
//! one-pixel black stroke. Pixels only ever hold 0 or 255.
//!
//! Triangles touching a non-finite vertex are skipped. Everything else is
//! clipped to the canvas, so a diverging perspective divide costs at most one
//! canvas worth of pixels per triangle.

use bevy::math::Vec2;

use crate::lighting::Fill;
use crate::renderer::{Frame, StripVertex};

/// How strip triangles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Outline color for triangle edges, `None` for fill only.
    pub stroke: Option<Fill>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            stroke: Some(Fill::Black),
        }
    }
}

/// Square single-channel pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pixels: vec![Fill::Black.value(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major luminance, one byte per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.size && y < self.size).then(|| self.pixels[y * self.size + x])
    }

    pub fn clear(&mut self, fill: Fill) {
        self.pixels.fill(fill.value());
    }

    /// Number of white pixels.
    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .iter()
            .filter(|&&p| p == Fill::White.value())
            .count()
    }

    /// Expand into an RGBA8 buffer (opaque gray levels).
    pub fn write_rgba(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for &p in &self.pixels {
            out.extend_from_slice(&[p, p, p, 255]);
        }
    }

    /// Clear and draw every strip of `frame`. Returns the number of
    /// triangles skipped for non-finite vertices.
    pub fn draw_frame(&mut self, frame: &Frame, style: RenderStyle) -> usize {
        self.clear(Fill::Black);
        let mut skipped = 0;
        for strip in &frame.strips {
            for [a, b, c] in strip.triangles() {
                if a.is_degenerate() || b.is_degenerate() || c.is_degenerate() {
                    skipped += 1;
                    continue;
                }
                self.draw_triangle(&a, &b, &c, style);
            }
        }
        skipped
    }

    fn draw_triangle(
        &mut self,
        a: &StripVertex,
        b: &StripVertex,
        c: &StripVertex,
        style: RenderStyle,
    ) {
        self.fill_triangle(a.position, b.position, c.position, c.fill);
        if let Some(stroke) = style.stroke {
            self.draw_line(a.position, b.position, stroke);
            self.draw_line(b.position, c.position, stroke);
            self.draw_line(c.position, a.position, stroke);
        }
    }

    /// Fill pixels whose centers lie inside the triangle (either winding).
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, fill: Fill) {
        let area = edge(a, b, c);
        if area == 0.0 || !area.is_finite() || self.size == 0 {
            return;
        }
        let max = self.size as f32 - 1.0;
        let min_x = a.x.min(b.x).min(c.x).floor().clamp(0.0, max) as usize;
        let max_x = a.x.max(b.x).max(c.x).ceil().clamp(0.0, max) as usize;
        let min_y = a.y.min(b.y).min(c.y).floor().clamp(0.0, max) as usize;
        let max_y = a.y.max(b.y).max(c.y).ceil().clamp(0.0, max) as usize;

        let value = fill.value();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.pixels[y * self.size + x] = value;
                }
            }
        }
    }

    /// One-pixel line, clipped to the canvas.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, fill: Fill) {
        if self.size == 0 {
            return;
        }
        let Some((from, to)) = clip_segment(from, to, self.size as f32) else {
            return;
        };
        let steps = (to - from).abs().max_element().ceil().max(1.0) as usize;
        let value = fill.value();
        for i in 0..=steps {
            let p = from.lerp(to, i as f32 / steps as f32);
            let (x, y) = (p.x.floor() as isize, p.y.floor() as isize);
            if x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size {
                self.pixels[y as usize * self.size + x as usize] = value;
            }
        }
    }
}

/// Twice the signed area of `(a, b, p)`.
#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Liang-Barsky clip of a segment against `[0, size]²`.
fn clip_segment(from: Vec2, to: Vec2, size: f32) -> Option<(Vec2, Vec2)> {
    let d = to - from;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    for (p, q) in [
        (-d.x, from.x),
        (d.x, size - from.x),
        (-d.y, from.y),
        (d.y, size - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((from + d * t0, from + d * t1))
}
