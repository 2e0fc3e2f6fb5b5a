//! `TerrainScene`: the controller that owns all terrain state.
//!
//! Setters are the only way parameters change. The two shape parameters
//! regenerate the height field before returning, so the next frame always
//! sees a field that matches the current parameters. Rejected values leave
//! the scene untouched.

use bevy::log::{debug, info};
use bevy::prelude::Resource;
use bevy::utils::Instant;

use crate::config::CANVAS_SIZE;
use crate::error::{ensure_finite, ensure_terrain_size, TerrainError};
use crate::heightfield::HeightField;
use crate::lighting::Fill;
use crate::noise::{NoiseSource, PerlinNoise};
use crate::params::{ParamKind, ParamValue, TerrainParams};
use crate::raster::{Canvas, RenderStyle};
use crate::renderer::{render, Frame, FrameStats};
use crate::settings::TerrainSettings;
use crate::view_state::ViewState;

#[derive(Resource)]
pub struct TerrainScene {
    noise: Box<dyn NoiseSource>,
    params: TerrainParams,
    field: HeightField,
    view: ViewState,
    style: RenderStyle,
    canvas_size: f32,
}

impl TerrainScene {
    /// A scene over `noise` with default view and style, generated once.
    pub fn new(size: usize, noise: impl NoiseSource + 'static, params: TerrainParams) -> Self {
        let mut scene = Self {
            noise: Box::new(noise),
            params,
            field: HeightField::empty(size),
            view: ViewState::default(),
            style: RenderStyle::default(),
            canvas_size: CANVAS_SIZE,
        };
        scene.regenerate();
        scene
    }

    /// Build from startup settings, seeding Perlin noise from the settings
    /// or from a fresh random seed.
    pub fn from_settings(settings: &TerrainSettings) -> Result<Self, TerrainError> {
        let size = ensure_terrain_size(settings.terrain_size)?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        info!("Terrain noise seed: {seed}");

        let params = TerrainParams {
            noise_scale: ensure_finite("noise scale", settings.noise_scale)?,
            height_scale: ensure_finite("height scale", settings.height_scale)?,
        };
        let mut scene = Self::new(size, PerlinNoise::new(seed), params);
        scene.view.set_rotation_speed(settings.rotation_speed)?;
        scene.view.set_threshold(i64::from(settings.threshold))?;
        scene.view.set_camera_distance(settings.camera_distance);
        scene.set_stroke(settings.stroke);
        Ok(scene)
    }

    pub fn with_canvas_size(mut self, canvas_size: f32) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn params(&self) -> TerrainParams {
        self.params
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn canvas_size(&self) -> f32 {
        self.canvas_size
    }

    pub fn set_stroke(&mut self, enabled: bool) {
        self.style.stroke = enabled.then_some(Fill::Black);
    }

    /// Rebuild the height field from the current parameters.
    pub fn regenerate(&mut self) {
        let TerrainParams {
            noise_scale,
            height_scale,
        } = self.params;
        let start = Instant::now();
        self.field.regenerate(self.noise.as_ref(), noise_scale, height_scale);
        if let Some((lo, hi)) = self.field.min_max() {
            debug!(
                "Regenerated {n}x{n} terrain in {:?}, noise scale {noise_scale}, heights {lo:.2}..{hi:.2}",
                start.elapsed(),
                n = self.field.size()
            );
        }
    }

    pub fn set_noise_scale(&mut self, noise_scale: f32) -> Result<(), TerrainError> {
        self.params.noise_scale = ensure_finite("noise scale", noise_scale)?;
        self.regenerate();
        Ok(())
    }

    pub fn set_height_scale(&mut self, height_scale: f32) -> Result<(), TerrainError> {
        self.params.height_scale = ensure_finite("height scale", height_scale)?;
        self.regenerate();
        Ok(())
    }

    pub fn set_rotation_speed(&mut self, speed: f32) -> Result<(), TerrainError> {
        self.view.set_rotation_speed(speed)
    }

    pub fn set_threshold(&mut self, threshold: i64) -> Result<(), TerrainError> {
        self.view.set_threshold(threshold)
    }

    /// Apply an already parsed control value.
    pub fn apply(&mut self, kind: ParamKind, value: ParamValue) -> Result<(), TerrainError> {
        match kind {
            ParamKind::NoiseScale => self.set_noise_scale(value.as_f32()),
            ParamKind::HeightScale => self.set_height_scale(value.as_f32()),
            ParamKind::RotationSpeed => self.set_rotation_speed(value.as_f32()),
            ParamKind::Threshold => self.set_threshold(value.as_i64()),
        }
    }

    /// Parse and apply textual input for the parameter called `name`.
    pub fn apply_input(&mut self, name: &str, input: &str) -> Result<(), TerrainError> {
        let kind = ParamKind::from_name(name)?;
        let value = kind.parse(input)?;
        self.apply(kind, value)
    }

    pub fn apply_drag(&mut self, dx: f32) {
        self.view.apply_drag(dx);
    }

    pub fn apply_scroll(&mut self, delta: f32) {
        self.view.apply_scroll(delta);
    }

    /// Advance the automatic rotation by one frame.
    pub fn advance_frame(&mut self) {
        self.view.advance();
    }

    /// The strip mesh for the current state.
    pub fn render(&self) -> Frame {
        render(&self.field, &self.view, self.canvas_size)
    }

    /// Render and rasterize onto `canvas`.
    pub fn draw(&self, canvas: &mut Canvas) -> FrameStats {
        let frame = self.render();
        let skipped = canvas.draw_frame(&frame, self.style);
        let stats = frame.stats();
        if stats.degenerate_vertices > 0 {
            debug!(
                "Frame had {} degenerate vertices, skipped {skipped} triangles",
                stats.degenerate_vertices
            );
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ConstantNoise;

    fn flat_scene(size: usize) -> TerrainScene {
        TerrainScene::new(size, ConstantNoise(0.5), TerrainParams::default())
    }

    #[test]
    fn test_new_generates_field() {
        let scene = flat_scene(4);
        assert_eq!(scene.field().size(), 4);
        for &h in scene.field().heights() {
            assert!((h - 10.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_height_scale_setter_regenerates() {
        let mut scene = flat_scene(4);
        scene.set_height_scale(60.0).unwrap();
        assert_eq!(scene.params().height_scale, 60.0);
        assert_eq!(scene.field().height_scale(), 60.0);
        for &h in scene.field().heights() {
            assert!((h - 30.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_repeated_setter_is_idempotent() {
        let mut scene = TerrainScene::new(20, PerlinNoise::new(8), TerrainParams::default());
        scene.set_noise_scale(0.09).unwrap();
        let first = scene.field().clone();
        scene.set_noise_scale(0.09).unwrap();
        assert_eq!(scene.field(), &first);
    }

    #[test]
    fn test_rejected_values_leave_state_unchanged() {
        let mut scene = flat_scene(4);
        let field = scene.field().clone();
        let view = *scene.view();
        assert!(scene.set_noise_scale(f32::NAN).is_err());
        assert!(scene.set_height_scale(f32::INFINITY).is_err());
        assert!(scene.set_rotation_speed(f32::NAN).is_err());
        assert!(scene.set_threshold(1000).is_err());
        assert_eq!(scene.params(), TerrainParams::default());
        assert_eq!(scene.field(), &field);
        assert_eq!(scene.view(), &view);
    }

    #[test]
    fn test_view_setters_do_not_regenerate() {
        let mut scene = flat_scene(4);
        let field = scene.field().clone();
        scene.set_rotation_speed(0.02).unwrap();
        scene.set_threshold(10).unwrap();
        assert_eq!(scene.field(), &field);
        assert_eq!(scene.view().rotation_speed(), 0.02);
        assert_eq!(scene.view().threshold(), 10);
    }

    #[test]
    fn test_apply_input() {
        let mut scene = flat_scene(4);
        scene.apply_input("height_scale", "40").unwrap();
        assert_eq!(scene.params().height_scale, 40.0);
        scene.apply_input("threshold", "200").unwrap();
        assert_eq!(scene.view().threshold(), 200);
        assert!(scene.apply_input("threshold", "two hundred").is_err());
        assert!(scene.apply_input("threshold", "-5").is_err());
        assert!(scene.apply_input("zoom", "1").is_err());
        assert_eq!(scene.view().threshold(), 200);
    }

    #[test]
    fn test_frame_advance_and_input() {
        let mut scene = flat_scene(4);
        scene.set_rotation_speed(0.1).unwrap();
        scene.advance_frame();
        scene.advance_frame();
        scene.apply_drag(10.0);
        assert!((scene.view().angle() - 0.3).abs() < 1e-6);
        scene.apply_scroll(-1000.0);
        assert_eq!(scene.view().camera_distance(), 100.0);
    }

    #[test]
    fn test_from_settings() {
        let settings = TerrainSettings {
            terrain_size: 16,
            seed: Some(3),
            threshold: 40,
            stroke: false,
            camera_distance: 5000.0,
            ..Default::default()
        };
        let a = TerrainScene::from_settings(&settings).unwrap();
        let b = TerrainScene::from_settings(&settings).unwrap();
        assert_eq!(a.field(), b.field());
        assert_eq!(a.field().size(), 16);
        assert_eq!(a.view().threshold(), 40);
        assert_eq!(a.view().camera_distance(), 800.0);
        assert_eq!(a.style().stroke, None);
    }

    #[test]
    fn test_from_settings_rejects_non_finite() {
        let settings = TerrainSettings {
            noise_scale: f32::NAN,
            seed: Some(1),
            ..Default::default()
        };
        assert!(TerrainScene::from_settings(&settings).is_err());
    }

    #[test]
    fn test_from_settings_rejects_oversized_grid() {
        let settings =
            TerrainSettings::from_json(r#"{ "terrain_size": 4294967296, "seed": 1 }"#).unwrap();
        assert!(matches!(
            TerrainScene::from_settings(&settings),
            Err(TerrainError::TerrainSizeOutOfRange(_))
        ));

        let empty = TerrainSettings {
            terrain_size: 0,
            seed: Some(1),
            ..Default::default()
        };
        assert!(TerrainScene::from_settings(&empty).is_err());
    }

    #[test]
    fn test_draw_produces_one_bit_canvas() {
        let scene = TerrainScene::new(30, PerlinNoise::new(12), TerrainParams::default())
            .with_canvas_size(120.0)
            .with_style(RenderStyle { stroke: None });
        let mut canvas = Canvas::new(120);
        let stats = scene.draw(&mut canvas);
        assert_eq!(stats.vertices, 29 * 60);
        assert!(canvas.pixels().iter().all(|&p| p == 0 || p == 255));
        assert_eq!(scene.style().stroke, None);
    }

    #[test]
    fn test_stroke_toggle() {
        let mut scene = flat_scene(4);
        assert_eq!(scene.style().stroke, Some(Fill::Black));
        scene.set_stroke(false);
        assert_eq!(scene.style().stroke, None);
        scene.set_stroke(true);
        assert_eq!(scene.style().stroke, Some(Fill::Black));
    }
}
