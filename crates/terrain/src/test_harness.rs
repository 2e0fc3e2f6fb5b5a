//! # TestTerrain: headless harness around `TerrainPlugin`
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` so the frame schedule can be
//! driven without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::params::TerrainParams;
use crate::raster::Canvas;
use crate::renderer::FrameStats;
use crate::scene::TerrainScene;
use crate::settings::TerrainSettings;
use crate::TerrainPlugin;

/// Grid size used by `TestTerrain::new`; small enough for fast tests.
pub const TEST_TERRAIN_SIZE: usize = 24;

pub struct TestTerrain {
    app: App,
}

impl Default for TestTerrain {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTerrain {
    /// A small seeded terrain with default parameters.
    pub fn new() -> Self {
        Self::with_settings(TerrainSettings {
            terrain_size: TEST_TERRAIN_SIZE,
            seed: Some(1),
            ..Default::default()
        })
    }

    /// Start the app from `settings`, the way the binary does.
    pub fn with_settings(settings: TerrainSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(settings);
        app.add_plugins(TerrainPlugin);
        // Startup builds the scene.
        app.update();
        Self { app }
    }

    /// Replace the scene wholesale, e.g. with one over `ConstantNoise`.
    pub fn with_scene(mut self, scene: TerrainScene) -> Self {
        self.app.insert_resource(scene);
        self
    }

    pub fn with_params(mut self, params: TerrainParams) -> Self {
        {
            let mut scene = self.scene_mut();
            scene
                .set_noise_scale(params.noise_scale)
                .expect("finite noise scale");
            scene
                .set_height_scale(params.height_scale)
                .expect("finite height scale");
        }
        self
    }

    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.scene_mut()
            .set_rotation_speed(speed)
            .expect("finite rotation speed");
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.scene_mut()
            .set_threshold(i64::from(threshold))
            .expect("threshold in range");
        self
    }

    /// Run `n` frames at 60 Hz.
    pub fn tick(&mut self, n: u32) {
        let dt = std::time::Duration::from_secs_f64(1.0 / 60.0);
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Virtual>>()
                .advance_by(dt);
            self.app.update();
        }
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn scene(&self) -> &TerrainScene {
        self.app.world().resource::<TerrainScene>()
    }

    pub fn scene_mut(&mut self) -> Mut<'_, TerrainScene> {
        self.app.world_mut().resource_mut::<TerrainScene>()
    }

    /// Rasterize the current state onto a fresh canvas of the scene's size.
    pub fn draw(&self) -> (Canvas, FrameStats) {
        let mut canvas = Canvas::new(self.scene().canvas_size() as usize);
        let stats = self.scene().draw(&mut canvas);
        (canvas, stats)
    }
}
