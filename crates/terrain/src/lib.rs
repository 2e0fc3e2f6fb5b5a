//! Animated one-bit terrain: noise height field, perspective projection and
//! thresholded lighting.
//!
//! The pipeline is window-free. `TerrainScene` owns the height field and view
//! state; each frame it builds a strip mesh (`renderer`) that the `raster`
//! module turns into a black/white pixel buffer. `TerrainPlugin` wires the
//! scene into a Bevy app.

use bevy::prelude::*;

pub mod config;
pub mod error;
pub mod heightfield;
pub mod lighting;
pub mod noise;
pub mod params;
pub mod projection;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod view_state;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use config::TERRAIN_SIZE;
use noise::PerlinNoise;
use params::TerrainParams;
use scene::TerrainScene;
use settings::TerrainSettings;

/// Ordered phases of a frame in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Advance` → `Draw`. Pointer and slider
/// handling write the scene in `Input`, the automatic rotation runs in
/// `Advance`, and the canvas is rebuilt from the settled state in `Draw`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerrainUpdateSet {
    Input,
    Advance,
    Draw,
}

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                TerrainUpdateSet::Input,
                TerrainUpdateSet::Advance,
                TerrainUpdateSet::Draw,
            )
                .chain(),
        )
        .add_systems(Startup, init_scene)
        .add_systems(Update, advance_rotation.in_set(TerrainUpdateSet::Advance));
    }
}

/// Build the scene from `TerrainSettings` unless one was inserted already.
pub fn init_scene(
    mut commands: Commands,
    existing: Option<Res<TerrainScene>>,
    settings: Option<Res<TerrainSettings>>,
) {
    if existing.is_some() {
        return;
    }
    let settings = settings.map(|s| s.clone()).unwrap_or_default();
    let scene = match TerrainScene::from_settings(&settings) {
        Ok(scene) => scene,
        Err(e) => {
            warn!("Invalid terrain settings ({e}), falling back to defaults");
            let seed = settings.seed.unwrap_or_else(rand::random);
            TerrainScene::new(TERRAIN_SIZE, PerlinNoise::new(seed), TerrainParams::default())
        }
    };
    commands.insert_resource(scene);
}

/// Per-frame automatic rotation.
pub fn advance_rotation(scene: Option<ResMut<TerrainScene>>) {
    if let Some(mut scene) = scene {
        scene.advance_frame();
    }
}
