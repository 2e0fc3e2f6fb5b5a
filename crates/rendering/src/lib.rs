use bevy::prelude::*;

use terrain::TerrainUpdateSet;

pub mod canvas;
pub mod egui_input_guard;
pub mod input;
pub mod screenshot;

use canvas::LastFrameStats;
use input::CanvasDrag;

/// Presents the terrain: canvas sprite, pointer controls and screenshots.
///
/// Needs `TerrainPlugin` for the frame sets and `EguiPlugin` (added by the
/// UI crate) for the pointer guard.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CanvasDrag>()
            .init_resource::<LastFrameStats>()
            .add_systems(
                Startup,
                canvas::setup_canvas.after(terrain::init_scene),
            )
            .add_systems(
                Update,
                (input::canvas_drag, input::canvas_zoom).in_set(TerrainUpdateSet::Input),
            )
            .add_systems(Update, canvas::draw_canvas.in_set(TerrainUpdateSet::Draw))
            .add_plugins(screenshot::ScreenshotPlugin);
    }
}
