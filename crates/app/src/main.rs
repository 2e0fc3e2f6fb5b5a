use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy::winit::WinitSettings;

use terrain::config::CANVAS_SIZE;
use terrain::settings::TerrainSettings;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "One-bit terrain".to_string(),
            resolution: WindowResolution::new(CANVAS_SIZE, CANVAS_SIZE),
            resizable: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    // Keep animating while unfocused.
    .insert_resource(WinitSettings::game());

    // After DefaultPlugins so the log subscriber sees the settings messages.
    app.insert_resource(TerrainSettings::from_env());

    app.add_plugins((
        terrain::TerrainPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}
