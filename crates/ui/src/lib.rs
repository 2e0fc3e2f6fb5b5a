use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use terrain::TerrainUpdateSet;

pub mod controls_panel;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<controls_panel::ControlsPanelVisible>()
            .init_resource::<controls_panel::ValueEntry>()
            .add_systems(Startup, theme::apply_mono_theme)
            .add_systems(
                Update,
                (
                    controls_panel::panel_keybinds,
                    controls_panel::controls_panel_ui,
                )
                    .chain()
                    .in_set(TerrainUpdateSet::Input),
            );
    }
}
