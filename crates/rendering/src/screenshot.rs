use bevy::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

pub const SCREENSHOT_KEY: KeyCode = KeyCode::F12;
pub const SCREENSHOT_DIR: &str = "screenshots";

pub struct ScreenshotPlugin;

impl Plugin for ScreenshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_screenshot_key);
    }
}

/// `screenshots/terrain_<unix seconds>.png`
pub fn screenshot_path(epoch_secs: u64) -> String {
    format!("{SCREENSHOT_DIR}/terrain_{epoch_secs}.png")
}

#[cfg(not(target_arch = "wasm32"))]
fn handle_screenshot_key(mut commands: Commands, keyboard: Res<ButtonInput<KeyCode>>) {
    if !keyboard.just_pressed(SCREENSHOT_KEY) {
        return;
    }
    if let Err(e) = std::fs::create_dir_all(SCREENSHOT_DIR) {
        warn!("Failed to create {SCREENSHOT_DIR} directory: {e}");
        return;
    }

    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let path = screenshot_path(secs);
    info!("Saving screenshot to {path}");
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
}

#[cfg(target_arch = "wasm32")]
fn handle_screenshot_key(keyboard: Res<ButtonInput<KeyCode>>) {
    if keyboard.just_pressed(SCREENSHOT_KEY) {
        warn!("Screenshots not supported in browser");
    }
}
