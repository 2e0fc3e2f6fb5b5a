//! Pointer input on the canvas: dragging with any button rotates, the wheel
//! zooms.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use terrain::scene::TerrainScene;

use crate::egui_input_guard::egui_wants_pointer;

/// Pixels per wheel line for line-based scroll devices.
pub const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Resource, Default)]
pub struct CanvasDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

/// Zoom delta in pixels for one wheel event. Rolling the wheel toward the
/// user (negative `y`) moves the camera away.
pub fn scroll_delta(unit: MouseScrollUnit, y: f32) -> f32 {
    let pixels = match unit {
        MouseScrollUnit::Line => y * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => y,
    };
    -pixels
}

/// A drag starts on the first press of any mouse button.
pub fn drag_started(buttons: &ButtonInput<MouseButton>) -> bool {
    buttons.get_just_pressed().next().is_some()
}

/// A drag lasts while any mouse button is held.
pub fn drag_held(buttons: &ButtonInput<MouseButton>) -> bool {
    buttons.get_pressed().next().is_some()
}

/// Drag: horizontal motion rotates the terrain.
pub fn canvas_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut drag: ResMut<CanvasDrag>,
    scene: Option<ResMut<TerrainScene>>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };

    if !drag_held(&buttons) {
        drag.dragging = false;
    }

    if !drag.dragging && drag_started(&buttons) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let dx = pos.x - drag.last_pos.x;
            if dx != 0.0 {
                scene.apply_drag(dx);
            }
            drag.last_pos = pos;
        }
    }
}

/// Mouse wheel: move the camera nearer or farther, clamped by the scene.
pub fn canvas_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    scene: Option<ResMut<TerrainScene>>,
) {
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.clear();
        return;
    }
    let Some(mut scene) = scene else {
        scroll_evts.clear();
        return;
    };
    for evt in scroll_evts.read() {
        scene.apply_scroll(scroll_delta(evt.unit, evt.y));
    }
}
