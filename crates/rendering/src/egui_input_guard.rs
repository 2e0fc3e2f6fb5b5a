//! Egui input guard: keeps slider drags from also spinning the terrain.
//!
//! When the controls window is handling the pointer, canvas input systems
//! skip processing so a slider drag or a scroll over the panel does not leak
//! through to rotation and zoom.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui window or egui is handling a drag. Returns `false` when no egui
/// context exists (headless or UI disabled).
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
}
