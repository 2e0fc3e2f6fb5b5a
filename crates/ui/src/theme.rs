use bevy_egui::{egui, EguiContexts};

/// Black panels, white text and a single gray accent, to sit on a one-bit
/// canvas without adding color.
pub fn apply_mono_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(12, 12, 12);
    let inactive = egui::Color32::from_rgb(40, 40, 40);
    let hover = egui::Color32::from_rgb(80, 80, 80);
    let active = egui::Color32::from_rgb(200, 200, 200);

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.window_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    style.visuals.override_text_color = Some(egui::Color32::WHITE);

    style.visuals.selection.bg_fill = hover;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);

    // Square corners
    style.visuals.window_corner_radius = egui::CornerRadius::ZERO;
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::ZERO;
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::ZERO;
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::ZERO;
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::ZERO;

    ctx.set_style(style);
}
