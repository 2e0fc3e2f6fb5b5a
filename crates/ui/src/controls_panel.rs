//! Terrain controls window.
//!
//! Provides an egui window with:
//! - Sliders for noise scale, height scale, rotation speed and threshold
//! - A typed value entry for exact values
//! - An outline toggle
//! - A readout of the view and the last frame
//! - Keybind (H) to toggle the window

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::canvas::LastFrameStats;
use terrain::params::ParamKind;
use terrain::scene::TerrainScene;

pub const NOISE_SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.01..=0.2;
pub const HEIGHT_SCALE_RANGE: std::ops::RangeInclusive<i64> = 0..=100;
pub const ROTATION_SPEED_RANGE: std::ops::RangeInclusive<f32> = 0.0..=0.05;

// =============================================================================
// Resources
// =============================================================================

/// Whether the controls window is visible.
#[derive(Resource)]
pub struct ControlsPanelVisible(pub bool);

impl Default for ControlsPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// State of the typed value entry.
#[derive(Resource, Debug)]
pub struct ValueEntry {
    pub kind: ParamKind,
    pub text: String,
    /// Message from the last rejected submission.
    pub error: Option<String>,
}

impl Default for ValueEntry {
    fn default() -> Self {
        Self {
            kind: ParamKind::NoiseScale,
            text: String::new(),
            error: None,
        }
    }
}

impl ValueEntry {
    /// Apply the entered text to `scene`. Returns whether it was accepted.
    pub fn submit(&mut self, scene: &mut TerrainScene) -> bool {
        match scene.apply_input(self.kind.name(), &self.text) {
            Ok(()) => {
                self.error = None;
                self.text.clear();
                true
            }
            Err(e) => {
                warn!("Rejected {} input {:?}: {e}", self.kind.name(), self.text);
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn panel_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut visible: ResMut<ControlsPanelVisible>,
) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        visible.0 = !visible.0;
    }
}

/// Renders the controls window and applies changed values to the scene.
pub fn controls_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<ControlsPanelVisible>,
    mut entry: ResMut<ValueEntry>,
    stats: Option<Res<LastFrameStats>>,
    scene: Option<ResMut<TerrainScene>>,
) {
    if !visible.0 {
        return;
    }
    let Some(mut scene) = scene else {
        return;
    };

    let mut open = true;
    egui::Window::new("Terrain")
        .open(&mut open)
        .resizable(false)
        .default_width(260.0)
        .default_pos([12.0, 12.0])
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            // --- Shape (regenerates) ---
            let mut noise_scale = scene.params().noise_scale;
            if ui
                .add(egui::Slider::new(&mut noise_scale, NOISE_SCALE_RANGE).text("noise scale"))
                .changed()
            {
                report(scene.set_noise_scale(noise_scale));
            }

            let mut height_scale = scene.params().height_scale.round() as i64;
            if ui
                .add(egui::Slider::new(&mut height_scale, HEIGHT_SCALE_RANGE).text("height"))
                .changed()
            {
                report(scene.set_height_scale(height_scale as f32));
            }

            ui.separator();

            // --- View ---
            let mut rotation_speed = scene.view().rotation_speed();
            if ui
                .add(
                    egui::Slider::new(&mut rotation_speed, ROTATION_SPEED_RANGE)
                        .text("rotation")
                        .fixed_decimals(3),
                )
                .changed()
            {
                report(scene.set_rotation_speed(rotation_speed));
            }

            let mut threshold = scene.view().threshold();
            if ui
                .add(egui::Slider::new(&mut threshold, 0..=255).text("threshold"))
                .changed()
            {
                report(scene.set_threshold(i64::from(threshold)));
            }

            let mut stroke = scene.style().stroke.is_some();
            if ui.checkbox(&mut stroke, "outline triangles").changed() {
                scene.set_stroke(stroke);
            }

            ui.separator();

            // --- Typed entry ---
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_salt("value_entry_kind")
                    .selected_text(entry.kind.name())
                    .show_ui(ui, |ui| {
                        for kind in ParamKind::ALL {
                            ui.selectable_value(&mut entry.kind, kind, kind.name());
                        }
                    });
                let response =
                    ui.add(egui::TextEdit::singleline(&mut entry.text).desired_width(60.0));
                let entered =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Apply").clicked() || entered {
                    entry.submit(&mut scene);
                }
            });
            if let Some(error) = &entry.error {
                ui.label(error);
            }

            ui.separator();

            // --- Readout ---
            let view = scene.view();
            ui.label(format!(
                "heading {:.1}°  distance {:.0}",
                heading_degrees(view.angle()),
                view.camera_distance()
            ));
            ui.label(height_range_label(scene.field().min_max()));
            ui.label(stats_label(stats.as_deref()));
        });

    if !open {
        visible.0 = false;
    }
}

fn report(result: Result<(), terrain::error::TerrainError>) {
    if let Err(e) = result {
        warn!("Ignoring control change: {e}");
    }
}

/// The unbounded rotation angle as a compass heading in `[0, 360)`.
fn heading_degrees(angle: f32) -> f32 {
    angle.to_degrees().rem_euclid(360.0)
}

fn height_range_label(range: Option<(f32, f32)>) -> String {
    match range {
        Some((lo, hi)) => format!("heights {lo:.1} to {hi:.1}"),
        None => "no terrain".to_string(),
    }
}

/// Last frame's counts; the canvas is absent without `RenderingPlugin`.
fn stats_label(stats: Option<&LastFrameStats>) -> String {
    match stats {
        Some(LastFrameStats(s)) => {
            format!("{} triangles, {} white vertices", s.triangles, s.white_vertices)
        }
        None => "no canvas".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain::noise::ConstantNoise;
    use terrain::params::TerrainParams;

    fn scene() -> TerrainScene {
        TerrainScene::new(4, ConstantNoise(0.5), TerrainParams::default())
    }

    #[test]
    fn test_heading_wraps() {
        assert!((heading_degrees(std::f32::consts::PI) - 180.0).abs() < 1e-3);
        assert!((heading_degrees(-std::f32::consts::FRAC_PI_2) - 270.0).abs() < 1e-3);
        assert!((heading_degrees(std::f32::consts::TAU + 1.0) - 57.2958).abs() < 1e-2);
    }

    #[test]
    fn test_height_range_label() {
        assert_eq!(height_range_label(Some((0.5, 19.26))), "heights 0.5 to 19.3");
        assert_eq!(height_range_label(None), "no terrain");
    }

    #[test]
    fn test_stats_label() {
        use terrain::renderer::FrameStats;

        let stats = LastFrameStats(FrameStats {
            vertices: 20,
            triangles: 18,
            white_vertices: 7,
            degenerate_vertices: 0,
        });
        assert_eq!(stats_label(Some(&stats)), "18 triangles, 7 white vertices");
        assert_eq!(stats_label(None), "no canvas");
    }

    #[test]
    fn test_value_entry_accepts_valid_input() {
        let mut scene = scene();
        let mut entry = ValueEntry {
            kind: ParamKind::HeightScale,
            text: "40".into(),
            error: None,
        };
        assert!(entry.submit(&mut scene));
        assert_eq!(scene.params().height_scale, 40.0);
        assert!(entry.text.is_empty());
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_value_entry_keeps_state_on_bad_input() {
        let mut scene = scene();
        let mut entry = ValueEntry {
            kind: ParamKind::Threshold,
            text: "bright".into(),
            error: None,
        };
        assert!(!entry.submit(&mut scene));
        assert_eq!(scene.view().threshold(), 128);
        assert_eq!(entry.text, "bright");
        assert!(entry.error.is_some());
    }

    #[test]
    fn test_slider_ranges_cover_defaults() {
        let params = TerrainParams::default();
        assert!(NOISE_SCALE_RANGE.contains(&params.noise_scale));
        assert!(HEIGHT_SCALE_RANGE.contains(&(params.height_scale as i64)));
        assert!(ROTATION_SPEED_RANGE.contains(&0.005));
    }
}
