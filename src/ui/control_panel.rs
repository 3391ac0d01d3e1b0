use egui::{Color32, RichText};

use crate::settings::{SceneSettings, AZIMUTH_RANGE, ELEVATION_RANGE, WIND_RANGE, WIND_STEP};

use super::{AMBER, AMBER_LIGHT, CYAN, MUTED};

/// What the panel asked the application to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlResponse {
    pub changed: bool,
    pub reset_requested: bool,
}

pub fn degrees_label(value: f32) -> String {
    format!("{}°", value.round() as i32)
}

pub fn percent_label(value: f32) -> String {
    format!("{:.0}%", value * 100.0)
}

fn header(ui: &mut egui::Ui, name: &str, value: String) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(name).size(11.0).strong().color(Color32::LIGHT_GRAY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).size(11.0).color(Color32::LIGHT_GRAY));
        });
    });
}

/// Sun, wind and crowd controls.
///
/// Edits a copy and writes back whole settings, clamped into the slider
/// ranges, so the caller always sees a consistent snapshot.
pub fn show(ctx: &egui::Context, settings: &mut SceneSettings) -> ControlResponse {
    let mut response = ControlResponse::default();
    let mut edited = *settings;

    egui::Window::new("Controls")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(16.0, 16.0))
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("CONTROLS").size(18.0).color(AMBER_LIGHT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(RichText::new("RESET VIEW").size(10.0).color(MUTED))
                        .clicked()
                    {
                        response.reset_requested = true;
                    }
                });
            });
            ui.add_space(8.0);

            header(ui, "SUN AZIMUTH", degrees_label(edited.sun_azimuth));
            ui.add(
                egui::Slider::new(&mut edited.sun_azimuth, AZIMUTH_RANGE.0..=AZIMUTH_RANGE.1)
                    .show_value(false),
            );

            header(ui, "SUN ELEVATION", degrees_label(edited.sun_elevation));
            ui.add(
                egui::Slider::new(&mut edited.sun_elevation, ELEVATION_RANGE.0..=ELEVATION_RANGE.1)
                    .show_value(false),
            );

            header(ui, "WIND INTENSITY", percent_label(edited.wind_intensity));
            ui.scope(|ui| {
                ui.visuals_mut().selection.bg_fill = CYAN;
                ui.add(
                    egui::Slider::new(&mut edited.wind_intensity, WIND_RANGE.0..=WIND_RANGE.1)
                        .step_by(WIND_STEP)
                        .show_value(false),
                );
            });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("CROWD").size(12.0).strong().color(Color32::LIGHT_GRAY));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.checkbox(&mut edited.show_tourists, "");
                });
            });

            ui.separator();
            for line in [
                "Use LEFT MOUSE to Orbit",
                "Use RIGHT MOUSE to Pan",
                "Use SCROLL to Zoom",
            ] {
                ui.label(RichText::new(line).size(10.0).color(Color32::GRAY));
            }
            ui.label(
                RichText::new("Q/E orbit, W/S zoom, R reset")
                    .size(10.0)
                    .color(AMBER.gamma_multiply(0.7)),
            );
        });

    let edited = SceneSettings::clamped(
        edited.sun_azimuth,
        edited.sun_elevation,
        edited.wind_intensity,
        edited.show_tourists,
    );
    if edited != *settings {
        *settings = edited;
        response.changed = true;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(degrees_label(134.6), "135°");
        assert_eq!(degrees_label(0.2), "0°");
        assert_eq!(percent_label(0.3), "30%");
        assert_eq!(percent_label(1.0), "100%");
    }

    #[test]
    fn test_idle_frame_leaves_settings_alone() {
        let ctx = egui::Context::default();
        let mut settings = SceneSettings::default();
        let mut response = ControlResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = show(ctx, &mut settings);
        });
        assert_eq!(settings, SceneSettings::default());
        assert_eq!(response, ControlResponse::default());
    }

    #[test]
    fn test_out_of_range_settings_are_pulled_back() {
        let ctx = egui::Context::default();
        let mut settings = SceneSettings::default().with_wind(4.0);
        let mut response = ControlResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = show(ctx, &mut settings);
        });
        assert_eq!(settings.wind_intensity, 1.0);
        assert!(response.changed);
    }
}
