use chrono::{DateTime, Local};
use egui::{Color32, RichText};
use glam::{Mat4, Vec3};

use crate::types::Label;

use super::{AMBER, AMBER_LIGHT};

pub const ISLAND_COORDINATES: &str = "40.6892° N, 74.0445° W";

/// World units to screen points for labels at a reference distance
const LABEL_POINTS_PER_UNIT: f32 = 40.0;

pub fn status_line(now: &DateTime<Local>) -> String {
    format!("{} | {}", now.format("%H:%M:%S"), ISLAND_COORDINATES)
}

/// Project a world point into window coordinates (points, origin top-left).
///
/// `None` when the point is behind the camera or outside the clip volume.
pub fn project_to_screen(view_proj: Mat4, point: Vec3, screen: egui::Vec2) -> Option<egui::Pos2> {
    let clip = view_proj * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }
    Some(egui::pos2(
        (ndc.x + 1.0) * 0.5 * screen.x,
        (1.0 - ndc.y) * 0.5 * screen.y,
    ))
}

pub fn title(ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("title_overlay"))
        .anchor(egui::Align2::RIGHT_TOP, [-24.0, 24.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                ui.label(RichText::new("LIBERTY LENS").size(34.0).color(AMBER));
                ui.label(
                    RichText::new("DIGITAL PRESERVATION PROJECT")
                        .size(12.0)
                        .color(Color32::LIGHT_GRAY),
                );
                let (rect, _) = ui.allocate_exact_size(egui::vec2(96.0, 2.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 0.0, AMBER);
            });
        });
}

pub fn live_badge(ctx: &egui::Context, now: &DateTime<Local>, fps: Option<f32>) {
    egui::Area::new(egui::Id::new("live_badge"))
        .anchor(egui::Align2::LEFT_BOTTOM, [24.0, -24.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .stroke(egui::Stroke::new(1.0, AMBER))
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::symmetric(8, 4))
                .show(ui, |ui| {
                    ui.label(RichText::new("LIVE RENDER").size(10.0).strong().color(AMBER));
                });
            ui.label(RichText::new(status_line(now)).size(12.0).color(Color32::GRAY));
            if let Some(fps) = fps {
                ui.label(
                    RichText::new(format!("{:.0} FPS", fps))
                        .size(11.0)
                        .color(Color32::from_rgb(74, 158, 255)),
                );
            }
        });
}

/// Engraved tablet text, drawn where the label projects on screen
pub fn inscription(ctx: &egui::Context, label: &Label, view_proj: Mat4, eye: Vec3) {
    let screen = ctx.screen_rect().size();
    let position = label.position();
    let Some(pos) = project_to_screen(view_proj, position, screen) else {
        return;
    };

    // Shrink with distance the way geometry would
    let distance = eye.distance(position).max(1.0);
    let size = label.font_size * LABEL_POINTS_PER_UNIT * 30.0 / distance;
    if size < 4.0 {
        return;
    }

    let [r, g, b] = label.color.map(|c| (c * 255.0).round() as u8);
    ctx.layer_painter(egui::LayerId::background()).text(
        pos,
        egui::Align2::CENTER_CENTER,
        label.text,
        egui::FontId::monospace(size),
        Color32::from_rgb(r, g, b).lerp_to_gamma(AMBER_LIGHT, 0.15),
    );
}
