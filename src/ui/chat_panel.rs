use egui::{Color32, RichText};
use std::f32::consts::TAU;

use crate::chat::{ChatSession, LibertyPart, Role};

use super::{AMBER, AMBER_LIGHT, PANEL_FILL};

const PANEL_WIDTH: f32 = 360.0;
const HISTORY_HEIGHT: f32 = 300.0;

/// Chat window state that lives outside the conversation itself
#[derive(Debug, Default)]
pub struct ChatPanel {
    pub open: bool,
    pub input: String,
    pub focus: Option<LibertyPart>,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the typed question to the session; the box is cleared only if it was accepted
    pub fn send(&mut self, session: &mut ChatSession) -> bool {
        let sent = session.submit(&self.input, self.focus);
        if sent {
            self.input.clear();
        }
        sent
    }

    pub fn show(&mut self, ctx: &egui::Context, session: &mut ChatSession) {
        egui::Area::new(egui::Id::new("chat_toggle"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .show(ctx, |ui| {
                let icon = if self.open { "✖" } else { "💬" };
                let button = egui::Button::new(RichText::new(icon).size(20.0).color(Color32::BLACK))
                    .fill(AMBER)
                    .corner_radius(egui::CornerRadius::same(24))
                    .min_size(egui::vec2(48.0, 48.0));
                if ui.add(button).clicked() {
                    self.open = !self.open;
                }
            });

        if !self.open {
            return;
        }

        egui::Window::new("Lady Liberty Guide")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -80.0])
            .fixed_size(egui::vec2(PANEL_WIDTH, HISTORY_HEIGHT + 110.0))
            .frame(
                egui::Frame::new()
                    .fill(PANEL_FILL)
                    .stroke(egui::Stroke::new(1.0, AMBER.gamma_multiply(0.3)))
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| {
                ui.label(RichText::new("Lady Liberty Guide").size(16.0).strong().color(AMBER_LIGHT));
                ui.label(RichText::new("Powered by Gemini").size(10.0).color(Color32::GRAY));
                ui.separator();

                self.history(ui, session);

                ui.separator();
                self.input_row(ui, session);
            });
    }

    fn history(&self, ui: &mut egui::Ui, session: &ChatSession) {
        egui::ScrollArea::vertical()
            .max_height(HISTORY_HEIGHT)
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for message in session.messages() {
                    let user = message.role == Role::User;
                    let layout = if user {
                        egui::Layout::right_to_left(egui::Align::TOP)
                    } else {
                        egui::Layout::left_to_right(egui::Align::TOP)
                    };
                    ui.with_layout(layout, |ui| {
                        let (fill, text) = if user {
                            (Color32::from_rgb(217, 119, 6), Color32::WHITE)
                        } else {
                            (Color32::from_rgba_unmultiplied(31, 41, 55, 204), Color32::from_gray(229))
                        };
                        egui::Frame::new()
                            .fill(fill)
                            .corner_radius(egui::CornerRadius::same(8))
                            .inner_margin(egui::Margin::same(8))
                            .show(ui, |ui| {
                                ui.set_max_width(PANEL_WIDTH * 0.85);
                                ui.label(RichText::new(&message.text).size(13.0).color(text));
                            });
                    });
                    ui.add_space(6.0);
                }

                if session.is_pending() {
                    typing_indicator(ui);
                }
            });
    }

    fn input_row(&mut self, ui: &mut egui::Ui, session: &mut ChatSession) {
        let pending = session.is_pending();

        ui.horizontal(|ui| {
            ui.label(RichText::new("Focus").size(11.0).color(Color32::GRAY));
            egui::ComboBox::from_id_salt("chat_focus")
                .selected_text(self.focus.map_or("Anything", LibertyPart::label))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.focus, None, "Anything");
                    for part in LibertyPart::ALL {
                        ui.selectable_value(&mut self.focus, Some(part), part.label());
                    }
                });
        });

        ui.horizontal(|ui| {
            let edit = egui::TextEdit::singleline(&mut self.input)
                .hint_text("Ask about history...")
                .desired_width(PANEL_WIDTH - 60.0);
            let response = ui.add_enabled(!pending, edit);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let send = ui
                .add_enabled(!pending, egui::Button::new(RichText::new("➤").color(AMBER)))
                .clicked();

            if (submitted || send) && self.send(session) {
                response.request_focus();
            }
        });
    }
}

/// Three bouncing dots while the assistant is thinking
fn typing_indicator(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(56.0, 24.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(8), Color32::from_rgba_unmultiplied(31, 41, 55, 204));

    let time = ui.input(|i| i.time) as f32;
    for i in 0..3 {
        let phase = time * 4.0 - i as f32 * 0.6;
        let lift = (phase.rem_euclid(TAU)).sin().max(0.0) * 4.0;
        let centre = egui::pos2(rect.left() + 14.0 + i as f32 * 14.0, rect.center().y - lift);
        painter.circle_filled(centre, 3.0, AMBER_LIGHT);
    }
    ui.ctx().request_repaint();
}
