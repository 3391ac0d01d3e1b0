pub mod chat_panel;
pub mod control_panel;
pub mod overlay;

use chrono::Local;
use egui::Color32;
use glam::{Mat4, Vec3};

use crate::chat::ChatSession;
use crate::settings::SceneSettings;
use crate::types::Label;

pub use chat_panel::ChatPanel;
pub use control_panel::ControlResponse;

pub const AMBER: Color32 = Color32::from_rgb(245, 158, 11);
pub const AMBER_LIGHT: Color32 = Color32::from_rgb(251, 191, 36);
pub const CYAN: Color32 = Color32::from_rgb(34, 211, 238);
pub const MUTED: Color32 = Color32::from_rgb(156, 163, 175);
pub const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 204);

/// Per-frame values the overlays read but never change
pub struct Hud<'a> {
    /// Hidden until the first estimate is in
    pub fps: Option<f32>,
    pub inscription: &'a Label,
    pub view_proj: Mat4,
    pub eye: Vec3,
}

/// Every egui surface drawn over the scene
#[derive(Debug, Default)]
pub struct Interface {
    pub chat: ChatPanel,
}

impl Interface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        settings: &mut SceneSettings,
        session: &mut ChatSession,
        hud: &Hud<'_>,
    ) -> ControlResponse {
        overlay::inscription(ctx, hud.inscription, hud.view_proj, hud.eye);
        overlay::title(ctx);
        overlay::live_badge(ctx, &Local::now(), hud.fps);
        let response = control_panel::show(ctx, settings);
        self.chat.show(ctx, session);
        response
    }
}
