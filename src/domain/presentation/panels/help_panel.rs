use bevy_egui::egui;

use crate::config::GameSettings;

pub fn show_help_panel(ctx: &mut egui::Context, settings: &GameSettings) {
    if settings.show_help {
        egui::Window::new("Help")
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("WASD: Walk");
                ui.label("Mouse: Look");
                ui.label("Esc: Menu / Back");
                ui.label("H: Toggle Help");
                ui.label("F3: Toggle Diagnostics");
            });
    }
}
