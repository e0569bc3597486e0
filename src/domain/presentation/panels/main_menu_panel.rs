use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::simulation::MenuState;

pub fn show_main_menu_panel(
    ctx: &mut egui::Context,
    next_menu: &mut NextState<MenuState>,
    ev_exit: &mut EventWriter<AppExit>,
) {
    egui::Window::new("Paused")
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered_justified(|ui| {
                if ui.button("Resume").clicked() {
                    next_menu.set(MenuState::Hidden);
                }
                if ui.button("Settings").clicked() {
                    next_menu.set(MenuState::Settings);
                }
                if ui.button("Journal").clicked() {
                    next_menu.set(MenuState::Journal);
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    info!("Quit requested from menu");
                    ev_exit.send(AppExit::Success);
                }
            });
        });
}
