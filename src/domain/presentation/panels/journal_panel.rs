use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::presentation::journal::{Journal, SwitchJournal};
use crate::domain::simulation::MenuState;

pub fn show_journal_panel(
    ctx: &mut egui::Context,
    journal: &Journal,
    ev_switch: &mut EventWriter<SwitchJournal>,
    next_menu: &mut NextState<MenuState>,
) {
    egui::Window::new("Journal")
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .default_width(360.0)
        .show(ctx, |ui| {
            if journal.entries.is_empty() {
                ui.label("Nothing written yet.");
            } else {
                let mut selected = journal.active_index();
                let current = journal
                    .active_entry()
                    .map(|entry| entry.name.as_str())
                    .unwrap_or_default();

                // Rebuilt from the entry list every frame so new entries show up.
                egui::ComboBox::from_label("Entry")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for (index, entry) in journal.entries.iter().enumerate() {
                            ui.selectable_value(&mut selected, index, entry.name.as_str());
                        }
                    });

                if selected != journal.active_index() {
                    ev_switch.send(SwitchJournal { index: selected });
                }

                ui.separator();
                if let Some(entry) = journal.active_entry() {
                    egui::ScrollArea::vertical()
                        .max_height(240.0)
                        .show(ui, |ui| {
                            ui.label(entry.text.as_str());
                        });
                }
            }

            ui.separator();
            if ui.button("Back").clicked() {
                next_menu.set(MenuState::Main);
            }
        });
}
