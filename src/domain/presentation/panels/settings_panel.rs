use bevy::prelude::*;
use bevy_egui::egui;

use crate::config::{ControlScheme, GameSettings};
use crate::domain::controls::{Keybinds, MoveAction, RebindOutcome};
use crate::domain::simulation::MenuState;

/// Direction waiting for its new key, if the player clicked one.
#[derive(Resource, Default, Debug, PartialEq, Eq)]
pub struct PendingRebind(pub Option<MoveAction>);

/// Applies a captured key to the pending direction. Reserved keys leave the
/// request pending so the player can try another key.
pub fn resolve_rebind(
    pending: &mut PendingRebind,
    pressed_key: Option<KeyCode>,
    keybinds: &mut Keybinds,
) -> Option<RebindOutcome> {
    let (Some(action), Some(key)) = (pending.0, pressed_key) else {
        return None;
    };
    let outcome = keybinds.rebind(action, key);
    match outcome {
        RebindOutcome::Reserved => debug!("{:?} is reserved, still waiting", key),
        RebindOutcome::Bound => {
            debug!("Rebound {} to {:?}", action.label(), key);
            pending.0 = None;
        }
        RebindOutcome::Swapped(other) => {
            debug!(
                "Rebound {} to {:?}, {} takes {:?}",
                action.label(),
                key,
                other.label(),
                keybinds.key_for(other)
            );
            pending.0 = None;
        }
    }
    Some(outcome)
}

pub fn show_settings_panel(
    ctx: &mut egui::Context,
    settings: &mut GameSettings,
    keybinds: &mut Keybinds,
    pending: &mut PendingRebind,
    pressed_key: Option<KeyCode>,
    next_menu: &mut NextState<MenuState>,
) {
    egui::Window::new("Settings")
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.checkbox(&mut settings.head_bob_enabled, "Head Bob");
            ui.checkbox(&mut settings.footstep_sounds_enabled, "Footstep Sounds");

            ui.separator();

            egui::ComboBox::from_label("Control Scheme")
                .selected_text(format!("{:?}", settings.control_scheme))
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut settings.control_scheme,
                        ControlScheme::Keyboard,
                        "Keyboard",
                    );
                    ui.selectable_value(
                        &mut settings.control_scheme,
                        ControlScheme::Gamepad,
                        "Gamepad",
                    );
                });
            ui.add(
                egui::Slider::new(&mut settings.mouse_sensitivity, 0.0005..=0.01)
                    .logarithmic(true)
                    .text("Mouse Sensitivity"),
            );
            ui.add(egui::Slider::new(&mut settings.move_speed, 1.0..=10.0).text("Walk Speed"));

            ui.separator();

            ui.label("Keybinds");
            for action in MoveAction::ALL {
                ui.horizontal(|ui| {
                    ui.label(action.label());
                    let button_text = if pending.0 == Some(action) {
                        "Press a key...".to_string()
                    } else {
                        format!("{:?}", keybinds.key_for(action))
                    };
                    if ui.button(button_text).clicked() {
                        pending.0 = Some(action);
                    }
                });
            }

            if let Some(RebindOutcome::Reserved) = resolve_rebind(pending, pressed_key, keybinds) {
                ui.colored_label(egui::Color32::YELLOW, "That key is reserved.");
            }

            ui.separator();
            if ui.button("Back").clicked() {
                next_menu.set(MenuState::Main);
            }
        });
}
