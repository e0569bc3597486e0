pub mod journal;
pub mod panels;

use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::config::GameSettings;
use crate::domain::controls::Keybinds;
use crate::domain::simulation::{FirstPersonCamera, HeadBobState, MenuState};
use journal::{apply_journal_switch, Journal, SwitchJournal};
use panels::diagnostics_panel::show_diagnostics_panel;
use panels::help_panel::show_help_panel;
use panels::journal_panel::show_journal_panel;
use panels::main_menu_panel::show_main_menu_panel;
use panels::settings_panel::{show_settings_panel, PendingRebind};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<Journal>()
            .init_resource::<PendingRebind>()
            .add_event::<SwitchJournal>()
            .add_systems(OnExit(MenuState::Settings), clear_pending_rebind)
            .add_systems(
                Update,
                (
                    menu_ui.run_if(not(in_state(MenuState::Hidden))),
                    hud_ui,
                    apply_journal_switch,
                )
                    .chain(),
            );
    }
}

#[allow(clippy::too_many_arguments)]
fn menu_ui(
    mut contexts: EguiContexts,
    menu: Res<State<MenuState>>,
    mut next_menu: ResMut<NextState<MenuState>>,
    mut settings: ResMut<GameSettings>,
    mut keybinds: ResMut<Keybinds>,
    journal: Res<Journal>,
    mut ev_switch: EventWriter<SwitchJournal>,
    mut ev_exit: EventWriter<AppExit>,
    mut pending: ResMut<PendingRebind>,
) {
    let ctx = contexts.ctx_mut();

    match menu.get() {
        MenuState::Hidden => {}
        MenuState::Main => show_main_menu_panel(ctx, &mut next_menu, &mut ev_exit),
        MenuState::Settings => {
            let pressed_key = ctx.input(|i| {
                i.events.iter().rev().find_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => egui_to_bevy_keycode(*key),
                    _ => None,
                })
            });
            show_settings_panel(
                ctx,
                &mut settings,
                &mut keybinds,
                &mut pending,
                pressed_key,
                &mut next_menu,
            );
        }
        MenuState::Journal => show_journal_panel(ctx, &journal, &mut ev_switch, &mut next_menu),
    }
}

/// Drops a rebind still waiting for its key once Settings closes.
fn clear_pending_rebind(mut pending: ResMut<PendingRebind>) {
    if let Some(action) = pending.0.take() {
        debug!("Dropped pending rebind of {}", action.label());
    }
}

fn hud_ui(
    mut contexts: EguiContexts,
    settings: Res<GameSettings>,
    diagnostics: Res<DiagnosticsStore>,
    cameras: Query<&HeadBobState, With<FirstPersonCamera>>,
) {
    let ctx = contexts.ctx_mut();
    show_help_panel(ctx, &settings);
    show_diagnostics_panel(ctx, &diagnostics, &settings, cameras.iter().next());
}

/// Keys that can be bound to movement; anything else is ignored while rebinding.
fn egui_to_bevy_keycode(key: egui::Key) -> Option<KeyCode> {
    let code = match key {
        egui::Key::A => KeyCode::KeyA,
        egui::Key::B => KeyCode::KeyB,
        egui::Key::C => KeyCode::KeyC,
        egui::Key::D => KeyCode::KeyD,
        egui::Key::E => KeyCode::KeyE,
        egui::Key::F => KeyCode::KeyF,
        egui::Key::G => KeyCode::KeyG,
        egui::Key::H => KeyCode::KeyH,
        egui::Key::I => KeyCode::KeyI,
        egui::Key::J => KeyCode::KeyJ,
        egui::Key::K => KeyCode::KeyK,
        egui::Key::L => KeyCode::KeyL,
        egui::Key::M => KeyCode::KeyM,
        egui::Key::N => KeyCode::KeyN,
        egui::Key::O => KeyCode::KeyO,
        egui::Key::P => KeyCode::KeyP,
        egui::Key::Q => KeyCode::KeyQ,
        egui::Key::R => KeyCode::KeyR,
        egui::Key::S => KeyCode::KeyS,
        egui::Key::T => KeyCode::KeyT,
        egui::Key::U => KeyCode::KeyU,
        egui::Key::V => KeyCode::KeyV,
        egui::Key::W => KeyCode::KeyW,
        egui::Key::X => KeyCode::KeyX,
        egui::Key::Y => KeyCode::KeyY,
        egui::Key::Z => KeyCode::KeyZ,
        egui::Key::ArrowUp => KeyCode::ArrowUp,
        egui::Key::ArrowDown => KeyCode::ArrowDown,
        egui::Key::ArrowLeft => KeyCode::ArrowLeft,
        egui::Key::ArrowRight => KeyCode::ArrowRight,
        egui::Key::Space => KeyCode::Space,
        _ => return None,
    };
    Some(code)
}
