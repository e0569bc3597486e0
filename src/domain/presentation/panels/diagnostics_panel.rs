use bevy::diagnostic::{
    DiagnosticsStore, EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
};
use bevy_egui::egui;

use crate::config::GameSettings;
use crate::domain::simulation::HeadBobState;

pub fn show_diagnostics_panel(
    ctx: &mut egui::Context,
    diagnostics: &DiagnosticsStore,
    settings: &GameSettings,
    bob: Option<&HeadBobState>,
) {
    if settings.show_diagnostics {
        egui::Window::new("Diagnostics").show(ctx, |ui| {
            if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                if let Some(value) = fps.smoothed() {
                    ui.label(format!("FPS: {:.1}", value));
                }
            }
            if let Some(entity_count) = diagnostics.get(&EntityCountDiagnosticsPlugin::ENTITY_COUNT)
            {
                if let Some(value) = entity_count.value() {
                    ui.label(format!("Entities: {}", value));
                }
            }
            if let Some(bob) = bob {
                ui.label(format!("Bob phase: {:.2} rad", bob.phase));
                ui.label(format!(
                    "Footstep: {}",
                    if bob.footstep_armed { "armed" } else { "spent" }
                ));
            }
        });
    }
}
