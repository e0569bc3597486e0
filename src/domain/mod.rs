//! Domain modules split by discipline.
//! - `simulation`: head-bob state machine, player rig, and menu state.
//! - `controls`: keyboard, gamepad, and mouse-look input feeding the player.
//! - `presentation`: pause menu, settings, journal, and HUD overlays.
//! - `audio`: footstep playback.

pub mod audio;
pub mod controls;
pub mod presentation;
pub mod simulation;

pub use audio::FootstepAudioPlugin;
pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::SimPlugin;
