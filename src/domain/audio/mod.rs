use bevy::audio::Volume;
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::simulation::FootstepEvent;

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootstepConfig {
    /// Asset path of the clip, relative to `assets/`.
    pub clip: String,
    pub volume: f32,
    /// Playback speed jitter, as a fraction either side of 1.0.
    pub pitch_variation: f32,
}

impl Default for FootstepConfig {
    fn default() -> Self {
        Self {
            clip: "sounds/footstep.ogg".to_string(),
            volume: 0.5,
            pitch_variation: 0.1,
        }
    }
}

#[derive(Resource)]
pub struct FootstepAssets {
    pub clip: Handle<AudioSource>,
}

pub struct FootstepAudioPlugin;
impl Plugin for FootstepAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FootstepConfig>()
            .add_systems(Startup, load_footstep_clip)
            .add_systems(Update, play_footsteps);
    }
}

pub fn footstep_speed<R: Rng + ?Sized>(rng: &mut R, variation: f32) -> f32 {
    if variation <= 0.0 {
        return 1.0;
    }
    1.0 + rng.gen_range(-variation..=variation)
}

fn load_footstep_clip(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<FootstepConfig>,
) {
    debug!("Loading footstep clip {}", config.clip);
    commands.insert_resource(FootstepAssets {
        clip: asset_server.load(config.clip.clone()),
    });
}

fn play_footsteps(
    mut commands: Commands,
    mut ev_footstep: EventReader<FootstepEvent>,
    assets: Option<Res<FootstepAssets>>,
    config: Res<FootstepConfig>,
) {
    // Several fixed ticks can land in one frame; they share a single clip.
    let Some(step) = ev_footstep.read().last() else {
        return;
    };
    let Some(assets) = assets else {
        return;
    };

    let speed = footstep_speed(&mut rand::thread_rng(), config.pitch_variation);
    debug!("Footstep from {:?} at speed {:.2}", step.camera, speed);
    commands.spawn((
        AudioBundle {
            source: assets.clip.clone(),
            settings: PlaybackSettings::DESPAWN
                .with_volume(Volume::new(config.volume))
                .with_speed(speed),
        },
        Name::new("Footstep"),
    ));
}
