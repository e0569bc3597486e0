use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::asset::io::file::FileAssetReader;
use bevy::prelude::*;
use ron::de::SpannedError;
use serde::{Deserialize, Serialize};

use crate::domain::audio::FootstepConfig;
use crate::domain::presentation::journal::{Journal, JournalEntry};
use crate::domain::simulation::{BobToggles, HeadBobConfig};

/// Config location inside the asset folder.
pub const DEFAULT_CONFIG_PATH: &str = "config/game.ron";

/// Resolves the config the way the asset server resolves its files, so the
/// game finds it no matter which directory it is started from.
pub fn default_config_path() -> PathBuf {
    FileAssetReader::get_base_path()
        .join(AssetPlugin::default().file_path)
        .join(DEFAULT_CONFIG_PATH)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Movement magnitude is the squared length of the WASD vector.
    #[default]
    Keyboard,
    /// Movement magnitude is the raw, signed left stick Y axis.
    Gamepad,
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub head_bob_enabled: bool,
    pub footstep_sounds_enabled: bool,
    pub controls_enabled: bool,
    pub control_scheme: ControlScheme,
    pub mouse_sensitivity: f32,
    pub move_speed: f32,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            head_bob_enabled: true,
            footstep_sounds_enabled: true,
            controls_enabled: true,
            control_scheme: ControlScheme::Keyboard,
            mouse_sensitivity: 0.002,
            move_speed: 4.0,
            show_help: true,
            show_diagnostics: false,
        }
    }
}

impl GameSettings {
    pub fn bob_toggles(&self) -> BobToggles {
        BobToggles {
            head_bob: self.head_bob_enabled,
            footsteps: self.footstep_sounds_enabled,
        }
    }
}

/// Head-bob parameters handed to every first-person camera at spawn.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct HeadBobDefaults(pub HeadBobConfig);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub head_bob: HeadBobConfig,
    pub settings: GameSettings,
    pub footsteps: FootstepConfig,
    pub journal: Vec<JournalEntry>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(SpannedError),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "malformed config: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<SpannedError> for ConfigError {
    fn from(error: SpannedError) -> Self {
        ConfigError::Parse(error)
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        let bob = &self.head_bob;
        if !(bob.bobbing_speed.is_finite() && bob.bobbing_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bobbing_speed must be a non-negative number, got {}",
                bob.bobbing_speed
            )));
        }
        if !(bob.bobbing_amount.is_finite() && bob.bobbing_amount >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bobbing_amount must be a non-negative number, got {}",
                bob.bobbing_amount
            )));
        }
        if !bob.midpoint.is_finite() {
            return Err(ConfigError::Invalid("midpoint must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.footsteps.volume) {
            return Err(ConfigError::Invalid(format!(
                "footstep volume must be within 0..=1, got {}",
                self.footsteps.volume
            )));
        }
        if !(0.0..1.0).contains(&self.footsteps.pitch_variation) {
            return Err(ConfigError::Invalid(format!(
                "pitch_variation must be within 0..1, got {}",
                self.footsteps.pitch_variation
            )));
        }
        Ok(self)
    }
}

pub fn parse_config(source: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(source)?;
    config.validate()
}

pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let source = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    parse_config(&source)
}

/// Reads the config file into resources, falling back to defaults when it
/// is missing or rejected.
pub struct ConfigPlugin {
    pub path: PathBuf,
}

impl Default for ConfigPlugin {
    fn default() -> Self {
        Self {
            path: default_config_path(),
        }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = match load_config(&self.path) {
            Ok(config) => {
                info!(
                    "Loaded {} ({} journal entries)",
                    self.path.display(),
                    config.journal.len()
                );
                config
            }
            Err(e) => {
                warn!("Using default config: {}", e);
                GameConfig::default()
            }
        };

        app.insert_resource(config.settings)
            .insert_resource(config.footsteps)
            .insert_resource(HeadBobDefaults(config.head_bob))
            .insert_resource(Journal::new(config.journal));
    }
}
