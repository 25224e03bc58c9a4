//! Demo settings
//!
//! Read once at startup from `settings.json` in the working directory.
//! Every field is optional; anything missing keeps its default. Nothing is
//! ever written back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SPAWNER_MAX_BALLS;

/// File looked up in the working directory by [`Settings::load`]
pub const SETTINGS_FILE: &str = "settings.json";

/// Default cap on same-effect voices per frame
pub const DEFAULT_MAX_VOICES_PER_FRAME: usize = 8;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Demo settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// Most voices of one sound effect started in a single frame
    pub max_voices_per_frame: usize,

    // === Assets ===
    /// Directory the asset file names below are resolved against
    pub asset_dir: PathBuf,
    /// Target sprite (spawner demo)
    pub sprite_file: String,
    pub bounce_sound: String,
    pub interact_sound: String,
    /// Background music (halo demo)
    pub music_file: String,
    /// HUD font override; the bundled font is used when unset or unusable
    pub font_path: Option<PathBuf>,

    // === Simulation ===
    /// Spawn RNG seed; random per run when unset
    pub seed: Option<u64>,
    /// Spawning pauses while this many balls are live
    pub max_balls: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            max_voices_per_frame: DEFAULT_MAX_VOICES_PER_FRAME,

            asset_dir: PathBuf::from("."),
            sprite_file: "lebron.png".to_string(),
            bounce_sound: "bounce.wav".to_string(),
            interact_sound: "interact.wav".to_string(),
            music_file: "background_music.mp3".to_string(),
            font_path: None,

            seed: None,
            max_balls: SPAWNER_MAX_BALLS,
        }
    }
}

impl Settings {
    /// Resolve an asset file name against `asset_dir`
    pub fn asset_path(&self, file: &str) -> PathBuf {
        self.asset_dir.join(file)
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    /// Load `settings.json` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            log::info!("No {SETTINGS_FILE} found, using default settings");
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
