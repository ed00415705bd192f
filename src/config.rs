//! Tunable game parameters, read from an optional JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "space_shooter.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds the ship ignores further hits after being hit.
    pub invincibility_secs: f32,
    /// Boss sweeps between volleys at levels 3, 4 and 5.
    pub boss_fire_intervals: [u32; 3],
    /// Let shield power-ups drift sideways while they fall.
    pub shield_zigzag: bool,
    /// Where high score and saved game live.
    pub save_path: PathBuf,
    pub frame_rate: u32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            invincibility_secs: 1.0,
            boss_fire_intervals: [5, 4, 3],
            shield_zigzag: false,
            save_path: PathBuf::from("save-file.txt"),
            frame_rate: 60,
            seed: None,
        }
    }
}

impl Config {
    /// Number of boss sweeps between volleys for `level`.  Levels below 3
    /// use the level-3 figure.
    pub fn boss_fire_interval(&self, level: u32) -> u32 {
        let idx = level.saturating_sub(3).min(2) as usize;
        self.boss_fire_intervals[idx].max(1)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
