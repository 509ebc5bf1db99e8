// Configuration management
//
// User-facing settings persisted as TOML next to the binary. Missing or
// unreadable files fall back to defaults so a fresh checkout runs without
// any setup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const CONFIG_FILE: &str = "famicore.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    pub video: VideoConfig,
    pub audio: AudioConfig,
    pub paths: PathsConfig,
}

/// Video settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Integer window scale (1-8)
    pub scale: u32,

    /// Enable VSync-style frame pacing
    pub vsync: bool,
}

/// Audio settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Enable audio output
    pub enabled: bool,

    /// Master volume (0.0-1.0)
    pub volume: f32,

    /// Host sample rate in Hz
    pub sample_rate: u32,
}

/// Output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for screenshots
    pub screenshot_dir: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            scale: 3,
            vsync: true,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            enabled: true,
            volume: 1.0,
            sample_rate: 48_000,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            screenshot_dir: "screenshots".to_string(),
        }
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig::default(),
            audio: AudioConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration, falling back to defaults when the file is
    /// missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path.as_ref()) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("malformed config {:?}: {}; using defaults", path.as_ref(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the configuration
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let contents = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, contents)
    }
}
