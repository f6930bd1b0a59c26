//! Application settings persistence
//!
//! Handles saving and loading user preferences.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::lyrics::SyncConfig;

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Lyric view geometry and timing
    #[serde(default)]
    pub lyrics: SyncConfig,
    /// Font selection
    #[serde(default)]
    pub display: DisplaySettings,
    /// Simulated playback used by the demo host
    #[serde(default)]
    pub playback: PlaybackSettings,
}

/// Display and interface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Font family for lyrics measurement; system sans-serif when `None`
    #[serde(default)]
    pub font_family: Option<String>,
    /// Measure with system fonts via cosmic-text. When off, a fixed
    /// per-character advance is used, which starts instantly.
    #[serde(default = "default_true")]
    pub use_system_fonts: bool,
}

/// Playback-related settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// How often the player reports progress
    #[serde(default = "default_progress_interval")]
    pub progress_interval_ms: u64,
    /// Frame interval while animations are running
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_progress_interval() -> u64 {
    1000
}

fn default_frame_interval() -> u64 {
    16 // ~60 fps
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_family: None,
            use_system_fonts: true,
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: default_progress_interval(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lyricsync", "LyricSync")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        Self::file_path()
            .and_then(|path| Self::load_from_file(&path).ok())
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(path) = Self::file_path() {
            self.save_to_file(&path)
        } else {
            Err(SettingsError::Io(
                "Could not determine config directory".to_string(),
            ))
        }
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("lyricsync-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = scratch_path("roundtrip/settings.json");
        let mut settings = Settings::default();
        settings.lyrics.hide_delay_ms = 1500;
        settings.display.font_family = Some("Noto Sans".to_string());

        settings.save_to_file(&path).expect("settings save");
        let loaded = Settings::load_from_file(&path).expect("settings load");
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "lyrics": { "touch_slop": 12.0 } }"#).expect("parses");
        assert_eq!(settings.lyrics.touch_slop, 12.0);
        assert_eq!(settings.lyrics.max_line_width, 680.0);
        assert!(settings.display.use_system_fonts);
        assert_eq!(settings.playback.progress_interval_ms, 1000);
    }

    #[test]
    fn test_load_errors_are_typed() {
        let missing = Settings::load_from_file(&scratch_path("does-not-exist.json"));
        assert!(matches!(missing, Err(SettingsError::Io(_))));

        let path = scratch_path("broken/settings.json");
        std::fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        std::fs::write(&path, "{ not json").expect("write");
        let broken = Settings::load_from_file(&path);
        assert!(matches!(broken, Err(SettingsError::Parse(_))));

        let _ = std::fs::remove_file(&path);
    }
}
