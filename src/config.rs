use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::controllers::ThemeMode;

/// Startup configuration. Read once; the app never writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme applied at startup.
    pub theme: ThemeMode,
    /// Close the navigation overlay after a link is followed.
    pub close_nav_on_navigate: bool,
    /// Explicit capture node, e.g. "/dev/video2". First `/dev/video*` if unset.
    pub camera_device: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            close_nav_on_navigate: true,
            camera_device: None,
        }
    }
}

impl Config {
    /// Directory: ~/.config/livestream-studio/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("livestream-studio");
        p
    }

    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load from `path`, returning defaults if the file doesn't exist or is invalid.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.theme, ThemeMode::Light);
        assert!(config.close_nav_on_navigate);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme": "dark", "camera_device": "/dev/video2" }"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.theme, ThemeMode::Dark);
        assert!(config.close_nav_on_navigate);
        assert_eq!(config.camera_device, Some(PathBuf::from("/dev/video2")));
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ theme = dark").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
