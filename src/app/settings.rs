use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::error::AppError;

/// Keep the Open Recent menu short.
pub const MAX_RECENT_FOLDERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FontChoice {
    ScreenBold,
    Courier,
    HelveticaMono,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Wiki folders most recently opened, newest first.
    #[serde(default)]
    pub recent_folders: Vec<String>,

    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font")]
    pub font: FontChoice,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_highlighting")]
    pub highlighting_enabled: bool,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::SystemDefault
}

fn default_font() -> FontChoice {
    FontChoice::Courier
}

fn default_font_size() -> u32 {
    16
}

fn default_highlighting() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            recent_folders: Vec::new(),
            theme_mode: default_theme_mode(),
            font: default_font(),
            font_size: default_font_size(),
            highlighting_enabled: default_highlighting(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                let _ = default.save();
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("markwiki");
        path.push("settings.json");
        path
    }

    /// Move `folder` to the front of the recent list, keeping at most
    /// [`MAX_RECENT_FOLDERS`] entries.
    pub fn add_recent_folder(&mut self, folder: &str) {
        self.recent_folders.retain(|f| f != folder);
        self.recent_folders.insert(0, folder.to_string());
        self.recent_folders.truncate(MAX_RECENT_FOLDERS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert!(settings.recent_folders.is_empty());
        assert_eq!(settings.theme_mode, ThemeMode::SystemDefault);
        assert_eq!(settings.font, FontChoice::Courier);
        assert_eq!(settings.font_size, 16);
        assert!(settings.highlighting_enabled);
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut settings = AppSettings::default();
        settings.add_recent_folder("/home/user/wiki");
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Simulate an old config missing new fields
        let json = r#"{"theme_mode": "Dark"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.font_size, 16); // default
        assert!(settings.recent_folders.is_empty()); // default
    }

    #[test]
    fn test_recent_folders_dedupe_and_order() {
        let mut settings = AppSettings::default();
        settings.add_recent_folder("/a");
        settings.add_recent_folder("/b");
        settings.add_recent_folder("/a");
        assert_eq!(settings.recent_folders, vec!["/a", "/b"]);
    }

    #[test]
    fn test_recent_folders_capped() {
        let mut settings = AppSettings::default();
        for i in 0..8 {
            settings.add_recent_folder(&format!("/wiki{}", i));
        }
        assert_eq!(settings.recent_folders.len(), MAX_RECENT_FOLDERS);
        assert_eq!(settings.recent_folders[0], "/wiki7");
    }
}
