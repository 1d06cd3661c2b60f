//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` fills missing fields from `Default::default()`, so a
//! config file only needs the keys it wants to change.
//!
//! Tabpad never writes a config file and never looks one up on its own: a
//! file is only read when the user names it with `--config`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window and editor appearance
    pub ui: UiConfig,

    /// Line-number gutter geometry
    pub gutter: GutterConfig,

    /// File dialog and open/save behavior
    pub files: FileConfig,

    /// Keyboard settings
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the given file, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }
}

/// UI appearance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Application name shown in the window title
    pub app_name: String,

    /// Font size in points
    pub font_size: f32,

    /// Line height multiplier
    pub line_height: f32,

    /// Show the line-number gutter
    pub line_numbers: bool,

    /// Initial window width
    pub window_width: f32,

    /// Initial window height
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            app_name: "Tabpad".to_string(),
            font_size: 14.0,
            line_height: 1.3,
            line_numbers: true,
            window_width: 800.0,
            window_height: 600.0,
        }
    }
}

/// Gutter geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GutterConfig {
    /// Fixed margin added to the digit columns, in pixels
    pub margin: f32,

    /// Minimum number of digit columns reserved
    pub min_digits: usize,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            margin: 3.0,
            min_digits: 4,
        }
    }
}

/// File handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Dialog filters as (label, extensions)
    pub filters: Vec<FileFilter>,

    /// Keep the freshly created tab when reading the opened file fails
    pub keep_tab_on_failed_open: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            filters: vec![
                FileFilter {
                    name: "Text Files".to_string(),
                    extensions: vec!["txt".to_string()],
                },
                FileFilter {
                    name: "All Files".to_string(),
                    extensions: vec!["*".to_string()],
                },
            ],
            keep_tab_on_failed_open: true,
        }
    }
}

/// A named group of extensions offered by the file dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Keyboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Custom key bindings, e.g. `"ctrl+k" = "file.save"`
    pub bindings: HashMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ui.font_size, 14.0);
        assert!(config.ui.line_numbers);
        assert_eq!(config.gutter.min_digits, 4);
        assert_eq!(config.gutter.margin, 3.0);
        assert!(config.files.keep_tab_on_failed_open);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.ui.font_size, config.ui.font_size);
        assert_eq!(parsed.files.filters, config.files.filters);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[ui]\nfont_size = 18.0\n\n[keyboard.bindings]\n\"ctrl+k\" = \"file.save\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.ui.font_size, 18.0);
        assert_eq!(config.ui.line_height, 1.3);
        assert_eq!(config.gutter.min_digits, 4);
        assert_eq!(
            config.keyboard.bindings.get("ctrl+k").map(String::as_str),
            Some("file.save")
        );
    }

    #[test]
    fn test_load_without_path_is_default() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.ui.app_name, "Tabpad");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui\nfont_size = ").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load_from(&missing), Err(ConfigError::Io(_))));
    }
}
