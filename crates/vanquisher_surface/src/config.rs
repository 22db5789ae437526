//! Display configuration
//!
//! [`DisplayConfig`] carries what the window-creation call accepts (size,
//! title, mode flags, vsync) plus the backend to open. It can be loaded from
//! TOML or RON through the [`Config`] trait.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;
use crate::framebuffer::{pixel_count, MAX_PIXELS};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # Display Configuration
///
/// Parameters passed through to window creation. Missing fields in a config
/// file fall back to the defaults: a 320x240 resizable, decorated window
/// titled "Vanquisher" with vsync enabled, on the windowed backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Requested drawable width in pixels
    pub width: u32,
    /// Requested drawable height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
    /// Open fullscreen on the primary monitor
    pub fullscreen: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
    /// Show window decorations
    pub decorated: bool,
    /// Wait for vertical sync on update
    pub vsync: bool,
    /// Backend to open
    pub backend: BackendKind,
}

impl DisplayConfig {
    /// Set the requested size
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the window title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Select the backend
    #[must_use]
    pub const fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Reject configurations no backend can open
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "display size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(format!(
                "display size {}x{} exceeds the addressable range",
                self.width, self.height
            ));
        }
        if pixel_count(self.width, self.height).is_none() {
            return Err(format!(
                "display size {}x{} exceeds the {MAX_PIXELS} pixel limit",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            title: "Vanquisher".to_string(),
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
            backend: BackendKind::default(),
        }
    }
}

impl Config for DisplayConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vanquisher_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "width = 640\nbackend = \"headless\"\n").unwrap();

        let config = DisplayConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.width, 640);
        assert_eq!(config.height, 240);
        assert_eq!(config.backend, BackendKind::Headless);
        assert!(config.vsync);
    }

    #[test]
    fn test_ron_save_and_load() {
        let path = temp_path("display.ron");
        let config = DisplayConfig::default()
            .with_size(800, 600)
            .with_title("Ron Test")
            .with_backend(BackendKind::Headless);

        config.save_to_file(&path).unwrap();
        let loaded = DisplayConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DisplayConfig::default().save_to_file(temp_path("display.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let path = temp_path("broken.toml");
        std::fs::write(&path, "width = \"wide\"").unwrap();
        let err = DisplayConfig::load_from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate() {
        assert!(DisplayConfig::default().validate().is_ok());
        assert!(DisplayConfig::default().with_size(0, 240).validate().is_err());
        assert!(DisplayConfig::default().with_size(u32::MAX, 1).validate().is_err());
        assert!(DisplayConfig::default().with_size(8192, 8192).validate().is_ok());
        assert!(DisplayConfig::default()
            .with_size(i32::MAX as u32, i32::MAX as u32)
            .validate()
            .is_err());
    }
}
