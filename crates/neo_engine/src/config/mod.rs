//! Configuration system
//!
//! Configuration structures are plain serde types. Any of them can be read
//! from or written to TOML or RON through the [`Config`] trait; the format is
//! chosen by file extension.

mod visualizer;

pub use serde::{Deserialize, Serialize};
pub use visualizer::{
    CameraConfig, ControlsConfig, LoggingConfig, PaletteConfig, RenderLoopConfig,
    ResourceConfig, SurfaceConfig, VisualizerConfig,
};

use std::path::{Path, PathBuf};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| e.to_string()),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        })
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Ron => {
                ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| e.to_string())
            }
        }
        .map_err(|message| ConfigError::Serialize { format, message })?;

        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format of `path`
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat { path: path.to_path_buf() }),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Ron => "RON",
        })
    }
}

/// Errors reading or writing a visualizer configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("Cannot access config file {}: {source}", path.display())]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid for its format
    #[error("Invalid {format} config {}: {message}", path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// Format picked from the extension
        format: ConfigFormat,
        /// Parser message
        message: String,
    },

    /// The configuration could not be encoded
    #[error("Cannot encode config as {format}: {message}")]
    Serialize {
        /// Target format
        format: ConfigFormat,
        /// Encoder message
        message: String,
    },

    /// The extension names no supported format
    #[error("Unsupported config format for {} (expected .toml or .ron)", path.display())]
    UnsupportedFormat {
        /// Offending path
        path: PathBuf,
    },
}
