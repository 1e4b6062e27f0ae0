//! Configuration file support.
//!
//! ```toml
//! [cmake]
//! executable = "/usr/bin/cmake"
//!
//! [render]
//! format = "markdown"
//! ```

use crate::render::RenderFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read {file}: {source}")]
    Read {
        file: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the config file.
    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: PathBuf,
        source: toml::de::Error,
    },

    /// No executable configured and none on PATH.
    #[error("CMake not found. Install it or set [cmake] executable in the config: {0}")]
    CMakeNotFound(#[from] which::Error),
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cmake: CMakeConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CMakeConfig {
    /// Path to the cmake executable. Looked up on PATH when unset.
    pub executable: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub format: RenderFormat,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            file: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            file: path.to_path_buf(),
            source,
        })
    }

    /// Load the user config file if there is one, defaults otherwise.
    pub fn discover() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/cmake-doc/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cmake-doc").join("config.toml"))
    }

    /// The configured cmake executable, or `cmake` from PATH.
    pub fn cmake_executable(&self) -> Result<PathBuf, ConfigError> {
        match &self.cmake.executable {
            Some(path) => Ok(path.clone()),
            None => Ok(which::which("cmake")?),
        }
    }
}
