//! Session configuration, read from TOML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use toponym_sweep::NamerConfig;

/// Errors from reading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The text is not valid TOML for [`Config`].
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Record I/O options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Write long class aliases (`ArcCurve`) instead of short tags.
    pub long_class_names: bool,
}

/// Top-level configuration.
///
/// ```toml
/// [naming]
/// qualify_with_owner = true
///
/// [aliases]
/// PolyCurve = "Poly"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namer options.
    pub naming: NamerConfig,
    /// Record I/O options.
    pub io: IoConfig,
    /// Extra long → short class aliases, on top of the built-in ones.
    pub aliases: BTreeMap<String, String>,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
