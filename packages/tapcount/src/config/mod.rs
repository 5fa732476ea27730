//! Configuration for tap disambiguation.
//!
//! Configuration files use JSONC format (JSON with comments). Both single-line
//! (`//`) and multi-line (`/* */`) comments are allowed.
//!
//! ```jsonc
//! {
//!     // Quiet period after the latest tap, in milliseconds.
//!     "sensitivity": 300
//! }
//! ```

mod schema;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use schema::{generate_schema, generate_schema_json};

/// Default sensitivity window in milliseconds.
pub const DEFAULT_SENSITIVITY_MS: u64 = 250;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("No configuration file found at {}", .0.display())]
    NotFound(PathBuf),
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration for a tap surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TapConfig {
    /// Quiet period in milliseconds after the latest tap. A further tap inside
    /// this window extends the sequence, otherwise the pending count resolves.
    /// Negative values fall back to the default.
    /// Default: 250
    pub sensitivity: i64,
}

impl Default for TapConfig {
    #[allow(clippy::cast_possible_wrap)] // 250 fits in an i64
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY_MS as i64,
        }
    }
}

impl TapConfig {
    /// Creates a configuration with the given sensitivity in milliseconds.
    #[must_use]
    pub const fn with_sensitivity_ms(sensitivity: i64) -> Self { Self { sensitivity } }

    /// Returns the effective sensitivity in milliseconds.
    ///
    /// Negative values are clamped to [`DEFAULT_SENSITIVITY_MS`].
    #[must_use]
    pub fn sensitivity_ms(&self) -> u64 {
        u64::try_from(self.sensitivity).unwrap_or(DEFAULT_SENSITIVITY_MS)
    }

    /// Returns the effective sensitivity window.
    #[must_use]
    pub fn sensitivity_window(&self) -> Duration { Duration::from_millis(self.sensitivity_ms()) }

    /// Whether the configured sensitivity had to be clamped.
    #[must_use]
    pub const fn is_clamped(&self) -> bool { self.sensitivity < 0 }
}

/// Loads configuration from a JSONC file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist.
/// Returns `ConfigError::IoError` if the file exists but could not be read.
/// Returns `ConfigError::ParseError` if the file contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<TapConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: TapConfig = serde_json::from_reader(reader)?;

    tracing::debug!(
        path = %path.display(),
        sensitivity = config.sensitivity,
        "loaded tap configuration"
    );

    Ok(config)
}

/// Parses configuration from JSONC text.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the text is not valid JSON once comments are stripped.
pub fn load_config_from_str(text: &str) -> Result<TapConfig, ConfigError> {
    let reader = json_comments::StripComments::new(text.as_bytes());
    Ok(serde_json::from_reader(reader)?)
}
