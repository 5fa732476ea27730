//! Error types for tapcount.
//!
//! Registering taps never fails. Errors only come from the ambient pieces
//! around the core: loading configuration and locating an async runtime.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while setting up a tap surface.
#[derive(Debug, Error)]
pub enum TapError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// No scheduler is available on the current thread.
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}
