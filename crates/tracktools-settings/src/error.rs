//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration files
//! and for turning fence dialog state into generator parameters.

use std::io;
use thiserror::Error;
use tracktools_core::ParameterError;

use crate::form::ApplyBlocker;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The configuration file extension is neither `.json` nor `.toml`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// The dialog is not in a state that allows applying.
    #[error("Cannot apply: {0}")]
    ApplyBlocked(ApplyBlocker),

    /// A dialog choice referred to an entry that does not exist or is locked.
    #[error("Invalid choice for '{field}': {reason}")]
    InvalidChoice { field: &'static str, reason: String },

    /// Generator parameters failed validation.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

impl SettingsError {
    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
