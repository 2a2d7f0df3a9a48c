//! Core error types for betterrest-core.
//!
//! This module defines the error hierarchy using thiserror. Model errors never
//! reach the end user through [`crate::BedtimeEstimator::estimate`]; they are
//! only visible through the fallible `try_*` entry points.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for betterrest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Sleep model errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a sleep model or running inference.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The artifact file could not be read
    #[error("Failed to read model artifact at {path}: {source}")]
    ArtifactUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact file could not be written
    #[error("Failed to write model artifact to {path}: {source}")]
    ArtifactUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be parsed
    #[error("Malformed model artifact: {0}")]
    ArtifactMalformed(String),

    /// A coefficient in the artifact is NaN or infinite
    #[error("Coefficient '{0}' is not a finite number")]
    NonFiniteCoefficient(&'static str),

    /// The model returned a value that is not a usable sleep duration
    #[error("Invalid prediction: {0} seconds")]
    InvalidPrediction(f64),

    /// Inference failed inside the model
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// The configuration directory could not be created
    #[error("Failed to prepare configuration directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<toml::de::Error> for ModelError {
    fn from(err: toml::de::Error) -> Self {
        ModelError::ArtifactMalformed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
