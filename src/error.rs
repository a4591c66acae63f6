//! Error types for voxbatch.
//!
//! Only batch-fatal conditions live here. Per-item transcription failures
//! are data, not errors: they become [`crate::asr::Outcome::Failed`] and
//! surface in the augmented manifest.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxbatchError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Manifest errors (batch-fatal)
    #[error("Manifest file not found at {path}")]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest: {0}")]
    ManifestParse(#[from] csv::Error),

    #[error("Manifest is missing required column '{column}'")]
    ManifestColumnMissing { column: String },

    #[error("Failed to write augmented manifest to {path}: {message}")]
    ManifestWrite { path: String, message: String },

    // Provider errors (client construction and liveness only)
    #[error("Failed to build provider client: {message}")]
    ProviderClient { message: String },

    #[error("Provider liveness check failed: {message}")]
    ProviderPing { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VoxbatchError>;
