use crate::defaults;
use crate::error::{Result, VoxbatchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderSection,
    pub batch: BatchSection,
    pub manifest: ManifestSection,
}

/// Transcription provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderSection {
    /// Base URL of the provider service.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Batch execution configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchSection {
    /// Maximum concurrent transcription requests.
    pub concurrency: usize,
    /// Process only the first N manifest rows.
    pub limit: Option<usize>,
}

/// Manifest path configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ManifestSection {
    /// Path to the input manifest CSV.
    pub path: Option<PathBuf>,
    /// Directory audio references are resolved against.
    pub audio_dir: Option<PathBuf>,
    /// Path for the augmented output manifest.
    pub output: Option<PathBuf>,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            endpoint: defaults::ENDPOINT.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
        }
    }
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            concurrency: defaults::CONCURRENCY,
            limit: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    // Re-panic on invalid TOML or other errors
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOXBATCH_ENDPOINT → provider.endpoint
    /// - VOXBATCH_CONCURRENCY → batch.concurrency
    /// - VOXBATCH_AUDIO_DIR → manifest.audio_dir
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("VOXBATCH_ENDPOINT")
            && !endpoint.is_empty()
        {
            self.provider.endpoint = endpoint;
        }

        if let Ok(concurrency) = std::env::var("VOXBATCH_CONCURRENCY")
            && let Ok(n) = concurrency.parse::<usize>()
        {
            self.batch.concurrency = n;
        }

        if let Ok(audio_dir) = std::env::var("VOXBATCH_AUDIO_DIR")
            && !audio_dir.is_empty()
        {
            self.manifest.audio_dir = Some(PathBuf::from(audio_dir));
        }

        self
    }

    /// Reject configurations that can never run.
    pub fn validate(&self) -> Result<()> {
        if self.batch.concurrency == 0 {
            return Err(VoxbatchError::ConfigInvalidValue {
                key: "batch.concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.provider.timeout_secs == 0 {
            return Err(VoxbatchError::ConfigInvalidValue {
                key: "provider.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.provider.endpoint.is_empty() {
            return Err(VoxbatchError::ConfigInvalidValue {
                key: "provider.endpoint".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/voxbatch/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("voxbatch")
            .join("config.toml")
    }
}
