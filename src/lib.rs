//! voxbatch - Concurrent batch transcription for audio manifests
//!
//! Sends every audio file named in a CSV manifest to a remote ASR service
//! under bounded concurrency and writes the manifest back out with a
//! `generated_text` column, preserving row order and count exactly.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod asr;
pub mod batch;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod manifest;
pub mod output;

// Provider seam (audio bytes in, outcome out)
pub use asr::client::{AsrResponse, HttpTranscriber, ProviderConfig};
pub use asr::transcriber::{MockTranscriber, Outcome, Transcriber};

// Pipeline
pub use batch::{BatchOptions, BatchOrchestrator, BatchSummary, ResultCorrelator, WorkDispatcher};

// Manifest I/O
pub use manifest::{Manifest, ManifestRecord, load_manifest, write_augmented};

// Error handling
pub use error::{Result, VoxbatchError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
