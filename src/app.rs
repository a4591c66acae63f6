//! Batch application entry points.
//!
//! Composition root wiring config → provider client → orchestrator. The
//! shared transcriber handle is constructed exactly once here and injected
//! into the pipeline, never reached through a global.

use crate::asr::client::{HttpTranscriber, ProviderConfig};
use crate::asr::transcriber::Transcriber;
use crate::batch::{BatchOptions, BatchOrchestrator, BatchSummary};
use crate::config::Config;
use crate::error::{Result, VoxbatchError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// CLI overrides applied on top of file/env configuration.
///
/// Precedence: CLI argument > environment variable > config file > default.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub manifest: Option<PathBuf>,
    pub audio_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub limit: Option<usize>,
}

impl CliOverrides {
    /// Folds the overrides into a loaded configuration.
    pub fn apply(self, config: &mut Config) {
        if let Some(manifest) = self.manifest {
            config.manifest.path = Some(manifest);
        }
        if let Some(audio_dir) = self.audio_dir {
            config.manifest.audio_dir = Some(audio_dir);
        }
        if let Some(output) = self.output {
            config.manifest.output = Some(output);
        }
        if let Some(endpoint) = self.endpoint {
            config.provider.endpoint = endpoint;
        }
        if let Some(concurrency) = self.concurrency {
            config.batch.concurrency = concurrency;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.provider.timeout_secs = timeout_secs;
        }
        if let Some(limit) = self.limit {
            config.batch.limit = Some(limit);
        }
    }
}

/// Default output path: `<manifest stem>-transcribed.csv` next to the input.
pub fn derive_output_path(manifest_path: &Path) -> PathBuf {
    let stem = manifest_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".to_string());
    manifest_path.with_file_name(format!("{stem}-transcribed.csv"))
}

/// Run the batch command: load the manifest, transcribe every row, write
/// the augmented manifest.
///
/// Per-row failures are part of a successful run (they show up in the
/// summary and as sentinels in the output); only manifest-level and
/// configuration problems return `Err`.
pub async fn run_batch_command(
    mut config: Config,
    overrides: CliOverrides,
    quiet: bool,
    verbosity: u8,
) -> Result<BatchSummary> {
    overrides.apply(&mut config);
    config.validate()?;

    let manifest_path =
        config
            .manifest
            .path
            .clone()
            .ok_or_else(|| VoxbatchError::ConfigInvalidValue {
                key: "manifest.path".to_string(),
                message: "no manifest given (use --manifest or set manifest.path)".to_string(),
            })?;
    let audio_dir = config.manifest.audio_dir.clone().unwrap_or_else(|| {
        manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let output_path = config
        .manifest
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&manifest_path));

    let provider = ProviderConfig {
        endpoint: config.provider.endpoint.clone(),
        timeout: Duration::from_secs(config.provider.timeout_secs),
    };
    let transcriber: Arc<dyn Transcriber> = Arc::new(HttpTranscriber::new(&provider)?);

    let orchestrator = BatchOrchestrator::new(
        transcriber,
        BatchOptions {
            concurrency: config.batch.concurrency,
            limit: config.batch.limit,
            quiet,
            verbosity,
        },
    );
    orchestrator.run(&manifest_path, &audio_dir, &output_path).await
}

/// Run the ping command: `GET /ping` against the configured provider.
pub async fn run_ping_command(config: Config, endpoint: Option<String>) -> Result<()> {
    let provider = ProviderConfig {
        endpoint: endpoint.unwrap_or(config.provider.endpoint),
        timeout: Duration::from_secs(config.provider.timeout_secs),
    };
    let client = HttpTranscriber::new(&provider)?;
    client.ping().await
}
