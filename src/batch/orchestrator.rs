//! Batch orchestration: load → dispatch → correlate → write.

use crate::asr::Transcriber;
use crate::batch::correlator::ResultCorrelator;
use crate::batch::dispatcher::{WorkDispatcher, WorkItem};
use crate::defaults;
use crate::error::Result;
use crate::manifest::{load_manifest, write_augmented};
use crate::output;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Tunables for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum concurrent transcription requests.
    pub concurrency: usize,
    /// Process only the first N manifest rows (None = all rows).
    pub limit: Option<usize>,
    /// Suppress progress output.
    pub quiet: bool,
    /// Verbosity level (0=progress, 1=progress with transcriptions).
    pub verbosity: u8,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: defaults::CONCURRENCY,
            limit: None,
            quiet: false,
            verbosity: 0,
        }
    }
}

/// Terminal summary of a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows processed (equals the output manifest's row count).
    pub total: usize,
    /// Rows with a transcription.
    pub succeeded: usize,
    /// Rows carrying the error sentinel.
    pub failed: usize,
}

/// Drives a whole batch: manifest in, augmented manifest out.
///
/// The transcriber handle is constructed once by the caller and shared by
/// every worker; the orchestrator owns the output buffer exclusively.
pub struct BatchOrchestrator {
    transcriber: Arc<dyn Transcriber>,
    options: BatchOptions,
}

impl BatchOrchestrator {
    /// Creates an orchestrator around a shared transcriber handle.
    pub fn new(transcriber: Arc<dyn Transcriber>, options: BatchOptions) -> Self {
        Self {
            transcriber,
            options,
        }
    }

    /// Runs the batch: one outcome per manifest row, augmented manifest
    /// written to `output_path`, summary returned.
    ///
    /// Only manifest-level problems are batch-fatal (missing file, bad CSV,
    /// missing `filename` column, unwritable output): they propagate as
    /// `Err` and no output is produced. Per-row failures become the error
    /// sentinel in the output and count toward `failed`; they never abort
    /// the run or change the result's variant.
    pub async fn run(
        &self,
        manifest_path: &Path,
        audio_dir: &Path,
        output_path: &Path,
    ) -> Result<BatchSummary> {
        let mut manifest = load_manifest(manifest_path)?;
        if let Some(limit) = self.options.limit {
            manifest.records.truncate(limit);
        }
        let n = manifest.len();

        if !self.options.quiet {
            output::render_start(n, self.options.concurrency);
        }

        let items: Vec<WorkItem> = manifest
            .records
            .iter()
            .map(|r| WorkItem::from_record(r, audio_dir))
            .collect();

        let dispatcher = WorkDispatcher::new(self.transcriber.clone(), self.options.concurrency);
        let (tx, mut rx) = mpsc::channel(defaults::RESULT_BUFFER);

        // Dispatch and drain concurrently: the dispatcher owns the sender
        // and drops it when every worker has reported, closing the channel.
        let dispatch = dispatcher.dispatch(items, tx);
        let drain = async {
            let mut correlator = ResultCorrelator::new(n);
            while let Some((index, outcome)) = rx.recv().await {
                if !self.options.quiet {
                    output::render_outcome(
                        &manifest.records[index].audio_ref,
                        &outcome,
                        self.options.verbosity,
                    );
                }
                correlator.record(index, outcome);
            }
            correlator
        };
        let ((), correlator) = tokio::join!(dispatch, drain);

        let outcomes = correlator.into_outcomes();
        let succeeded = outcomes.iter().filter(|o| o.is_transcribed()).count();
        let summary = BatchSummary {
            total: n,
            succeeded,
            failed: n - succeeded,
        };

        write_augmented(output_path, &manifest, &outcomes)?;

        if !self.options.quiet {
            output::render_summary(&summary, output_path);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asr::MockTranscriber;
    use crate::error::VoxbatchError;
    use std::io::Write;
    use tempfile::TempDir;

    fn setup(rows: &[&str]) -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let manifest_path = dir.path().join("manifest.csv");
        let mut f = std::fs::File::create(&manifest_path).unwrap();
        writeln!(f, "filename,text").unwrap();
        for (i, name) in rows.iter().enumerate() {
            writeln!(f, "{name},row-{i}").unwrap();
            std::fs::write(dir.path().join(name), format!("audio-{i}")).unwrap();
        }
        let output_path = dir.path().join("augmented.csv");
        (dir, manifest_path, output_path)
    }

    #[test]
    fn test_batch_options_default() {
        let options = BatchOptions::default();
        assert_eq!(options.concurrency, 20);
        assert_eq!(options.limit, None);
        assert!(!options.quiet);
        assert_eq!(options.verbosity, 0);
    }

    #[tokio::test]
    async fn test_run_counts_successes_and_failures() {
        let (dir, manifest_path, output_path) = setup(&["a.mp3", "b.mp3", "c.mp3"]);

        // audio-1 is b.mp3's contents, so only that row fails.
        let transcriber = Arc::new(
            MockTranscriber::new()
                .with_response("hello")
                .with_failure_for(b"audio-1"),
        );
        let orchestrator = BatchOrchestrator::new(
            transcriber,
            BatchOptions {
                quiet: true,
                ..Default::default()
            },
        );

        let summary = orchestrator
            .run(&manifest_path, dir.path(), &output_path)
            .await
            .unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                succeeded: 2,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_run_applies_row_limit() {
        let (dir, manifest_path, output_path) = setup(&["a.mp3", "b.mp3", "c.mp3", "d.mp3"]);

        let transcriber = Arc::new(MockTranscriber::new().with_response("hi"));
        let orchestrator = BatchOrchestrator::new(
            transcriber,
            BatchOptions {
                limit: Some(2),
                quiet: true,
                ..Default::default()
            },
        );

        let summary = orchestrator
            .run(&manifest_path, dir.path(), &output_path)
            .await
            .unwrap();

        assert_eq!(summary.total, 2);
        let contents = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(contents.lines().count(), 1 + 2);
    }

    #[tokio::test]
    async fn test_run_empty_manifest_writes_header_only() {
        let (dir, manifest_path, output_path) = setup(&[]);

        let transcriber = Arc::new(MockTranscriber::new());
        let orchestrator = BatchOrchestrator::new(
            transcriber,
            BatchOptions {
                quiet: true,
                ..Default::default()
            },
        );

        let summary = orchestrator
            .run(&manifest_path, dir.path(), &output_path)
            .await
            .unwrap();

        assert_eq!(summary.total, 0);
        let contents = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(contents.trim_end(), "filename,text,generated_text");
    }

    #[tokio::test]
    async fn test_run_missing_manifest_is_batch_fatal() {
        let dir = TempDir::new().unwrap();
        let transcriber = Arc::new(MockTranscriber::new());
        let orchestrator = BatchOrchestrator::new(transcriber, BatchOptions::default());

        let result = orchestrator
            .run(
                &dir.path().join("absent.csv"),
                dir.path(),
                &dir.path().join("out.csv"),
            )
            .await;

        assert!(matches!(result, Err(VoxbatchError::ManifestNotFound { .. })));
        assert!(!dir.path().join("out.csv").exists(), "no output on fatal error");
    }
}
