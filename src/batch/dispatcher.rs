//! Bounded-concurrency work dispatch.
//!
//! Fans every manifest row out to the transcription client with at most a
//! fixed number of requests in flight. Completion order is unconstrained;
//! each worker reports `(index, Outcome)` and the correlator restores order.

use crate::asr::{Outcome, Transcriber};
use crate::manifest::ManifestRecord;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

/// One unit of work: a row index plus its resolved audio path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// The originating row's correlation key.
    pub index: usize,
    /// Absolute (or audio-dir-relative) path to the audio asset.
    pub audio_path: PathBuf,
}

impl WorkItem {
    /// Resolves a record's audio reference against the asset directory.
    pub fn from_record(record: &ManifestRecord, audio_dir: &Path) -> Self {
        Self {
            index: record.index,
            audio_path: audio_dir.join(&record.audio_ref),
        }
    }
}

/// Submits work items to the transcriber under a fixed concurrency limit.
pub struct WorkDispatcher {
    transcriber: Arc<dyn Transcriber>,
    concurrency: usize,
}

impl WorkDispatcher {
    /// Creates a dispatcher with the given worker cap.
    ///
    /// # Panics
    /// Panics if `concurrency` is zero; a zero-width pool can never make
    /// progress.
    pub fn new(transcriber: Arc<dyn Transcriber>, concurrency: usize) -> Self {
        assert!(concurrency > 0, "concurrency limit must be at least 1");
        Self {
            transcriber,
            concurrency,
        }
    }

    /// Submits every item exactly once and returns only after all of them
    /// have produced an outcome.
    ///
    /// At most `concurrency` transcriptions are in flight at any instant;
    /// excess items queue on the semaphore. One item's failure (unreadable
    /// audio, provider error) never skips or cancels another item: the
    /// client absorbs failures into `Outcome::Failed` and the worker reports
    /// it like any other result.
    ///
    /// The caller keeps the receiving end of `results`; when this method
    /// returns and `results` is dropped, the channel closes, signalling that
    /// every outcome has been sent.
    pub async fn dispatch(&self, items: Vec<WorkItem>, results: mpsc::Sender<(usize, Outcome)>) {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        for item in items {
            // acquire_owned fails only on a closed semaphore, which never
            // happens here.
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let transcriber = self.transcriber.clone();
            let results = results.clone();

            tokio::spawn(async move {
                let _permit = permit; // held until the outcome is reported
                let index = item.index;
                let outcome = process_item(item, transcriber.as_ref()).await;
                // A dropped receiver means the batch was abandoned.
                let _ = results.send((index, outcome)).await;
            });
        }

        // Wait for all in-flight work by draining every permit.
        let _ = semaphore.acquire_many(self.concurrency as u32).await;
    }
}

/// Reads the audio bytes and performs the single transcription attempt.
///
/// An unreadable audio file is a per-item outcome, not an error: the batch
/// continues without it.
async fn process_item(item: WorkItem, transcriber: &dyn Transcriber) -> Outcome {
    let audio = match tokio::fs::read(&item.audio_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Outcome::Failed {
                reason: format!("failed to read {}: {e}", item.audio_path.display()),
            };
        }
    };
    transcriber.transcribe(audio).await
}
