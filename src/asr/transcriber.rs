use crate::defaults;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Per-record result of a transcription attempt.
///
/// Exactly one `Outcome` exists per manifest row by the time the batch
/// completes. The client boundary is infallible by contract: every failure
/// category (connect error, timeout, non-200 status, malformed body,
/// unreadable audio) collapses into `Failed`. The reason distinguishes
/// categories for operator output but does not change downstream handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The provider returned a transcription for this row's audio.
    Transcribed { text: String },
    /// The attempt failed; the row gets the error sentinel in the output.
    Failed { reason: String },
}

impl Outcome {
    /// Returns true for a successful transcription.
    pub fn is_transcribed(&self) -> bool {
        matches!(self, Outcome::Transcribed { .. })
    }

    /// Value for the output manifest's generated-text column.
    ///
    /// Failed rows get the reserved sentinel, never the failure reason;
    /// reasons are operator-facing and must not contaminate data rows.
    pub fn generated_text(&self) -> &str {
        match self {
            Outcome::Transcribed { text } => text,
            Outcome::Failed { .. } => defaults::ERROR_SENTINEL,
        }
    }
}

/// Trait for sending audio to a transcription provider.
///
/// This trait allows swapping implementations (real HTTP client vs mock).
/// Implementations make exactly one provider attempt per call and never
/// error: failures are absorbed into [`Outcome::Failed`].
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe raw audio bytes (any encoding the provider accepts).
    async fn transcribe(&self, audio: Vec<u8>) -> Outcome;

    /// Human-readable provider identifier (for status output).
    fn provider_name(&self) -> &str;
}

/// Implement Transcriber for Arc<T> to allow sharing across workers.
#[async_trait]
impl<T: Transcriber> Transcriber for Arc<T> {
    async fn transcribe(&self, audio: Vec<u8>) -> Outcome {
        (**self).transcribe(audio).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

/// Mock transcriber for testing.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    response: String,
    should_fail: bool,
    fail_for: Vec<Vec<u8>>,
    delay: Option<Duration>,
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscriber {
    /// Create a new mock with a default canned response.
    pub fn new() -> Self {
        Self {
            response: "mock transcription".to_string(),
            should_fail: false,
            fail_for: Vec::new(),
            delay: None,
        }
    }

    /// Configure the mock to return a specific transcription.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on every call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Configure the mock to fail only when given this exact audio input.
    ///
    /// Other inputs still succeed, so failure isolation can be verified.
    pub fn with_failure_for(mut self, audio: &[u8]) -> Self {
        self.fail_for.push(audio.to_vec());
        self
    }

    /// Configure a per-call delay, to exercise concurrency behavior.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio: Vec<u8>) -> Outcome {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail || self.fail_for.iter().any(|f| f == &audio) {
            Outcome::Failed {
                reason: "mock transcription failure".to_string(),
            }
        } else {
            Outcome::Transcribed {
                text: self.response.clone(),
            }
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
