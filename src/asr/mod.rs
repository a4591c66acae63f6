//! Transcription provider interface.
//!
//! The [`Transcriber`] trait is the seam between the batch pipeline and the
//! external speech-recognition service: the pipeline only ever sees audio
//! bytes in and an [`Outcome`] per item out. [`HttpTranscriber`] is the real
//! implementation; [`MockTranscriber`] stands in for tests.

pub mod client;
pub mod transcriber;

pub use client::{AsrResponse, HttpTranscriber, ProviderConfig};
pub use transcriber::{MockTranscriber, Outcome, Transcriber};
