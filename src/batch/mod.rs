//! The concurrent batch pipeline.
//!
//! ```text
//! manifest rows ──▶ Dispatcher ──▶ Transcriber (× concurrency) ──▶ (index, Outcome)
//!                                                                       │
//!       augmented manifest ◀── Orchestrator ◀── Correlator ◀────────────┘
//! ```
//!
//! The dispatcher fans rows out under a fixed worker cap, the correlator
//! restores manifest order from out-of-order completions, and the
//! orchestrator ties loading, dispatch, and output together.

pub mod correlator;
pub mod dispatcher;
pub mod orchestrator;

pub use correlator::ResultCorrelator;
pub use dispatcher::{WorkDispatcher, WorkItem};
pub use orchestrator::{BatchOptions, BatchOrchestrator, BatchSummary};
