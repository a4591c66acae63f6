//! Terminal rendering for batch progress and summaries.
//! Results arrive in completion order, not manifest order.

use crate::asr::Outcome;
use crate::batch::BatchSummary;
use std::path::Path;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Announce the batch before dispatch begins.
pub fn render_start(rows: usize, concurrency: usize) {
    eprintln!("Transcribing {rows} file(s), up to {concurrency} in flight...");
}

/// Render one completed record.
pub fn render_outcome(audio_ref: &str, outcome: &Outcome, verbosity: u8) {
    match outcome {
        Outcome::Transcribed { text } => {
            if verbosity >= 1 {
                eprintln!("{GREEN}ok{RESET} {audio_ref} {DIM}{text}{RESET}");
            } else {
                eprintln!("{GREEN}ok{RESET} {audio_ref}");
            }
        }
        Outcome::Failed { reason } => {
            eprintln!("{RED}failed{RESET} {audio_ref} {DIM}({reason}){RESET}");
        }
    }
}

/// Render the terminal summary once the augmented manifest is written.
pub fn render_summary(summary: &BatchSummary, output_path: &Path) {
    let failed = if summary.failed > 0 {
        format!("{RED}{} failed{RESET}", summary.failed)
    } else {
        format!("{} failed", summary.failed)
    };
    eprintln!(
        "Done: {} row(s), {GREEN}{} transcribed{RESET}, {failed}",
        summary.total, summary.succeeded
    );
    eprintln!("Augmented manifest written to {}", output_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rendering writes to stderr, which tests can't capture; these are
    // smoke tests validating every variant renders without panicking.

    #[test]
    fn test_render_start_doesnt_panic() {
        render_start(10, 20);
        render_start(0, 1);
    }

    #[test]
    fn test_render_outcome_variants() {
        let ok = Outcome::Transcribed {
            text: "hello world".to_string(),
        };
        render_outcome("clips/a.mp3", &ok, 0);
        render_outcome("clips/a.mp3", &ok, 1);

        let failed = Outcome::Failed {
            reason: "provider returned HTTP 500".to_string(),
        };
        render_outcome("clips/b.mp3", &failed, 0);
    }

    #[test]
    fn test_render_summary_with_and_without_failures() {
        render_summary(
            &BatchSummary {
                total: 10,
                succeeded: 9,
                failed: 1,
            },
            Path::new("/tmp/out.csv"),
        );
        render_summary(
            &BatchSummary {
                total: 10,
                succeeded: 10,
                failed: 0,
            },
            Path::new("/tmp/out.csv"),
        );
    }
}
