//! Command-line interface for voxbatch
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Batch transcription of audio manifests via a remote ASR service
#[derive(Parser, Debug)]
#[command(
    name = "voxbatch",
    version,
    about = "Batch transcription of audio manifests via a remote ASR service"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: show transcriptions inline)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the input manifest CSV
    #[arg(long, short = 'm', value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Directory audio references are resolved against (default: manifest's directory)
    #[arg(long, value_name = "PATH")]
    pub audio_dir: Option<PathBuf>,

    /// Path for the augmented output manifest
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Provider base URL (e.g. http://localhost:8001)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Maximum concurrent transcription requests
    #[arg(long, short = 'c', value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-request timeout (default: 30s). Examples: 10s, 2m
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout_secs)]
    pub timeout: Option<u64>,

    /// Process only the first N manifest rows
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Parse a timeout duration string into seconds.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`30s`, `5m`), and compound (`1m30s`).
fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs())
        .map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the transcription provider is reachable
    Ping {
        /// Provider base URL override
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch_args() {
        let cli = Cli::try_parse_from([
            "voxbatch",
            "--manifest",
            "cv-valid-dev.csv",
            "--audio-dir",
            "datasets",
            "-o",
            "out.csv",
            "--concurrency",
            "8",
            "--limit",
            "10",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.manifest, Some(PathBuf::from("cv-valid-dev.csv")));
        assert_eq!(cli.audio_dir, Some(PathBuf::from("datasets")));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.concurrency, Some(8));
        assert_eq!(cli.limit, Some(10));
    }

    #[test]
    fn test_parse_ping_subcommand() {
        let cli = Cli::try_parse_from(["voxbatch", "ping", "--endpoint", "http://host:9000"])
            .unwrap();
        match cli.command {
            Some(Commands::Ping { endpoint }) => {
                assert_eq!(endpoint.as_deref(), Some("http://host:9000"));
            }
            _ => panic!("Expected ping subcommand"),
        }
    }

    #[test]
    fn test_parse_timeout_bare_seconds() {
        assert_eq!(parse_timeout_secs("45"), Ok(45));
    }

    #[test]
    fn test_parse_timeout_humantime_formats() {
        assert_eq!(parse_timeout_secs("30s"), Ok(30));
        assert_eq!(parse_timeout_secs("2m"), Ok(120));
        assert_eq!(parse_timeout_secs("1m30s"), Ok(90));
    }

    #[test]
    fn test_parse_timeout_invalid() {
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn test_quiet_and_verbose_flags() {
        let cli = Cli::try_parse_from(["voxbatch", "-q", "-v"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 1);
    }
}
